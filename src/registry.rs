//! An owned, thread-safe registry of HTTP doubles.
//!
//! # Examples
//!
//! ```
//! use http_doubles::{Double, DoubleRegistry, RegistryApi};
//! use serde_json::json;
//!
//! let registry = DoubleRegistry::new();
//! registry.register(
//!     Double::builder()
//!         .method("GET")
//!         .url("/some-example")
//!         .status(200)
//!         .build()
//!         .unwrap(),
//! );
//!
//! assert_eq!(registry.resolve("GET", "/some-example"), json!({ "status": 200 }));
//! assert_eq!(registry.resolve("GET", "/nope"), json!({ "status": 404 }));
//! ```

use std::fmt;

use crate::{RegistryApi, RegistryOptions, Storage, TraceSlot};

/// A registry instance owning its doubles.
///
/// All operations come from [`RegistryApi`]. Share it across threads behind an
/// `Arc`; reads (`resolve`, `is_registered`) run in parallel while mutations are
/// exclusive.
#[derive(Default)]
pub struct DoubleRegistry {
    storage: Storage,
    trace: TraceSlot,
    options: RegistryOptions,
}

impl DoubleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }
}

impl RegistryApi for DoubleRegistry {
    fn storage(&self) -> &Storage {
        &self.storage
    }

    fn trace(&self) -> &TraceSlot {
        &self.trace
    }

    fn options(&self) -> RegistryOptions {
        self.options
    }
}

impl fmt::Debug for DoubleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoubleRegistry")
            .field("storage", &self.storage)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
