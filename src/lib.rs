//! # HTTP Doubles
//!
//! A thread-safe registry of canned HTTP request/response pairs ("doubles") for
//! tests. Register doubles keyed by `(method, url)`, then resolve incoming
//! requests against them; anything unknown gets a `{"status": 404}` response.
//!
//! Responses are opaque JSON values: the registry stores and returns them as
//! given.
//!
//! ## Quick Start
//!
//! ```rust
//! use http_doubles::{DoubleRegistry, RegistryApi};
//! use serde_json::json;
//!
//! let registry = DoubleRegistry::new();
//! registry
//!     .register_json(json!({
//!         "request": { "method": "GET", "url": "/some-example" },
//!         "response": { "status": 200, "content": { "size": 42 } }
//!     }))
//!     .unwrap();
//!
//! assert_eq!(registry.resolve("GET", "/some-example")["content"]["size"], 42);
//!
//! registry.unregister_by_url("/some-example");
//! assert!(!registry.is_registered("/some-example"));
//! ```
//!
//! ## Features
//!
//! - **Thread-safe**: lookups run in parallel, mutations are exclusive
//! - **Typed doubles**: [`Double`] is complete by construction; JSON input is
//!   validated with exact error messages
//! - **Named registries**: [`define_registry!`] creates static, isolated registries
//! - **Tracing support**: an optional callback sees every registry operation
//! - **Serving** (feature `server`): [`DoubleServer`] answers real HTTP requests
//!
//! ## Main Types
//!
//! - [`DoubleRegistry`] - An owned registry instance
//! - [`RegistryApi`] - All registry operations
//! - [`Double`] / [`DoubleBuilder`] - What gets registered
//! - [`DoubleError`] - Why a double was rejected

mod config;
mod double;
mod macros;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;
#[cfg(feature = "server")]
mod server;

pub use config::{MethodMatch, RegistryOptions, ServerConfig};
pub use double::{Double, DoubleBuilder, DoubleRequest};
pub use registry::DoubleRegistry;
pub use registry_error::DoubleError;
pub use registry_event::RegistryEvent;
pub use registry_trait::{RegistryApi, Storage, TraceCallback, TraceSlot, NOT_REGISTERED_MESSAGE};
#[cfg(feature = "server")]
pub use server::{DoubleServer, ServerError};

// Used by `define_registry!` expansions.
#[doc(hidden)]
pub use serde_json;
