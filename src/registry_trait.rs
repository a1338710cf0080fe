//! Core trait defining registry behavior.
//!
//! This module provides the `RegistryApi` trait with default implementations for
//! registering, resolving, and removing doubles, plus the tracing hook.
//!
//! Doubles are unique by `(method, url)`: registering a second double for the
//! same key drops the first. Existence checks and removal work per url, across
//! all methods.

use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{json, Value};

use crate::{Double, DoubleError, RegistryEvent, RegistryOptions};

/// Diagnostic recorded when removal targets a url that has no doubles.
pub const NOT_REGISTERED_MESSAGE: &str = "Invalid uri: Not registered";

/// Type alias for the user-supplied tracing callback.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Storage for the tracing callback.
pub type TraceSlot = Mutex<Option<Arc<TraceCallback>>>;

/// The state behind a registry: the doubles and the diagnostic slots.
///
/// Fields are reachable only through [`RegistryApi`]. `new` is `const` so the
/// storage can live in a `static`.
#[derive(Debug, Default)]
pub struct Storage {
    doubles: RwLock<Vec<Double>>,
    diagnostics: Mutex<Diagnostics>,
}

#[derive(Debug, Default)]
struct Diagnostics {
    message: String,
    last_response: Option<Value>,
}

impl Storage {
    pub const fn new() -> Self {
        Self {
            doubles: RwLock::new(Vec::new()),
            diagnostics: Mutex::new(Diagnostics {
                message: String::new(),
                last_response: None,
            }),
        }
    }

    // Poisoning only occurs if a thread panics while holding a lock. Every
    // mutation below leaves the collection consistent at each step, so the inner
    // value is safe to keep using.

    fn read(&self) -> RwLockReadGuard<'_, Vec<Double>> {
        self.doubles.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Double>> {
        self.doubles.write().unwrap_or_else(|p| p.into_inner())
    }

    fn diagnostics(&self) -> MutexGuard<'_, Diagnostics> {
        self.diagnostics.lock().unwrap_or_else(|p| p.into_inner())
    }
}

fn not_found_response() -> Value {
    json!({ "status": 404 })
}

/// Core trait defining registry behavior.
///
/// Provides default implementations for all registry operations, requiring only
/// two accessor methods (`storage` and `trace`) to be implemented by the implementor.
/// `options` may be overridden to change how methods are compared.
pub trait RegistryApi {
    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Access the trace callback slot.
    fn trace(&self) -> &TraceSlot;

    /// Set a tracing callback for registry operations.
    ///
    /// The callback will be invoked for every registry operation (register,
    /// unregister, resolve, contains, clear). It runs after the registry's own
    /// locks are released, so it may call back into the same registry.
    fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = self.trace().lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clear the tracing callback.
    ///
    /// After calling this, no tracing events will be emitted.
    /// Note: This does not affect registered doubles, only the tracing callback.
    fn clear_trace_callback(&self) {
        let mut guard = self.trace().lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    /// Convenience wrapper to emit a registry event using the current callback.
    ///
    /// # Panics
    ///
    /// If the callback itself panics, the panic will propagate to the caller.
    /// Neither the storage nor the trace lock is held while it runs.
    fn emit_event(&self, event: &RegistryEvent) {
        let callback = self
            .trace()
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();

        if let Some(callback) = callback {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    /// Access the storage.
    fn storage(&self) -> &Storage;

    /// Behaviour knobs. Exact method comparison unless overridden.
    fn options(&self) -> RegistryOptions {
        RegistryOptions::default()
    }

    /// Register a double.
    ///
    /// Any double already stored under the same `(method, url)` is removed first
    /// and the new one is appended, so a replaced double moves to the end of
    /// iteration order. Other doubles keep their relative order.
    fn register(&self, double: Double) {
        let policy = self.options().method_match;
        let method = double.method().to_string();
        let url = double.url().to_string();

        let replaced = {
            let mut doubles = self.storage().write();
            let before = doubles.len();
            doubles.retain(|existing| !existing.answers(&method, &url, policy));
            let replaced = doubles.len() != before;
            doubles.push(double);
            replaced
        };

        tracing::debug!(%method, %url, replaced, "registered double");
        self.emit_event(&RegistryEvent::Register {
            method,
            url,
            replaced,
        });
    }

    /// Validate a loosely-shaped double and register it.
    ///
    /// # Errors
    ///
    /// Whatever [`Double::try_from`] reports. The registry is untouched on error.
    fn register_json(&self, value: Value) -> Result<(), DoubleError> {
        let double = Double::try_from(value)?;
        self.register(double);
        Ok(())
    }

    /// Whether any double, of any method, is registered for `url`.
    fn is_registered(&self, url: &str) -> bool {
        let found = self
            .storage()
            .read()
            .iter()
            .any(|double| double.url() == url);

        self.emit_event(&RegistryEvent::Contains {
            url: url.to_string(),
            found,
        });

        found
    }

    /// Remove every double registered for `url`, whatever its method.
    ///
    /// When nothing is registered for `url` the collection is left alone and the
    /// diagnostic message is set to [`NOT_REGISTERED_MESSAGE`].
    fn unregister_by_url(&self, url: &str) {
        let removed = {
            let mut doubles = self.storage().write();
            let before = doubles.len();
            doubles.retain(|double| double.url() != url);
            before - doubles.len()
        };

        if removed == 0 {
            self.storage().diagnostics().message = NOT_REGISTERED_MESSAGE.to_string();
            tracing::debug!(url, "nothing to unregister");
        } else {
            tracing::debug!(url, removed, "unregistered doubles");
        }

        self.emit_event(&RegistryEvent::Unregister {
            url: url.to_string(),
            removed,
        });
    }

    /// Map an incoming request to a response.
    ///
    /// The first double answering `(method, url)` wins. Without one, a fresh
    /// `{"status": 404}` is returned. Either way the result is also kept as the
    /// last response.
    fn resolve(&self, method: &str, url: &str) -> Value {
        let policy = self.options().method_match;
        let matched = self
            .storage()
            .read()
            .iter()
            .find(|double| double.answers(method, url, policy))
            .map(|double| double.response().clone());

        let found = matched.is_some();
        let response = matched.unwrap_or_else(not_found_response);

        if found {
            tracing::debug!(method, url, "resolved request to double");
        } else {
            tracing::debug!(method, url, "no double registered, answering 404");
        }

        self.storage().diagnostics().last_response = Some(response.clone());
        self.emit_event(&RegistryEvent::Resolve {
            method: method.to_string(),
            url: url.to_string(),
            found,
        });

        response
    }

    /// The most recent diagnostic message; empty until one is recorded.
    fn message(&self) -> String {
        self.storage().diagnostics().message.clone()
    }

    /// The response handed out by the most recent `resolve`, if any.
    fn last_response(&self) -> Option<Value> {
        self.storage().diagnostics().last_response.clone()
    }

    /// Snapshot of the registered doubles in iteration order.
    fn doubles(&self) -> Vec<Double> {
        self.storage().read().clone()
    }

    fn len(&self) -> usize {
        self.storage().read().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all doubles.
    ///
    /// This method is primarily intended for testing. The diagnostic slots and
    /// the tracing callback are left as they are.
    #[doc(hidden)]
    fn clear(&self) {
        self.storage().write().clear();
        self.emit_event(&RegistryEvent::Clear {});
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
