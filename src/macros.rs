//! Macros for creating named, process-wide double registries.

/// Creates a complete double registry with a single macro invocation.
///
/// The macro generates a module containing:
/// - Storage static (hidden)
/// - Trace callback static (hidden)
/// - An `Api` struct that implements `RegistryApi`
/// - Free functions delegating to it
///
/// An optional `method_match = <MethodMatch variant>` argument picks how
/// request methods are compared.
///
/// # Examples
///
/// ```rust
/// use http_doubles::{define_registry, Double};
/// use serde_json::json;
///
/// define_registry!(stubs);
///
/// stubs::register(
///     Double::builder().method("GET").url("/ping").status(200).build().unwrap(),
/// );
///
/// assert_eq!(stubs::resolve("GET", "/ping"), json!({ "status": 200 }));
/// assert!(stubs::is_registered("/ping"));
/// ```
///
/// # Multiple Registries
///
/// Each invocation is isolated from every other:
///
/// ```rust
/// use http_doubles::{define_registry, Double};
///
/// define_registry!(billing);
/// define_registry!(accounts, method_match = IgnoreCase);
///
/// billing::register(
///     Double::builder().method("GET").url("/invoices").status(200).build().unwrap(),
/// );
///
/// assert!(billing::is_registered("/invoices"));
/// assert!(!accounts::is_registered("/invoices"));
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        $crate::define_registry!(@module $name, $crate::RegistryOptions::new($crate::MethodMatch::Exact));
    };
    ($name:ident, method_match = $policy:ident) => {
        $crate::define_registry!(@module $name, $crate::RegistryOptions::new($crate::MethodMatch::$policy));
    };
    (@module $name:ident, $options:expr) => {
        pub mod $name {
            // Storage for registered doubles (module-private)
            static STORAGE: $crate::Storage = $crate::Storage::new();

            // Trace callback storage (module-private)
            static TRACE: $crate::TraceSlot = std::sync::Mutex::new(None);

            /// Zero-sized type that implements the registry API.
            struct Api;

            impl $crate::RegistryApi for Api {
                fn storage(&self) -> &$crate::Storage {
                    &STORAGE
                }

                fn trace(&self) -> &$crate::TraceSlot {
                    &TRACE
                }

                fn options(&self) -> $crate::RegistryOptions {
                    $options
                }
            }

            const API: Api = Api;

            // Free functions for ergonomic usage - they delegate to API

            /// Register a double, replacing any with the same method and url.
            pub fn register(double: $crate::Double) {
                use $crate::RegistryApi;
                API.register(double)
            }

            /// Validate a loosely-shaped double and register it.
            pub fn register_json(value: $crate::serde_json::Value) -> Result<(), $crate::DoubleError> {
                use $crate::RegistryApi;
                API.register_json(value)
            }

            /// Check whether any double is registered for a url.
            pub fn is_registered(url: &str) -> bool {
                use $crate::RegistryApi;
                API.is_registered(url)
            }

            /// Remove every double registered for a url.
            pub fn unregister_by_url(url: &str) {
                use $crate::RegistryApi;
                API.unregister_by_url(url)
            }

            /// Map a request to its registered response or a 404.
            pub fn resolve(method: &str, url: &str) -> $crate::serde_json::Value {
                use $crate::RegistryApi;
                API.resolve(method, url)
            }

            /// The most recent diagnostic message.
            pub fn message() -> String {
                use $crate::RegistryApi;
                API.message()
            }

            /// The response handed out by the most recent resolve.
            pub fn last_response() -> Option<$crate::serde_json::Value> {
                use $crate::RegistryApi;
                API.last_response()
            }

            /// Snapshot of the registered doubles.
            pub fn doubles() -> Vec<$crate::Double> {
                use $crate::RegistryApi;
                API.doubles()
            }

            /// Remove all doubles.
            #[doc(hidden)]
            pub fn clear() {
                use $crate::RegistryApi;
                API.clear()
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static) {
                use $crate::RegistryApi;
                API.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                use $crate::RegistryApi;
                API.clear_trace_callback()
            }
        }
    };
}
