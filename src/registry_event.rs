/// Events emitted by a registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use http_doubles::RegistryEvent;
///
/// let event = RegistryEvent::Contains { url: "/x".to_string(), found: false };
/// assert_eq!(event.to_string(), "contains { url: /x, found: false }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A double was registered.
    Register {
        method: String,
        url: String,
        /// Whether an existing double with the same key was dropped first.
        replaced: bool,
    },

    /// A removal by url was requested.
    Unregister {
        url: String,
        /// Number of doubles dropped; zero when the url was not registered.
        removed: usize,
    },

    /// An incoming request was resolved.
    Resolve {
        method: String,
        url: String,
        /// Whether a registered double answered, rather than the 404 fallback.
        found: bool,
    },

    /// A url existence check was performed.
    Contains { url: String, found: bool },

    /// The registry was cleared.
    Clear {},
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Register {
                method,
                url,
                replaced,
            } => {
                write!(
                    f,
                    "register {{ method: {method}, url: {url}, replaced: {replaced} }}"
                )
            }
            RegistryEvent::Unregister { url, removed } => {
                write!(f, "unregister {{ url: {url}, removed: {removed} }}")
            }
            RegistryEvent::Resolve { method, url, found } => {
                write!(
                    f,
                    "resolve {{ method: {method}, url: {url}, found: {found} }}"
                )
            }
            RegistryEvent::Contains { url, found } => {
                write!(f, "contains {{ url: {url}, found: {found} }}")
            }
            RegistryEvent::Clear {} => write!(f, "Clearing the Registry"),
        }
    }
}
