//! Registry and server settings.

use serde::Deserialize;

/// How request methods are compared when matching and deduplicating doubles.
///
/// Urls are always compared exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodMatch {
    /// Literal string equality: `"GET"` and `"get"` are different methods.
    #[default]
    Exact,
    /// ASCII case-insensitive equality.
    IgnoreCase,
}

impl MethodMatch {
    pub fn matches(self, registered: &str, incoming: &str) -> bool {
        match self {
            MethodMatch::Exact => registered == incoming,
            MethodMatch::IgnoreCase => registered.eq_ignore_ascii_case(incoming),
        }
    }
}

/// Behaviour knobs for a registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
    pub method_match: MethodMatch,
}

impl RegistryOptions {
    pub const fn new(method_match: MethodMatch) -> Self {
        Self { method_match }
    }
}

/// Listening address for [`DoubleServer`](crate::DoubleServer).
///
/// Defaults to `127.0.0.1:8001`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 8001;

    /// Same host, different port. Port `0` asks the OS for a free one.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: Self::DEFAULT_PORT,
        }
    }
}
