//! The unit of registration: one request pattern mapped to one canned response.
//!
//! A typed [`Double`] is always complete. Loosely-shaped input (JSON documents
//! written by a test author) goes through [`Double::try_from`] or
//! [`Double::from_json_str`], which report what is missing before anything can
//! reach a registry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::MethodMatch;
use crate::DoubleError;

/// The request half of a double: the `(method, url)` pair it answers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoubleRequest {
    pub method: String,
    pub url: String,
}

impl DoubleRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
        }
    }
}

/// A registered stand-in mapping one HTTP request to one canned response.
///
/// The response is opaque to the registry: it is stored and handed back as is.
///
/// # Examples
///
/// ```rust
/// use http_doubles::Double;
/// use serde_json::json;
///
/// let double = Double::builder()
///     .method("GET")
///     .url("/health")
///     .status(200)
///     .content(json!({ "ok": true }))
///     .build()
///     .unwrap();
///
/// assert_eq!(double.response()["status"], 200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Double {
    request: DoubleRequest,
    response: Value,
}

impl Double {
    pub fn new(request: DoubleRequest, response: Value) -> Self {
        Self { request, response }
    }

    pub fn builder() -> DoubleBuilder {
        DoubleBuilder::default()
    }

    /// Parses and validates a double from JSON text.
    ///
    /// # Errors
    ///
    /// - [`DoubleError::Json`] if the text is not JSON
    /// - any error [`Double::try_from`] reports for the parsed value
    pub fn from_json_str(text: &str) -> Result<Self, DoubleError> {
        let value: Value = serde_json::from_str(text)?;
        Self::try_from(value)
    }

    pub fn request(&self) -> &DoubleRequest {
        &self.request
    }

    pub fn method(&self) -> &str {
        &self.request.method
    }

    pub fn url(&self) -> &str {
        &self.request.url
    }

    pub fn response(&self) -> &Value {
        &self.response
    }

    pub fn into_response(self) -> Value {
        self.response
    }

    /// Whether this double answers `(method, url)` under the given method policy.
    pub(crate) fn answers(&self, method: &str, url: &str, policy: MethodMatch) -> bool {
        self.request.url == url && policy.matches(&self.request.method, method)
    }
}

impl TryFrom<Value> for Double {
    type Error = DoubleError;

    /// Validates a loosely-shaped double.
    ///
    /// A key holding `null` counts as absent. `request` is checked before
    /// `response`, and the first failure wins.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            _ => return Err(DoubleError::MissingRequest),
        };

        let request = take_present(&mut fields, "request").ok_or(DoubleError::MissingRequest)?;
        let response =
            take_present(&mut fields, "response").ok_or(DoubleError::MissingResponse)?;

        let request = serde_json::from_value::<DoubleRequest>(request)
            .map_err(|e| DoubleError::MalformedRequest(e.to_string()))?;

        Ok(Self { request, response })
    }
}

fn take_present(fields: &mut Map<String, Value>, key: &str) -> Option<Value> {
    fields.remove(key).filter(|value| !value.is_null())
}

/// Fluent constructor for [`Double`].
///
/// The response helpers (`status`, `content`, `redirect_url`) each set one field
/// of a JSON object response, creating the object on first use.
#[derive(Debug, Default, Clone)]
pub struct DoubleBuilder {
    method: Option<String>,
    url: Option<String>,
    response: Option<Value>,
}

impl DoubleBuilder {
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the whole response, replacing anything set so far.
    pub fn response(mut self, response: Value) -> Self {
        self.response = Some(response);
        self
    }

    pub fn status(self, status: u16) -> Self {
        self.response_field("status", Value::from(status))
    }

    pub fn content(self, content: Value) -> Self {
        self.response_field("content", content)
    }

    pub fn redirect_url(self, url: impl Into<String>) -> Self {
        self.response_field("redirectURL", Value::String(url.into()))
    }

    fn response_field(mut self, key: &str, value: Value) -> Self {
        let response = self
            .response
            .get_or_insert_with(|| Value::Object(Map::new()));

        // A non-object response set via `response()` cannot carry fields.
        if !response.is_object() {
            *response = Value::Object(Map::new());
        }
        if let Value::Object(fields) = response {
            fields.insert(key.to_string(), value);
        }
        self
    }

    /// # Errors
    ///
    /// - [`DoubleError::MissingRequest`] if the method or the url was never set
    /// - [`DoubleError::MissingResponse`] if no response part was set
    pub fn build(self) -> Result<Double, DoubleError> {
        let (Some(method), Some(url)) = (self.method, self.url) else {
            return Err(DoubleError::MissingRequest);
        };
        let response = self.response.ok_or(DoubleError::MissingResponse)?;

        Ok(Double::new(DoubleRequest::new(method, url), response))
    }
}
