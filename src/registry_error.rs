/// Errors raised while turning input into a [`Double`](crate::Double).
///
/// The two `Missing*` variants carry the exact messages test suites assert on,
/// so their `Display` output is part of the public contract.
#[derive(Debug, thiserror::Error)]
pub enum DoubleError {
    #[error("Double missing request property.")]
    MissingRequest,

    #[error("Double missing response property.")]
    MissingResponse,

    /// `request` is present but is not a `{ method, url }` pair of strings.
    #[error("Double request is malformed: {0}")]
    MalformedRequest(String),

    #[error("Double is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl DoubleError {
    /// Whether this error comes from a structurally incomplete double, as opposed
    /// to unparseable input.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, DoubleError::Json(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_request_display() {
        let err = DoubleError::MissingRequest;
        assert_eq!(err.to_string(), "Double missing request property.");
    }

    #[test]
    fn test_missing_response_display() {
        let err = DoubleError::MissingResponse;
        assert_eq!(err.to_string(), "Double missing response property.");
    }

    #[test]
    fn test_malformed_request_display() {
        let err = DoubleError::MalformedRequest("missing field `url`".to_string());
        assert_eq!(
            err.to_string(),
            "Double request is malformed: missing field `url`"
        );
    }

    #[test]
    fn test_json_error_is_not_malformed() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DoubleError::from(source);
        assert!(!err.is_malformed());
        assert!(DoubleError::MissingResponse.is_malformed());
    }

    #[test]
    fn test_error_trait() {
        let err: &dyn std::error::Error = &DoubleError::MissingRequest;
        assert_eq!(err.to_string(), "Double missing request property.");
    }
}
