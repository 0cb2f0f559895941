//! Unified error type definition.

use serde::Serialize;
use thiserror::Error;

/// Triage error type.
///
/// [`InputInvalid`](Self::InputInvalid) is the only variant the public
/// operations surface to the caller; upstream failures are caught per-check
/// and downgraded to report findings.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum TriageError {
    /// Malformed domain or IP input, rejected before any network call.
    #[error("Invalid input: {0}")]
    InputInvalid(String),

    /// Timeout, connect failure, or other transport error from a collaborator.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// A collaborator answered with an undecodable response shape.
    #[error("Upstream malformed: {0}")]
    UpstreamMalformed(String),
}

impl TriageError {
    /// Whether this is expected behavior (bad user input) rather than an
    /// environment failure. Used for log level selection.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::InputInvalid(_))
    }
}

/// Triage Result type alias.
pub type TriageResult<T> = std::result::Result<T, TriageError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization_tagged() {
        let err = TriageError::InputInvalid("empty domain".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "InputInvalid");
        assert_eq!(json["details"], "empty domain");
    }

    #[test]
    fn test_error_display() {
        let err = TriageError::UpstreamUnavailable("connect timed out".to_string());
        assert_eq!(err.to_string(), "Upstream unavailable: connect timed out");
    }

    #[test]
    fn test_is_expected() {
        assert!(TriageError::InputInvalid("x".to_string()).is_expected());
        assert!(!TriageError::UpstreamUnavailable("x".to_string()).is_expected());
        assert!(!TriageError::UpstreamMalformed("x".to_string()).is_expected());
    }
}
