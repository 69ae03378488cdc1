/// Unified error types for the Reelay client.
use thiserror::Error;

/// Top-level error type for the Reelay client.
///
/// Every variant is terminal for the current task attempt and none is
/// fatal to the controller; the user may always resubmit.
#[derive(Debug, Error)]
pub enum ReelayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Backend answered 2xx but the payload is unusable: missing task id,
    /// malformed body, or an explicit backend-reported failure.
    #[error("{0}")]
    Application(String),
}

impl ReelayError {
    /// Fallback application error when the backend supplies no message.
    pub fn unknown() -> Self {
        ReelayError::Application("Unknown error".to_string())
    }
}

/// Local precondition failures, reported inline and never sent anywhere.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid source video URL")]
    InvalidUrl,

    #[error("Select at least one platform")]
    NoPlatformSelected,
}

/// HTTP-level failures on submit or poll. Never retried automatically.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("network error: {0}")]
    Network(String),
}

/// Result type alias for Reelay operations.
pub type ReelayResult<T> = Result<T, ReelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = ReelayError::from(TransportError::HttpStatus(502));
        assert_eq!(e.to_string(), "HTTP error! status: 502");

        let e = ReelayError::from(ValidationError::NoPlatformSelected);
        assert_eq!(e.to_string(), "Select at least one platform");

        assert_eq!(ReelayError::unknown().to_string(), "Unknown error");
    }
}
