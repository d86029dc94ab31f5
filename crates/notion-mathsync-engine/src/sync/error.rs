/// Failure of a single page fetch or batch write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// Network failure or timeout before a response arrived.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The service answered with an error status.
    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    /// A success response whose body could not be decoded.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl SyncError {
    /// Whether the service asked us to slow down.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SyncError::Api { status: 429, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_names_status_and_code() {
        let err = SyncError::Api {
            status: 400,
            code: "validation_error".into(),
            message: "body.children[0] should be defined".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error 400 (validation_error): body.children[0] should be defined"
        );
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn rate_limit_is_recognised() {
        let err = SyncError::Api {
            status: 429,
            code: "rate_limited".into(),
            message: "slow down".into(),
        };
        assert!(err.is_rate_limited());
        assert!(!SyncError::Transport("timed out".into()).is_rate_limited());
    }
}
