use thiserror::Error;

/// Main error type for the prediction service
#[derive(Error, Debug)]
pub enum CourtsideError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Upstream access errors
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("Upstream error: status={status} body={body}")]
    Upstream { status: u16, body: String },

    // Data errors
    #[error("Malformed record {game_id}: {reason}")]
    MalformedRecord { game_id: String, reason: String },

    #[error("Gave up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<CourtsideError>,
    },

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for CourtsideError
pub type Result<T> = std::result::Result<T, CourtsideError>;

impl CourtsideError {
    /// Transient failures the orchestrator is allowed to retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CourtsideError::RateLimited(_)
                | CourtsideError::Transport(_)
                | CourtsideError::Timeout { .. }
                | CourtsideError::Upstream { .. }
        )
    }

    /// Short message suitable for the dashboard error banner.
    pub fn user_message(&self) -> String {
        match self {
            CourtsideError::Unauthorized(_) => {
                "API key unauthorized. Please check your API key.".to_string()
            }
            CourtsideError::RateLimited(_) => {
                "API rate limit exceeded. Please try again later.".to_string()
            }
            CourtsideError::Transport(_) | CourtsideError::Timeout { .. } => {
                "Network error: Please check your internet connection".to_string()
            }
            CourtsideError::Upstream { status, .. } => {
                format!("API request failed with status {status}")
            }
            CourtsideError::MalformedRecord { game_id, .. } => {
                format!("Received malformed game data ({game_id})")
            }
            CourtsideError::Exhausted { attempts, last } => {
                format!(
                    "Failed to fetch predictions after {attempts} attempts. {}",
                    last.user_message()
                )
            }
            other => format!("Failed to fetch predictions: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_kinds() {
        assert!(CourtsideError::RateLimited("429".into()).is_retryable());
        assert!(CourtsideError::Transport("dns".into()).is_retryable());
        assert!(CourtsideError::Timeout { after_ms: 20_000 }.is_retryable());
        assert!(CourtsideError::Upstream {
            status: 503,
            body: "busy".into()
        }
        .is_retryable());

        assert!(!CourtsideError::Unauthorized("bad key".into()).is_retryable());
        assert!(!CourtsideError::MalformedRecord {
            game_id: "g1".into(),
            reason: "bad time".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_exhausted_message_includes_cause() {
        let err = CourtsideError::Exhausted {
            attempts: 4,
            last: Box::new(CourtsideError::RateLimited("429".into())),
        };
        let msg = err.user_message();
        assert!(msg.contains("4 attempts"));
        assert!(msg.contains("rate limit"));
    }
}
