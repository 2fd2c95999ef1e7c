//! Error Types

use thiserror::Error;

/// Result type alias for bubble operations
pub type Result<T> = std::result::Result<T, BubbleError>;

/// Errors raised at the edges of the renderer.
///
/// Rendering itself never fails; these cover payload parsing and
/// configuration only.
#[derive(Error, Debug)]
pub enum BubbleError {
    /// Malformed message or history payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid renderer configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BubbleError {
    /// Stable machine-readable code for API responses
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Json(_) => "INVALID_PAYLOAD",
            Self::Config(_) => "INVALID_CONFIG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = BubbleError::Config("bad".into());
        assert_eq!(err.code(), "INVALID_CONFIG");
        assert_eq!(err.to_string(), "Configuration error: bad");

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(BubbleError::from(json_err).code(), "INVALID_PAYLOAD");
    }
}
