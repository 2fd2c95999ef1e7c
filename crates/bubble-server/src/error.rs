//! Error Types

use thiserror::Error;

/// Result type alias for server startup
pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    /// Missing or malformed environment setting
    #[error("Configuration error: {0}")]
    Config(String),

    /// Renderer rejected its configuration
    #[error(transparent)]
    Bubble(#[from] bubble_core::BubbleError),
}
