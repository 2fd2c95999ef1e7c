//! Application State

use bubble_core::MarkdownOptions;

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone, Copy, Debug)]
pub struct AppState {
    /// Markdown extensions applied to non-user bubbles
    pub markdown: MarkdownOptions,

    /// Upper bound on messages per transcript request
    pub max_transcript_messages: usize,
}

impl AppState {
    pub const fn new(config: &ServerConfig) -> Self {
        Self {
            markdown: config.markdown,
            max_transcript_messages: config.max_transcript_messages,
        }
    }
}
