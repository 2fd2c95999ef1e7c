//! Server Configuration
//!
//! Read from the process environment, falling back to `.env`:
//!
//! | Variable                  | Default        |
//! |---------------------------|----------------|
//! | `RUST_LOG`                | `info,tower_http=debug` |
//! | `BIND_ADDR`               | `0.0.0.0:3000` |
//! | `STATIC_DIR`              | `static`       |
//! | `MARKDOWN_EXTENSIONS`     | `gfm`          |
//! | `MAX_TRANSCRIPT_MESSAGES` | `500`          |

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use bubble_core::MarkdownOptions;

use crate::error::{Result, ServerError};

const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_MAX_TRANSCRIPT: usize = 500;
const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Process environment layered over the nearest `.env` file.
///
/// Both logging and [`ServerConfig`] read through this, so a variable set
/// only in `.env` (including `RUST_LOG`) always takes effect.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    process: HashMap<String, String>,
    dotenv: HashMap<String, String>,
}

impl Environment {
    pub fn load() -> Self {
        let dotenv = dotenvy::dotenv_iter()
            .map(|iter| iter.filter_map(std::result::Result::ok).collect())
            .unwrap_or_default();

        Self {
            process: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
            dotenv,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.process
            .get(key)
            .or_else(|| self.dotenv.get(key))
            .cloned()
    }

    /// `tracing-subscriber` filter directive
    pub fn log_filter(&self) -> String {
        self.get("RUST_LOG")
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.into())
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub markdown: MarkdownOptions,
    pub max_transcript_messages: usize,
}

impl ServerConfig {
    pub fn from_env(env: &Environment) -> Result<Self> {
        Self::from_lookup(|key| env.get(key))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr
                .trim()
                .parse::<SocketAddr>()
                .map_err(|e| ServerError::Config(format!("BIND_ADDR: {e}")))?;
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(list) = lookup("MARKDOWN_EXTENSIONS") {
            config.markdown = MarkdownOptions::from_extension_list(&list)?;
        }
        if let Some(raw) = lookup("MAX_TRANSCRIPT_MESSAGES") {
            config.max_transcript_messages = raw
                .trim()
                .parse::<usize>()
                .map_err(|e| ServerError::Config(format!("MAX_TRANSCRIPT_MESSAGES: {e}")))?;
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            markdown: MarkdownOptions::gfm(),
            max_transcript_messages: DEFAULT_MAX_TRANSCRIPT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.markdown, MarkdownOptions::gfm());
        assert_eq!(config.max_transcript_messages, 500);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("STATIC_DIR", "dist"),
            ("MARKDOWN_EXTENSIONS", "tables"),
            ("MAX_TRANSCRIPT_MESSAGES", "10"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.static_dir, PathBuf::from("dist"));
        assert!(config.markdown.tables);
        assert!(!config.markdown.strikethrough);
        assert_eq!(config.max_transcript_messages, 10);
    }

    #[test]
    fn test_dotenv_applies_to_logging_and_config() {
        let path = std::env::temp_dir().join(format!("bubble-server-{}.env", std::process::id()));
        std::fs::write(&path, "RUST_LOG=bubble_server=trace\nBIND_ADDR=127.0.0.1:9999\n").unwrap();
        let dotenv = dotenvy::from_path_iter(&path)
            .unwrap()
            .map(std::result::Result::unwrap)
            .collect();
        std::fs::remove_file(&path).unwrap();

        let env = Environment { process: HashMap::new(), dotenv };
        assert_eq!(env.log_filter(), "bubble_server=trace");
        assert_eq!(ServerConfig::from_env(&env).unwrap().bind_addr.port(), 9999);

        let mut process = HashMap::new();
        process.insert("RUST_LOG".to_string(), "warn".to_string());
        let env = Environment { process, ..env };
        assert_eq!(env.log_filter(), "warn");

        assert_eq!(Environment::default().log_filter(), "info,tower_http=debug");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("BIND_ADDR", "nowhere")]),
            Err(ServerError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("MARKDOWN_EXTENSIONS", "emoji")]),
            Err(ServerError::Bubble(_))
        ));
        assert!(config_from(&[("MAX_TRANSCRIPT_MESSAGES", "-1")]).is_err());
    }
}
