//! bubblechat HTTP Server
//!
//! Axum-based server hosting the WASM frontend and a rendering API that
//! turns chat messages into bubble markup.

mod config;
mod error;
mod handlers;
mod routes;
mod state;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Environment, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment (.env included) before anything reads it
    let env = Environment::load();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env.log_filter()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env(&env)?;
    tracing::info!(markdown = ?config.markdown, "Markdown extensions");

    if !config.static_dir.is_dir() {
        tracing::warn!("⚠ Static directory {} not found - frontend disabled", config.static_dir.display());
        tracing::warn!("  Build bubble-web and set STATIC_DIR to its output");
    }

    let app = routes::app(&config);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 bubblechat server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    for line in routes::BANNER {
        tracing::info!("{}", line);
    }

    axum::serve(listener, app).await?;

    Ok(())
}
