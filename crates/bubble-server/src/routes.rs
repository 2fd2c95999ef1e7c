//! Router

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::handlers::{health_check, render_handler, transcript_handler};
use crate::state::AppState;

/// Startup listing of what this server does and does not serve
pub const BANNER: &[&str] = &[
    "",
    "Endpoints:",
    "  GET  /health          - Health check",
    "  POST /api/render      - Render one message bubble",
    "  POST /api/transcript  - Render a transcript",
    "",
    "The chat backend (/auth/*, /chat/*) is not served here.",
    "  Build bubble-web with BUBBLE_API_BASE pointing at it,",
    "  otherwise the frontend calls this origin and every request fails.",
    "",
];

/// API routes without the static fallback
pub fn api(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/render", post(render_handler))
        .route("/api/transcript", post(transcript_handler))
        .with_state(state)
}

/// Full application: API, static frontend, CORS and request tracing
pub fn app(config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api(AppState::new(config))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
