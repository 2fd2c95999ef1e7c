//! HTTP Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use bubble_core::{Alignment, Bubble, BubbleVariant, Message, render_transcript};

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub variant: BubbleVariant,
    pub alignment: Alignment,
    pub html: String,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub html: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn rejected(rejection: &JsonRejection) -> ApiError {
    tracing::warn!("Rejected request body: {}", rejection.body_text());
    (
        rejection.status(),
        Json(ErrorResponse {
            error: rejection.body_text(),
            code: "INVALID_PAYLOAD".into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Render one message to bubble markup
pub async fn render_handler(
    State(state): State<AppState>,
    payload: Result<Json<Message>, JsonRejection>,
) -> Result<Json<RenderResponse>, ApiError> {
    let Json(message) = payload.map_err(|e| rejected(&e))?;
    let bubble = Bubble::render(&message, &state.markdown);

    Ok(Json(RenderResponse {
        variant: bubble.variant,
        alignment: bubble.alignment(),
        html: bubble.to_html(),
    }))
}

/// Render a whole transcript, preserving message order
pub async fn transcript_handler(
    State(state): State<AppState>,
    payload: Result<Json<TranscriptRequest>, JsonRejection>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| rejected(&e))?;

    let count = request.messages.len();
    if count > state.max_transcript_messages {
        tracing::warn!(count, max = state.max_transcript_messages, "Transcript too large");
        return Err((
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ErrorResponse {
                error: format!(
                    "Transcript has {count} messages (max: {})",
                    state.max_transcript_messages
                ),
                code: "TRANSCRIPT_TOO_LARGE".into(),
            }),
        ));
    }

    Ok(Json(TranscriptResponse {
        html: render_transcript(&request.messages, &state.markdown),
        count,
    }))
}
