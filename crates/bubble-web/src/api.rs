//! Chat Backend Client
//!
//! Talks to the chat backend that owns authentication, history and model
//! replies. Errors come back as display strings for the transcript.

use bubble_core::{ChatThread, Message};
use serde::{Deserialize, Serialize};

/// Backend base URL fixed at build time; falls back to the page origin.
/// `bubble-server` has no `/auth` or `/chat` routes, so set this when the
/// frontend is hosted there.
const API_BASE: Option<&str> = option_env!("BUBBLE_API_BASE");

/// Authenticated session returned by the login endpoint
#[derive(Clone, Debug, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub username: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    message: &'a str,
    chat_id: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    response: String,
}

#[derive(Default, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

fn api_base() -> String {
    API_BASE.map_or_else(
        || {
            web_sys::window()
                .and_then(|w| w.location().origin().ok())
                .unwrap_or_else(|| "http://localhost:8000".into())
        },
        str::to_string,
    )
}

/// Fresh conversation identifier
pub fn new_chat_id() -> String {
    format!("chat-{}", chrono::Utc::now().timestamp_millis())
}

async fn error_detail(response: reqwest::Response, fallback: &str) -> String {
    let body: ErrorBody = response.json().await.unwrap_or_default();
    body.detail.unwrap_or_else(|| fallback.into())
}

/// Exchange credentials for an access token
pub async fn login(username: &str, password: &str) -> Result<Session, String> {
    let response = reqwest::Client::new()
        .post(format!("{}/auth/login", api_base()))
        .json(&LoginRequest { username, password })
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        Err(error_detail(response, "Login failed").await)
    }
}

/// Send a user message and return the bot's reply as a message
pub async fn send_message(token: &str, chat_id: &str, message: &str) -> Result<Message, String> {
    let response = reqwest::Client::new()
        .post(format!("{}/chat/message", api_base()))
        .bearer_auth(token)
        .json(&SendRequest { message, chat_id })
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        let data: SendResponse = response.json().await.map_err(|e| e.to_string())?;
        Ok(Message::bot(data.response))
    } else {
        Err(error_detail(response, "Request failed").await)
    }
}

/// List previous conversations
pub async fn fetch_history(token: &str) -> Result<Vec<ChatThread>, String> {
    let response = reqwest::Client::new()
        .get(format!("{}/chat/history", api_base()))
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        let text = response.text().await.map_err(|e| e.to_string())?;
        ChatThread::list_from_json(&text).map_err(|e| e.to_string())
    } else {
        Err(error_detail(response, "Failed to load history").await)
    }
}
