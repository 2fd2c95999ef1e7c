//! Chat Messages
//!
//! Display-only message model shared by the frontend and the server.
//! The caller owns message lists, ordering and persistence; the renderer
//! only reads a `Message` for the duration of one render.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Role identifier of the human participant
pub const USER_ROLE: &str = "user";

/// Role identifier conventionally used for automated replies
pub const BOT_ROLE: &str = "bot";

/// Role identifier used for transport failures shown in the transcript
pub const ERROR_ROLE: &str = "error";

/// A single chat turn as displayed in a bubble
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// Role identifier ("user" or anything else)
    pub from: String,

    /// Raw content, plain text or Markdown
    pub text: String,
}

impl Message {
    /// Create a new message
    pub fn new(from: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            text: text.into(),
        }
    }

    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(USER_ROLE, text)
    }

    /// Create a bot message
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(BOT_ROLE, text)
    }

    /// Create an error message
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(ERROR_ROLE, text)
    }

    /// True only for the exact, case-sensitive role "user"
    pub fn is_user(&self) -> bool {
        self.from == USER_ROLE
    }

    /// Parse a single message payload
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One stored exchange: what the user sent and what came back
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub message: String,
    pub response: String,
}

impl HistoryEntry {
    /// Expand into the user turn followed by the bot turn
    pub fn into_messages(self) -> [Message; 2] {
        [Message::user(self.message), Message::bot(self.response)]
    }
}

/// One conversation as listed by the chat backend's history endpoint
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatThread {
    pub chat_id: String,

    #[serde(default)]
    pub messages: Vec<Message>,
}

impl ChatThread {
    pub fn new(chat_id: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            messages: Vec::new(),
        }
    }

    /// Build a thread from stored exchanges, oldest first
    pub fn from_entries(
        chat_id: impl Into<String>,
        entries: impl IntoIterator<Item = HistoryEntry>,
    ) -> Self {
        let mut thread = Self::new(chat_id);
        for entry in entries {
            thread.messages.extend(entry.into_messages());
        }
        thread
    }

    /// Parse the history listing (a JSON array of threads)
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello");
        assert_eq!(msg.from, "user");
        assert_eq!(msg.text, "Hello");
        assert!(msg.is_user());
        assert!(!Message::bot("Hi").is_user());
    }

    #[test]
    fn test_role_match_is_exact() {
        assert!(!Message::new("User", "x").is_user());
        assert!(!Message::new(" user", "x").is_user());
        assert!(!Message::new("", "x").is_user());
    }

    #[test]
    fn test_wire_format() {
        let msg = Message::from_json(r#"{"from":"bot","text":"**hi**"}"#).unwrap();
        assert_eq!(msg, Message::bot("**hi**"));

        let json = serde_json::to_value(Message::user("a")).unwrap();
        assert_eq!(json, serde_json::json!({"from": "user", "text": "a"}));

        assert!(Message::from_json(r#"{"from":"bot"}"#).is_err());
    }

    #[test]
    fn test_thread_from_entries() {
        let thread = ChatThread::from_entries(
            "c1",
            vec![
                HistoryEntry { message: "q1".into(), response: "a1".into() },
                HistoryEntry { message: "q2".into(), response: "a2".into() },
            ],
        );

        assert_eq!(thread.len(), 4);
        assert_eq!(thread.messages[0], Message::user("q1"));
        assert_eq!(thread.messages[1], Message::bot("a1"));
        assert_eq!(thread.messages[3], Message::bot("a2"));
    }

    #[test]
    fn test_history_listing() {
        let json = r#"[
            {"chat_id": "a", "messages": [{"from": "user", "text": "hi"}, {"from": "bot", "text": "hello"}]},
            {"chat_id": "b"}
        ]"#;
        let threads = ChatThread::list_from_json(json).unwrap();

        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].chat_id, "a");
        assert_eq!(threads[0].len(), 2);
        assert!(threads[1].is_empty());
    }
}
