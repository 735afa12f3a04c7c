//! Conversation and messaging types

use crate::http::QueryParams;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A conversation thread between the user and one coach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique identifier for the conversation
    pub id: String,

    /// Coach on the other side
    pub coach_id: String,

    /// Optional thread title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Most recent message, for list previews
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<ChatMessage>,

    /// Messages the user has not read yet
    #[serde(default)]
    pub unread_count: u32,

    /// Last activity
    pub updated_at: DateTime<Utc>,
}

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The signed-in user
    User,
    /// The coach
    Coach,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique identifier for the message
    pub id: String,

    /// Conversation this message belongs to
    pub conversation_id: String,

    /// Author
    pub sender: Sender,

    /// Message text
    pub text: String,

    /// Server timestamp
    pub sent_at: DateTime<Utc>,
}

/// A message to send.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMessage {
    /// Message text
    pub text: String,
}

impl NewMessage {
    /// Create a message with `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Cursor pagination for message history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Return messages older than this message ID
    pub before: Option<String>,
    /// Maximum number of messages
    pub limit: Option<u32>,
}

impl Page {
    /// The newest page, server-chosen size.
    pub fn latest() -> Self {
        Self::default()
    }

    /// Messages older than `message_id`.
    pub fn before(mut self, message_id: impl Into<String>) -> Self {
        self.before = Some(message_id.into());
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string form of this cursor.
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("before", self.before.as_deref())
            .push_opt("limit", self.limit)
    }
}
