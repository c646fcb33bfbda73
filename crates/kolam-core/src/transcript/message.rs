//! Conversation message types.
//!
//! Messages are immutable once created. User messages never carry a
//! category or suggestions; only assistant messages built from a
//! [`ResponsePayload`] do.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter};

use crate::assistant::ResponsePayload;

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MessageRole {
    /// Message typed (or chosen as a chip) by the user.
    User,
    /// Message produced by the assistant.
    Assistant,
}

/// Category tag carried by assistant messages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MessageCategory {
    Tutorial,
    Cultural,
    Tips,
    General,
}

/// Unique, strictly increasing message identifier.
///
/// Ids are derived from the creation time in milliseconds and bumped when
/// two messages land in the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a caller hands to the transcript; id and timestamp are assigned on append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageDraft {
    User { body: String },
    Assistant(ResponsePayload),
}

impl MessageDraft {
    pub fn user(body: impl Into<String>) -> Self {
        Self::User { body: body.into() }
    }

    pub fn assistant(payload: ResponsePayload) -> Self {
        Self::Assistant(payload)
    }
}

/// A single message in the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    id: MessageId,
    role: MessageRole,
    body: String,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<MessageCategory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<String>,
}

impl Message {
    pub(crate) fn from_draft(id: MessageId, created_at: DateTime<Utc>, draft: MessageDraft) -> Self {
        match draft {
            MessageDraft::User { body } => Self {
                id,
                role: MessageRole::User,
                body,
                created_at,
                category: None,
                suggestions: Vec::new(),
            },
            MessageDraft::Assistant(payload) => Self {
                id,
                role: MessageRole::Assistant,
                body: payload.body,
                created_at,
                category: Some(payload.category),
                suggestions: payload.suggestions,
            },
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Always `None` for user messages.
    pub fn category(&self) -> Option<MessageCategory> {
        self.category
    }

    /// Full ordered suggestion list; empty for user messages.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// The prefix of suggestions a renderer shows as chips.
    pub fn displayed_suggestions(&self, limit: usize) -> &[String] {
        &self.suggestions[..self.suggestions.len().min(limit)]
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == MessageRole::Assistant
    }
}
