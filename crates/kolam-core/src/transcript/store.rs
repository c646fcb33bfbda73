//! Append-only conversation log.

use chrono::{DateTime, Utc};

use super::message::{Message, MessageDraft, MessageId};
use crate::assistant::ResponsePayload;

/// Ordered, append-only log of conversation messages.
///
/// Insertion order is conversation order. There is no way to edit, remove
/// or reorder a message once appended.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates a transcript seeded with a single assistant welcome message.
    pub fn with_welcome(welcome: ResponsePayload) -> Self {
        let mut transcript = Self {
            messages: Vec::new(),
        };
        transcript.append(MessageDraft::assistant(welcome));
        transcript
    }

    /// Appends a message, assigning its id and timestamp.
    pub fn append(&mut self, draft: MessageDraft) -> &Message {
        self.append_at(Utc::now(), draft)
    }

    fn append_at(&mut self, now: DateTime<Utc>, draft: MessageDraft) -> &Message {
        let id = self.next_id(now);
        self.messages.push(Message::from_draft(id, now, draft));
        let message = &self.messages[self.messages.len() - 1];
        tracing::debug!(id = %message.id(), role = %message.role(), "appended message");
        message
    }

    /// Time-based id, bumped past the previous id when the clock has not advanced.
    fn next_id(&self, now: DateTime<Utc>) -> MessageId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        match self.messages.last() {
            Some(last) if last.id().0 >= millis => MessageId(last.id().0 + 1),
            _ => MessageId(millis),
        }
    }

    /// The full ordered sequence, for rendering.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        // Ids are strictly increasing, so the log is sorted by id
        self.messages
            .binary_search_by_key(&id, Message::id)
            .ok()
            .map(|index| &self.messages[index])
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
