//! Transcript domain module.
//!
//! - `message`: message types (`Message`, `MessageRole`, `MessageCategory`)
//! - `store`: the append-only `Transcript`

mod message;
mod store;

// Re-export public API
pub use message::{Message, MessageCategory, MessageDraft, MessageId, MessageRole};
pub use store::Transcript;
