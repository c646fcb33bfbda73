//! Application layer for Kolam Companion.
//!
//! Coordinates the synchronous domain types from `kolam-core` into a live
//! conversation: scheduling delayed replies, cancelling them on teardown and
//! publishing view snapshots to whatever renders the conversation.

pub mod conversation;

pub use conversation::{ConversationSession, ConversationView, ScrollViewport, SubmitOutcome};
