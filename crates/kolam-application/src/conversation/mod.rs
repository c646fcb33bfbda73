//! Conversation session module.
//!
//! - `session`: `ConversationSession`, the owner of transcript and scroll state
//! - `view`: `ConversationView` published to renderers and the `ScrollViewport` seam

mod session;
mod view;

pub use session::{ConversationSession, SubmitOutcome};
pub use view::{ConversationView, ScrollViewport};
