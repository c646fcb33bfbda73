//! What the rendering layer sees, and the seam it scrolls through.

use kolam_core::error::Result;
use kolam_core::scroll::ScrollState;
use kolam_core::transcript::Message;
use serde::Serialize;

/// Snapshot published to the rendering layer on every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationView {
    /// The full transcript, oldest first.
    pub messages: Vec<Message>,
    pub scroll_state: ScrollState,
    /// Show the "new messages below" affordance.
    pub pending_prompt: bool,
    /// An assistant reply is waiting out its thinking delay.
    pub composing: bool,
}

/// The scroll container owned by the rendering layer.
///
/// Implementations return [`KolamError::ViewportUnavailable`] when the
/// container is not mounted; the session treats that as a no-op.
///
/// [`KolamError::ViewportUnavailable`]: kolam_core::KolamError::ViewportUnavailable
pub trait ScrollViewport: Send + Sync {
    /// Moves the container to its bottom edge.
    fn scroll_to_bottom(&self) -> Result<()>;
}
