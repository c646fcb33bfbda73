//! Scroll synchronization for the live transcript.
//!
//! A two-state machine deciding whether the view should stick to the newest
//! message. A user who scrolls away from the bottom detaches the view, but
//! the next appended message always pulls it back.

use serde::{Deserialize, Serialize};

/// Distance from the bottom (in layout units) still considered "at the bottom".
pub const DEFAULT_FOLLOW_THRESHOLD: f64 = 50.0;

/// Whether the view tracks new content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollState {
    /// Auto-follow: the view stays pinned to the latest message.
    #[default]
    Following,
    /// The user scrolled away; a "new messages below" prompt is shown.
    Detached,
}

impl ScrollState {
    pub fn auto_follow(self) -> bool {
        self == Self::Following
    }

    /// True iff detached; the only signal for the jump-to-latest affordance.
    pub fn pending_prompt(self) -> bool {
        self == Self::Detached
    }
}

/// Geometry of the scroll container at the time of a user gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    pub total_height: f64,
    pub scroll_top: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn new(total_height: f64, scroll_top: f64, viewport_height: f64) -> Self {
        Self {
            total_height,
            scroll_top,
            viewport_height,
        }
    }

    pub fn distance_from_bottom(&self) -> f64 {
        self.total_height - self.scroll_top - self.viewport_height
    }
}

/// What the view should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirective {
    /// Leave the viewport where it is.
    Stay,
    /// Move the viewport to the bottom (smoothly, if the renderer can).
    ScrollToBottom,
}

/// The scroll state machine.
#[derive(Debug, Clone)]
pub struct ScrollSynchronizer {
    state: ScrollState,
    threshold: f64,
}

impl ScrollSynchronizer {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: ScrollState::Following,
            threshold,
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn auto_follow(&self) -> bool {
        self.state.auto_follow()
    }

    pub fn pending_prompt(&self) -> bool {
        self.state.pending_prompt()
    }

    /// The user scrolled. Never moves the viewport; the user is driving.
    pub fn on_user_scroll(&mut self, metrics: ScrollMetrics) -> ScrollDirective {
        let distance = metrics.distance_from_bottom();
        let next = if distance > self.threshold {
            ScrollState::Detached
        } else {
            ScrollState::Following
        };
        self.transition(next, "user scroll");
        ScrollDirective::Stay
    }

    /// A message was appended. Always re-attaches, whatever the prior state.
    pub fn on_content_appended(&mut self) -> ScrollDirective {
        self.transition(ScrollState::Following, "content appended");
        ScrollDirective::ScrollToBottom
    }

    /// The user asked to jump to the newest message.
    pub fn on_jump_to_latest(&mut self) -> ScrollDirective {
        self.transition(ScrollState::Following, "jump to latest");
        ScrollDirective::ScrollToBottom
    }

    /// Content height changed without a new message (e.g. composing indicator).
    pub fn on_layout_changed(&self) -> ScrollDirective {
        if self.auto_follow() {
            ScrollDirective::ScrollToBottom
        } else {
            ScrollDirective::Stay
        }
    }

    fn transition(&mut self, next: ScrollState, cause: &'static str) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, cause, "scroll state changed");
            self.state = next;
        }
    }
}

impl Default for ScrollSynchronizer {
    fn default() -> Self {
        Self::new(DEFAULT_FOLLOW_THRESHOLD)
    }
}
