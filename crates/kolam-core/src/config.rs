//! Configuration model for Kolam Companion.
//!
//! Mirrors `~/.config/kolam/config.toml`. Every section and field is
//! optional; anything missing takes its default.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::assistant::DEFAULT_SUGGESTION_DISPLAY_LIMIT;
use crate::error::Result;
use crate::scroll::DEFAULT_FOLLOW_THRESHOLD;
use crate::user::UserProfile;

/// Artificial "thinking" delay before an assistant reply is appended.
pub const DEFAULT_THINKING_DELAY_MS: u64 = 1500;

/// Root configuration structure for config.toml
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct RootConfig {
    pub user_profile: UserProfile,
    pub assistant: AssistantSettings,
    pub scroll: ScrollSettings,
}

impl RootConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes to a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AssistantSettings {
    pub thinking_delay_ms: u64,
    pub suggestion_display_limit: usize,
}

impl AssistantSettings {
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            thinking_delay_ms: DEFAULT_THINKING_DELAY_MS,
            suggestion_display_limit: DEFAULT_SUGGESTION_DISPLAY_LIMIT,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScrollSettings {
    pub follow_threshold: f64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            follow_threshold: DEFAULT_FOLLOW_THRESHOLD,
        }
    }
}
