//! UserProfile domain model.

use serde::{Deserialize, Serialize};

/// Placeholder used when no display name is configured.
pub const DEFAULT_DISPLAY_NAME: &str = "Friend";

/// User profile information supplied by the session collaborator.
///
/// The nickname is only interpolated into reply templates; it is never used
/// for authorization or storage decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// User's display nickname
    pub nickname: String,
}

impl UserProfile {
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
        }
    }

    /// The nickname, or the placeholder when it is blank.
    pub fn display_name(&self) -> &str {
        let trimmed = self.nickname.trim();
        if trimmed.is_empty() {
            DEFAULT_DISPLAY_NAME
        } else {
            trimmed
        }
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_nickname_falls_back() {
        assert_eq!(UserProfile::new("  ").display_name(), "Friend");
        assert_eq!(UserProfile::new(" Meena ").display_name(), "Meena");
        assert_eq!(UserProfile::default().display_name(), "Friend");
    }
}
