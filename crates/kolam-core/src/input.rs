//! User input gating.
//!
//! Decides whether a key press submits the composer and normalizes text
//! before it enters the pipeline.

/// Keys the composer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

/// A key press together with the Shift modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn enter() -> Self {
        Self {
            key: Key::Enter,
            shift: false,
        }
    }

    pub fn shift_enter() -> Self {
        Self {
            key: Key::Enter,
            shift: true,
        }
    }

    /// Enter submits; Shift+Enter is reserved for a line break.
    pub fn submits(&self) -> bool {
        self.key == Key::Enter && !self.shift
    }
}

/// Returns the trimmed utterance, or `None` for empty or whitespace-only input.
pub fn normalize_utterance(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_submits() {
        assert!(KeyPress::enter().submits());
        assert!(!KeyPress::shift_enter().submits());
        assert!(
            !KeyPress {
                key: Key::Other,
                shift: false
            }
            .submits()
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_utterance("  I have 1 hour \n"), Some("I have 1 hour"));
        assert_eq!(normalize_utterance(""), None);
        assert_eq!(normalize_utterance(" \t\n "), None);
    }
}
