//! Duration extraction from free-form utterances.
//!
//! Rules are evaluated in a fixed order and the first rule whose pattern
//! matches decides the result. Later rules are never consulted once an
//! earlier one hits, so "a quick 2 hour session" yields 120, not 15.

use regex::Regex;
use std::num::IntErrorKind;
use std::sync::OnceLock;

/// Minutes in a full practice day.
pub const WHOLE_DAY_MINUTES: u32 = 480;

/// How a matching rule turns into minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationValue {
    /// The first capture group holds a count, multiplied by `per_unit`.
    Captured { per_unit: u32 },
    /// The rule always yields this many minutes.
    Fixed(u32),
}

/// A single extraction rule: a case-insensitive pattern and its value.
#[derive(Debug)]
pub struct DurationRule {
    /// Short name used in logs
    pub name: &'static str,
    pattern: Regex,
    /// Value produced on match
    pub value: DurationValue,
}

impl DurationRule {
    fn new(name: &'static str, pattern: &str, value: DurationValue) -> Self {
        // Patterns are compile-time constants; a failure here is a programming error
        let pattern = Regex::new(&format!("(?i){pattern}"))
            .unwrap_or_else(|e| panic!("invalid duration rule '{name}': {e}"));
        Self {
            name,
            pattern,
            value,
        }
    }

    /// Applies this rule to `text`, returning minutes if it matches.
    pub fn apply(&self, text: &str) -> Option<u32> {
        match self.value {
            DurationValue::Fixed(minutes) => self.pattern.is_match(text).then_some(minutes),
            DurationValue::Captured { per_unit } => {
                let captures = self.pattern.captures(text)?;
                let digits = captures.get(1)?.as_str();
                let count = match digits.parse::<u32>() {
                    Ok(count) => count,
                    // Oversized digit runs saturate instead of failing the rule
                    Err(e) if *e.kind() == IntErrorKind::PosOverflow => u32::MAX,
                    Err(_) => return None,
                };
                Some(count.saturating_mul(per_unit))
            }
        }
    }
}

static DURATION_RULES: OnceLock<Vec<DurationRule>> = OnceLock::new();

/// Returns the ordered extraction rules, compiled on first access.
pub fn duration_rules() -> &'static [DurationRule] {
    DURATION_RULES.get_or_init(|| {
        vec![
            DurationRule::new(
                "minutes",
                r"([0-9]+)\s*minutes?",
                DurationValue::Captured { per_unit: 1 },
            ),
            DurationRule::new(
                "hours",
                r"([0-9]+)\s*hours?",
                DurationValue::Captured { per_unit: 60 },
            ),
            DurationRule::new(
                "half-hour",
                r"half\s*(?:an\s*)?hour|30\s*min",
                DurationValue::Fixed(30),
            ),
            DurationRule::new(
                "quarter-hour",
                r"quarter\s*(?:of\s*an\s*)?hour|15\s*min",
                DurationValue::Fixed(15),
            ),
            DurationRule::new(
                "whole-day",
                r"(?:whole|entire|all)\s*(?:the\s*)?day",
                DurationValue::Fixed(WHOLE_DAY_MINUTES),
            ),
            DurationRule::new("brief", r"quick|fast|short", DurationValue::Fixed(15)),
            DurationRule::new(
                "ample",
                r"long|extended|plenty\s+of\s+time",
                DurationValue::Fixed(120),
            ),
        ]
    })
}

/// Extracts a duration in minutes from `text`.
///
/// Returns `None` when no rule matches. Never panics, for any input.
pub fn parse_duration(text: &str) -> Option<u32> {
    duration_rules().iter().find_map(|rule| {
        let minutes = rule.apply(text)?;
        tracing::debug!(rule = rule.name, minutes, "duration rule matched");
        Some(minutes)
    })
}
