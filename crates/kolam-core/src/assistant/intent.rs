//! Rule-ordered intent classification.
//!
//! The classifier is an ordered list of matcher → intent pairs. The first
//! rule whose matcher accepts the utterance decides the intent; if none
//! does, the result is [`Intent::General`]. Keyword matchers use plain
//! case-insensitive substring containment, so a word that merely contains
//! a keyword (e.g. "shard" contains "hard") still counts as a hit.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

/// What the user is asking for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// The user mentioned how much time they have.
    DurationBased,
    /// Origins, meaning and cultural context of kolam.
    History,
    /// Wants to learn or start a pattern.
    PatternLearning,
    /// Frustrated, made a mistake, finds it difficult.
    Encouragement,
    /// Wants practical drawing technique.
    TechniqueTips,
    /// Anything else.
    General,
}

pub const HISTORY_KEYWORDS: &[&str] = &[
    "history",
    "origin",
    "tradition",
    "culture",
    "cultural",
    "meaning",
    "significance",
    "ancient",
    "festival",
    "pongal",
    "why do people",
];

pub const PATTERN_LEARNING_KEYWORDS: &[&str] = &[
    "learn",
    "teach",
    "pattern",
    "design",
    "tutorial",
    "beginner",
    "how to",
    "how do i",
    "start",
    "draw",
];

pub const ENCOURAGEMENT_KEYWORDS: &[&str] = &[
    "mistake",
    "wrong",
    "difficult",
    "hard",
    "frustrat",
    "give up",
    "can't",
    "cannot",
    "struggl",
    "messy",
    "ugly",
    "failed",
];

pub const TECHNIQUE_KEYWORDS: &[&str] = &[
    "tip",
    "technique",
    "improve",
    "better",
    "advice",
    "trick",
    "straight",
    "smooth",
    "symmetr",
    "practice",
    "powder",
];

/// Decides whether a rule applies to an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Accepts when a positive duration was extracted.
    DurationPresent,
    /// Accepts when the lowercased utterance contains any keyword.
    Keywords(&'static [&'static str]),
}

impl Matcher {
    /// `lowered` must already be lowercase.
    fn accepts(&self, lowered: &str, duration: Option<u32>) -> bool {
        match self {
            Matcher::DurationPresent => duration.is_some_and(|minutes| minutes > 0),
            Matcher::Keywords(keywords) => keywords.iter().any(|kw| lowered.contains(kw)),
        }
    }
}

/// One entry of the ordered rule list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentRule {
    pub matcher: Matcher,
    pub intent: Intent,
}

impl IntentRule {
    pub const fn new(matcher: Matcher, intent: Intent) -> Self {
        Self { matcher, intent }
    }
}

/// First-match-wins classifier over an ordered rule list.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl IntentClassifier {
    /// Builds a classifier from an explicit rule order.
    pub fn with_rules(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }

    /// Classifies `text` given the duration extracted from it.
    ///
    /// Always returns exactly one intent; [`Intent::General`] when no rule matches.
    pub fn classify(&self, text: &str, duration: Option<u32>) -> Intent {
        let lowered = text.to_lowercase();
        let intent = self
            .rules
            .iter()
            .find(|rule| rule.matcher.accepts(&lowered, duration))
            .map_or(Intent::General, |rule| rule.intent);
        tracing::debug!(%intent, ?duration, "classified utterance");
        intent
    }
}

impl Default for IntentClassifier {
    /// The standard priority order: duration, history, pattern learning,
    /// encouragement, technique tips.
    fn default() -> Self {
        Self::with_rules(vec![
            IntentRule::new(Matcher::DurationPresent, Intent::DurationBased),
            IntentRule::new(Matcher::Keywords(HISTORY_KEYWORDS), Intent::History),
            IntentRule::new(
                Matcher::Keywords(PATTERN_LEARNING_KEYWORDS),
                Intent::PatternLearning,
            ),
            IntentRule::new(
                Matcher::Keywords(ENCOURAGEMENT_KEYWORDS),
                Intent::Encouragement,
            ),
            IntentRule::new(Matcher::Keywords(TECHNIQUE_KEYWORDS), Intent::TechniqueTips),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::duration::parse_duration;

    fn classify(text: &str) -> Intent {
        IntentClassifier::default().classify(text, parse_duration(text))
    }

    #[test]
    fn test_duration_short_circuits_keywords() {
        assert_eq!(
            classify("I have 15 minutes, tell me the history"),
            Intent::DurationBased
        );
        assert_eq!(classify("I have 1 hour to learn a pattern"), Intent::DurationBased);
    }

    #[test]
    fn test_zero_duration_is_not_duration_based() {
        assert_eq!(
            IntentClassifier::default().classify("tell me the history", Some(0)),
            Intent::History
        );
    }

    #[test]
    fn test_history() {
        assert_eq!(classify("what is the history of this art"), Intent::History);
        assert_eq!(classify("Why is it drawn during PONGAL?"), Intent::History);
    }

    #[test]
    fn test_pattern_learning() {
        assert_eq!(classify("Can you teach me a new design?"), Intent::PatternLearning);
        assert_eq!(classify("how do I begin"), Intent::PatternLearning);
    }

    #[test]
    fn test_encouragement() {
        assert_eq!(classify("my lines are so messy"), Intent::Encouragement);
        assert_eq!(classify("I made a mistake again"), Intent::Encouragement);
    }

    #[test]
    fn test_technique_tips() {
        assert_eq!(classify("any tips for smoother curves?"), Intent::TechniqueTips);
    }

    #[test]
    fn test_general_fallback() {
        assert_eq!(classify("hello there"), Intent::General);
        assert_eq!(classify(""), Intent::General);
    }

    #[test]
    fn test_priority_between_keyword_sets() {
        // History outranks pattern learning
        assert_eq!(classify("the origin of this pattern"), Intent::History);
        // Pattern learning outranks encouragement
        assert_eq!(classify("learning is hard"), Intent::PatternLearning);
        // Encouragement outranks technique tips
        assert_eq!(classify("any tips? my lines look wrong"), Intent::Encouragement);
    }

    #[test]
    fn test_substring_false_positive_is_preserved() {
        // "shard" contains "hard"; kept literal on purpose
        assert_eq!(classify("a shard of chalk"), Intent::Encouragement);
    }

    #[test]
    fn test_custom_rule_order() {
        let classifier = IntentClassifier::with_rules(vec![
            IntentRule::new(Matcher::Keywords(TECHNIQUE_KEYWORDS), Intent::TechniqueTips),
            IntentRule::new(Matcher::Keywords(HISTORY_KEYWORDS), Intent::History),
        ]);
        assert_eq!(
            classifier.classify("tips on the history", None),
            Intent::TechniqueTips
        );
        assert_eq!(classifier.classify("15 minutes", Some(15)), Intent::General);
    }

    #[test]
    fn test_intent_names() {
        assert_eq!(Intent::DurationBased.to_string(), "DURATION_BASED");
        assert_eq!(Intent::TechniqueTips.as_ref(), "TECHNIQUE_TIPS");
    }
}
