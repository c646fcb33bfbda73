//! Maps a classified intent to a concrete reply.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::catalog::{ResponseKey, template};
use super::duration::parse_duration;
use super::intent::{Intent, IntentClassifier};
use crate::transcript::MessageCategory;

/// Number of suggestions a renderer shows as chips unless configured otherwise.
pub const DEFAULT_SUGGESTION_DISPLAY_LIMIT: usize = 3;

/// Duration band used to choose a duration-based reply.
///
/// Bands are inclusive on the lower tier: 20 is quick, 21 is standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DurationTier {
    /// Up to 20 minutes
    Quick,
    /// 21 to 60 minutes
    Standard,
    /// 61 to 120 minutes
    Advanced,
    /// More than 120 minutes
    FullImmersion,
}

impl DurationTier {
    pub fn from_minutes(minutes: u32) -> Self {
        match minutes {
            0..=20 => Self::Quick,
            21..=60 => Self::Standard,
            61..=120 => Self::Advanced,
            _ => Self::FullImmersion,
        }
    }

    pub fn response_key(self) -> ResponseKey {
        match self {
            Self::Quick => ResponseKey::QuickPattern,
            Self::Standard => ResponseKey::StandardPattern,
            Self::Advanced => ResponseKey::AdvancedPattern,
            Self::FullImmersion => ResponseKey::FullImmersion,
        }
    }
}

/// The content of an assistant reply, before it becomes a transcript message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePayload {
    /// Markdown body with placeholders already filled in
    pub body: String,
    pub category: MessageCategory,
    /// Full ordered suggestion list (at most five)
    pub suggestions: Vec<String>,
}

impl ResponsePayload {
    /// The prefix of suggestions to show as chips.
    pub fn displayed_suggestions(&self, limit: usize) -> &[String] {
        &self.suggestions[..self.suggestions.len().min(limit)]
    }
}

/// Outcome of running the whole pipeline on one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub duration: Option<u32>,
    pub intent: Intent,
    pub payload: ResponsePayload,
}

/// Turns utterances into replies.
///
/// Holds no conversation state; the same inputs always produce the same payload.
#[derive(Debug, Clone, Default)]
pub struct ResponseSynthesizer {
    classifier: IntentClassifier,
}

impl ResponseSynthesizer {
    pub fn new(classifier: IntentClassifier) -> Self {
        Self { classifier }
    }

    /// Chooses the catalog entry for an intent.
    ///
    /// A duration-based intent without a duration falls into the quick tier.
    pub fn response_key(intent: Intent, duration: Option<u32>) -> ResponseKey {
        match intent {
            Intent::DurationBased => {
                DurationTier::from_minutes(duration.unwrap_or(0)).response_key()
            }
            Intent::History => ResponseKey::History,
            Intent::PatternLearning => ResponseKey::PatternLearning,
            Intent::Encouragement => ResponseKey::Encouragement,
            Intent::TechniqueTips => ResponseKey::TechniqueTips,
            Intent::General => ResponseKey::General,
        }
    }

    /// Builds the reply payload for an already classified intent.
    pub fn synthesize(
        &self,
        intent: Intent,
        duration: Option<u32>,
        display_name: &str,
    ) -> ResponsePayload {
        render(
            Self::response_key(intent, duration),
            duration.unwrap_or(0),
            display_name,
        )
    }

    /// Runs extraction, classification and synthesis on raw text.
    pub fn respond(&self, text: &str, display_name: &str) -> Reply {
        let duration = parse_duration(text);
        let intent = self.classifier.classify(text, duration);
        let payload = self.synthesize(intent, duration, display_name);
        Reply {
            duration,
            intent,
            payload,
        }
    }

    /// The greeting that seeds every new transcript.
    pub fn welcome(&self, display_name: &str) -> ResponsePayload {
        render(ResponseKey::Welcome, 0, display_name)
    }
}

fn render(key: ResponseKey, minutes: u32, display_name: &str) -> ResponsePayload {
    let tpl = template(key);
    let body = tpl
        .body
        .replace("{minutes}", &minutes.to_string())
        .replace("{name}", display_name);
    ResponsePayload {
        body,
        category: tpl.category,
        suggestions: tpl.suggestions.iter().map(|s| s.to_string()).collect(),
    }
}
