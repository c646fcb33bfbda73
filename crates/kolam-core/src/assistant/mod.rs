//! Conversational assistant domain module.
//!
//! # Module Structure
//!
//! - `duration`: ordered rules extracting a duration in minutes from text
//! - `intent`: first-match-wins intent classification
//! - `catalog`: pre-authored reply templates keyed by `ResponseKey`
//! - `synthesizer`: intent (+ duration, display name) → `ResponsePayload`
//!
//! # Usage
//!
//! ```
//! use kolam_core::assistant::{Intent, ResponseSynthesizer};
//!
//! let reply = ResponseSynthesizer::default().respond("I have 2 hours", "Meena");
//! assert_eq!(reply.intent, Intent::DurationBased);
//! assert_eq!(reply.duration, Some(120));
//! ```

pub mod catalog;
pub mod duration;
pub mod intent;
mod synthesizer;

// Re-export public API
pub use catalog::{ResponseKey, ResponseTemplate};
pub use duration::parse_duration;
pub use intent::{Intent, IntentClassifier, IntentRule, Matcher};
pub use synthesizer::{
    DEFAULT_SUGGESTION_DISPLAY_LIMIT, DurationTier, Reply, ResponsePayload, ResponseSynthesizer,
};
