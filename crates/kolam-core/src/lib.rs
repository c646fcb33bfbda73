//! Domain layer for Kolam Companion.
//!
//! Everything here is synchronous and deterministic: duration extraction,
//! intent classification, reply synthesis, the append-only transcript and
//! the scroll state machine. Scheduling and publication live in
//! `kolam-application`.

pub mod assistant;
pub mod config;
pub mod error;
pub mod input;
pub mod scroll;
pub mod transcript;
pub mod user;

// Re-export common error type
pub use error::{KolamError, Result};
