//! Error types for Kolam Companion.

use thiserror::Error;

/// A shared error type for the entire Kolam Companion workspace.
///
/// The conversational core is almost entirely total: unmatched input falls
/// through to a general reply and empty input is ignored rather than
/// rejected. The variants below cover the remaining edges (a closed session,
/// a missing viewport, configuration I/O).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KolamError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The conversation session has been torn down
    #[error("Conversation session is closed")]
    SessionClosed,

    /// No scroll container is available to act on
    #[error("Scroll viewport unavailable")]
    ViewportUnavailable,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KolamError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error means the session is gone
    pub fn is_session_closed(&self) -> bool {
        matches!(self, Self::SessionClosed)
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for KolamError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<toml::de::Error> for KolamError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for KolamError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, KolamError>`.
pub type Result<T> = std::result::Result<T, KolamError>;
