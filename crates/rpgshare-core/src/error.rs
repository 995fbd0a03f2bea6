//! Error types for each pipeline stage.
//!
//! None of these are fatal: the monitor turns each into a skip outcome and
//! moves on to the next line. Cooldown rejection is deliberately absent here;
//! it is an outcome, not an error.

use thiserror::Error;

/// Longest payload excerpt kept in a [`DecodeError`].
pub const EXCERPT_MAX_CHARS: usize = 120;

/// The text after the marker could not be decoded as a share payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed share payload ({reason}): {excerpt}")]
pub struct DecodeError {
    /// Offending payload, truncated to [`EXCERPT_MAX_CHARS`] characters.
    pub excerpt: String,
    pub reason: String,
}

impl DecodeError {
    pub fn new(payload: &str, reason: impl Into<String>) -> Self {
        Self {
            excerpt: excerpt(payload),
            reason: reason.into(),
        }
    }
}

/// A well-formed payload that is missing a field or carries an out-of-range
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field `{field}`")]
    Missing { field: &'static str },
    #[error("invalid field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing { field } | ValidationError::Invalid { field, .. } => field,
        }
    }
}

/// Raised by a consumer. Logged and isolated by the dispatcher.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HandlerError {
    pub fn msg(message: impl Into<String>) -> Self {
        HandlerError::Message(message.into())
    }
}

/// Configuration that loaded but cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("invalid config value `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

fn excerpt(payload: &str) -> String {
    match payload.char_indices().nth(EXCERPT_MAX_CHARS) {
        Some((idx, _)) => format!("{}…", &payload[..idx]),
        None => payload.to_string(),
    }
}
