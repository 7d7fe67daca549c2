//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check alias lists are usable
//! - Validate the override level range and expiration format
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggerSettings → Result<(), Vec<ValidationError>>
//! - An expired override is not an error; it is reported when applied

use thiserror::Error;

use crate::config::schema::LoggerSettings;
use crate::level::parse_timestamp;

/// Highest meaningful level.
pub const MAX_LEVEL: u8 = 5;

/// A single semantic problem in the settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("signals.{0} must list at least one name")]
    EmptyAliases(&'static str),

    #[error("signals.{0} contains an empty name")]
    BlankAlias(&'static str),

    #[error("signals.runtime_mode must not be empty")]
    EmptyRuntimeMode,

    #[error("override.level {0} is out of range (0-5)")]
    LevelOutOfRange(u8),

    #[error("override.expires is not a valid timestamp: {0}")]
    InvalidExpiration(String),

    #[error("redaction.keys contains an empty key")]
    BlankRedactionKey,
}

/// Validate `settings`, collecting every problem found.
pub fn validate_settings(settings: &LoggerSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (field, aliases) in [
        ("environment", &settings.signals.environment),
        ("level", &settings.signals.level),
    ] {
        if aliases.is_empty() {
            errors.push(ValidationError::EmptyAliases(field));
        } else if aliases.iter().any(|a| a.trim().is_empty()) {
            errors.push(ValidationError::BlankAlias(field));
        }
    }

    if settings.signals.runtime_mode.trim().is_empty() {
        errors.push(ValidationError::EmptyRuntimeMode);
    }

    if let Some(level_override) = &settings.level_override {
        if level_override.level > MAX_LEVEL {
            errors.push(ValidationError::LevelOutOfRange(level_override.level));
        }
        if let Some(expires) = &level_override.expires {
            if let Err(e) = parse_timestamp(expires) {
                errors.push(ValidationError::InvalidExpiration(e.input));
            }
        }
    }

    if settings.redaction.keys.iter().any(|k| k.trim().is_empty()) {
        errors.push(ValidationError::BlankRedactionKey);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
