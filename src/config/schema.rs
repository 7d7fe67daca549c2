//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML settings
//! file. Every section has defaults so an empty file is valid.

use serde::{Deserialize, Serialize};

use crate::environment::SignalNames;
use crate::sink::Redactor;

/// Root logger settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct LoggerSettings {
    /// Names of the environment, level and runtime mode signals.
    pub signals: SignalNames,

    /// Reject reconfiguration after the level is first established.
    /// Unset: enabled iff the runtime mode signal says "production".
    pub finalize_after_first: Option<bool>,

    /// Temporary level override applied at construction.
    #[serde(rename = "override")]
    pub level_override: Option<OverrideSettings>,

    /// Payload redaction.
    pub redaction: RedactionSettings,

    /// Where permitted records are written.
    pub sink: SinkKind,
}

/// A time-bounded level override.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct OverrideSettings {
    /// Requested level (0-5).
    pub level: u8,

    /// Expiration timestamp (RFC 3339 or `YYYY-MM-DD HH:MM:SS`, UTC).
    #[serde(default)]
    pub expires: Option<String>,
}

/// Redaction configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RedactionSettings {
    /// Disable redaction entirely.
    pub enabled: bool,

    /// Sensitive key names, matched case-insensitively by suffix.
    pub keys: Vec<String>,
}

impl RedactionSettings {
    pub fn redactor(&self) -> Redactor {
        if self.enabled {
            Redactor::new(&self.keys)
        } else {
            Redactor::disabled()
        }
    }
}

impl Default for RedactionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            keys: Redactor::default_keys()
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

/// Sink selection.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// stdout / stderr lines.
    #[default]
    Console,
    /// `tracing` events.
    Tracing,
}
