//! Severities, output channels and the gating table.
//!
//! | Severity | Emitted when level ≥ | Channel |
//! |----------|----------------------|---------|
//! | ERROR    | always               | error   |
//! | WARN     | always               | warn    |
//! | LOG      | always               | log     |
//! | MSG      | 1                    | info    |
//! | DIAG     | 3                    | debug   |
//! | DEBUG    | 5                    | debug   |

use std::fmt;

/// Severity supplied at a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warn,
    /// Tagged informational output, never suppressed.
    Log,
    Msg,
    Diag,
    Debug,
}

impl Severity {
    pub const ALL: [Severity; 6] = [
        Severity::Error,
        Severity::Warn,
        Severity::Log,
        Severity::Msg,
        Severity::Diag,
        Severity::Debug,
    ];

    /// Minimum effective level at which this severity is emitted.
    pub const fn threshold(self) -> u8 {
        match self {
            Severity::Error | Severity::Warn | Severity::Log => 0,
            Severity::Msg => 1,
            Severity::Diag => 3,
            Severity::Debug => 5,
        }
    }

    pub const fn channel(self) -> Channel {
        match self {
            Severity::Error => Channel::Error,
            Severity::Warn => Channel::Warn,
            Severity::Log => Channel::Log,
            Severity::Msg => Channel::Info,
            Severity::Diag | Severity::Debug => Channel::Debug,
        }
    }

    /// Canonical tag.
    pub const fn tag(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Log => "LOG",
            Severity::Msg => "MSG",
            Severity::Diag => "DIAG",
            Severity::Debug => "DEBUG",
        }
    }

    /// Classify a free-form tag. Unknown tags are generic `Log` output.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|s| s.tag() == tag)
            .unwrap_or(Severity::Log)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Output channel a sink writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Error,
    Warn,
    Log,
    Info,
    Debug,
}

impl Channel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Channel::Error => "error",
            Channel::Warn => "warn",
            Channel::Log => "log",
            Channel::Info => "info",
            Channel::Debug => "debug",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a call with `severity` is emitted at `level`.
pub const fn should_emit(severity: Severity, level: u8) -> bool {
    level >= severity.threshold()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gating_table() {
        assert!(!should_emit(Severity::Debug, 4));
        assert!(should_emit(Severity::Debug, 5));
        assert!(!should_emit(Severity::Msg, 0));
        assert!(should_emit(Severity::Msg, 1));
        assert!(!should_emit(Severity::Diag, 2));
        assert!(should_emit(Severity::Diag, 3));
        assert!(should_emit(Severity::Error, 0));
        assert!(should_emit(Severity::Warn, 0));
        assert!(should_emit(Severity::Log, 0));
    }

    #[test]
    fn test_levels_above_five_emit_everything() {
        assert!(Severity::ALL.into_iter().all(|s| should_emit(s, 9)));
    }

    #[test]
    fn test_channel_map() {
        assert_eq!(Severity::Error.channel(), Channel::Error);
        assert_eq!(Severity::Warn.channel(), Channel::Warn);
        assert_eq!(Severity::Log.channel(), Channel::Log);
        assert_eq!(Severity::Msg.channel(), Channel::Info);
        assert_eq!(Severity::Diag.channel(), Channel::Debug);
        assert_eq!(Severity::Debug.channel(), Channel::Debug);
    }

    #[test]
    fn test_from_tag() {
        assert_eq!(Severity::from_tag("diag"), Severity::Diag);
        assert_eq!(Severity::from_tag(" Warn "), Severity::Warn);
        assert_eq!(Severity::from_tag("log"), Severity::Log);
        assert_eq!(Severity::from_tag("RESPONSE"), Severity::Log);
    }
}
