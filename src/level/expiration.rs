//! Override expiration input and timestamp parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

/// Error returned when an expiration timestamp cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid expiration timestamp: {input} (expected RFC 3339 or YYYY-MM-DD HH:MM:SS)")]
pub struct ExpirationParseError {
    pub input: String,
}

/// Expiration supplied alongside a level override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Expiration {
    /// No expiration; the override holds until reconfigured.
    #[default]
    None,
    /// Absolute instant after which the override lapses.
    At(DateTime<Utc>),
    /// Text that did not parse as a timestamp.
    Invalid(String),
}

impl Expiration {
    /// Parse `text` into an expiration. Blank text means no expiration.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Expiration::None;
        }
        match parse_timestamp(text) {
            Ok(at) => Expiration::At(at),
            Err(e) => Expiration::Invalid(e.input),
        }
    }

    /// The parsed instant, if any.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Expiration::At(at) => Some(*at),
            _ => None,
        }
    }
}

impl From<DateTime<Utc>> for Expiration {
    fn from(at: DateTime<Utc>) -> Self {
        Expiration::At(at)
    }
}

impl From<Option<DateTime<Utc>>> for Expiration {
    fn from(at: Option<DateTime<Utc>>) -> Self {
        at.map_or(Expiration::None, Expiration::At)
    }
}

impl From<&str> for Expiration {
    fn from(text: &str) -> Self {
        Expiration::parse(text)
    }
}

impl From<Option<&str>> for Expiration {
    fn from(text: Option<&str>) -> Self {
        text.map_or(Expiration::None, Expiration::parse)
    }
}

/// Parse a timestamp. Values without an offset are taken as UTC.
///
/// Accepted forms: RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`
/// and a bare `YYYY-MM-DD` (midnight).
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, ExpirationParseError> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Some(midnight) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(ExpirationParseError {
        input: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339() {
        let at = parse_timestamp("2999-01-01T00:00:00Z").unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2999, 1, 1, 0, 0, 0).unwrap());

        let at = parse_timestamp("2030-06-01T12:00:00+02:00").unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2030, 6, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_forms() {
        let expected = Utc.with_ymd_and_hms(2030, 6, 1, 8, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2030-06-01 08:30:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2030-06-01T08:30:00").unwrap(), expected);

        let midnight = Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2030-06-01").unwrap(), midnight);
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_timestamp("next tuesday").unwrap_err();
        assert_eq!(err.input, "next tuesday");
        assert!(err.to_string().contains("next tuesday"));
    }

    #[test]
    fn test_expiration_from_text() {
        assert_eq!(Expiration::from(""), Expiration::None);
        assert_eq!(Expiration::from(None::<&str>), Expiration::None);
        assert!(matches!(Expiration::from("2030-01-01"), Expiration::At(_)));
        assert_eq!(
            Expiration::from("soon"),
            Expiration::Invalid("soon".to_string())
        );
        assert!(Expiration::from("soon").instant().is_none());
    }
}
