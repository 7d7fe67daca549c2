//! Payload redaction.
//!
//! Object keys are normalized (lower-cased, `_` and `-` removed) and matched
//! by suffix, so `db_password` and `accessToken` are caught by `password` and
//! `token`.

use serde_json::{Map, Value};

/// Replacement for redacted values.
pub const REDACTED: &str = "******";

const DEFAULT_KEYS: &[&str] = &[
    "password",
    "passwd",
    "secret",
    "token",
    "apikey",
    "authorization",
    "privatekey",
    "credentials",
    "cookie",
];

/// Replaces sensitive values in a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redactor {
    keys: Vec<String>,
}

impl Redactor {
    /// Redact the given key names.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keys: keys
                .into_iter()
                .map(|k| normalize(k.as_ref()))
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Redact nothing.
    pub fn disabled() -> Self {
        Self { keys: Vec::new() }
    }

    pub fn default_keys() -> &'static [&'static str] {
        DEFAULT_KEYS
    }

    pub fn is_sensitive(&self, key: &str) -> bool {
        let key = normalize(key);
        self.keys.iter().any(|k| key.ends_with(k.as_str()))
    }

    /// Return a copy of `value` with sensitive fields replaced.
    pub fn redact(&self, value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, inner)| {
                        let inner = if self.is_sensitive(key) {
                            Value::String(REDACTED.to_string())
                        } else {
                            self.redact(inner)
                        };
                        (key.clone(), inner)
                    })
                    .collect::<Map<String, Value>>(),
            ),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.redact(v)).collect()),
            other => other.clone(),
        }
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(DEFAULT_KEYS)
    }
}

fn normalize(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_redaction() {
        let payload = json!({
            "user": "alice",
            "db_password": "hunter2",
            "session": { "accessToken": "abc", "expires": 30 },
            "items": [ { "api-key": "k1" }, { "name": "ok" } ]
        });

        let redacted = Redactor::default().redact(&payload);
        assert_eq!(redacted["user"], "alice");
        assert_eq!(redacted["db_password"], REDACTED);
        assert_eq!(redacted["session"]["accessToken"], REDACTED);
        assert_eq!(redacted["session"]["expires"], 30);
        assert_eq!(redacted["items"][0]["api-key"], REDACTED);
        assert_eq!(redacted["items"][1]["name"], "ok");
    }

    #[test]
    fn test_whole_subtree_replaced() {
        let payload = json!({ "credentials": { "user": "a", "pass": "b" } });
        let redacted = Redactor::default().redact(&payload);
        assert_eq!(redacted["credentials"], REDACTED);
    }

    #[test]
    fn test_custom_keys_and_disabled() {
        let payload = json!({ "ssn": "123", "password": "x" });

        let redacted = Redactor::new(["SSN"]).redact(&payload);
        assert_eq!(redacted["ssn"], REDACTED);
        assert_eq!(redacted["password"], "x");

        assert_eq!(Redactor::disabled().redact(&payload), payload);
    }

    #[test]
    fn test_default_keys() {
        let r = Redactor::default();
        for key in ["passwd", "Cookie", "private_key", "API-KEY", "refresh_token"] {
            assert!(r.is_sensitive(key), "{key}");
        }
        for key in ["cache_key", "monkey", "user"] {
            assert!(!r.is_sensitive(key), "{key}");
        }
    }

    #[test]
    fn test_scalars_untouched() {
        assert_eq!(Redactor::default().redact(&json!("token")), json!("token"));
    }
}
