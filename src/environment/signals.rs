//! External configuration signals.
//!
//! # Responsibilities
//! - Abstract over where signals come from (process environment, in-memory map)
//! - Resolve an ordered alias list through one case-insensitive lookup
//!
//! # Design Decisions
//! - Each alias is tried as given, then upper-cased, before moving to the next
//! - Empty values count as absent

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A read-only source of named configuration signals.
pub trait SignalSource: Send + Sync + fmt::Debug {
    /// Return the raw value for `key`, if set.
    fn get(&self, key: &str) -> Option<String>;
}

/// Signals read from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl SignalSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Signals held in memory. Used by embedders that resolve configuration
/// themselves, and by tests that must not touch the process environment.
#[derive(Debug, Clone, Default)]
pub struct MapSignals {
    vars: HashMap<String, String>,
}

impl MapSignals {
    /// Create an empty signal map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace a signal.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Remove a signal.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }
}

impl<K, V> FromIterator<(K, V)> for MapSignals
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl SignalSource for MapSignals {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Names of the signals consulted during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SignalNames {
    /// Aliases for the deployment environment name, in priority order.
    pub environment: Vec<String>,

    /// Aliases for the numeric verbosity level, in priority order.
    pub level: Vec<String>,

    /// Low-level runtime mode signal ("production" / "development").
    pub runtime_mode: String,
}

impl Default for SignalNames {
    fn default() -> Self {
        Self {
            environment: vec![
                "env".to_string(),
                "deployEnvironment".to_string(),
                "environment".to_string(),
                "stage".to_string(),
                "deploy_environment".to_string(),
            ],
            level: vec!["detailedLogs".to_string(), "logLevel".to_string()],
            runtime_mode: "RUNTIME_MODE".to_string(),
        }
    }
}

/// Return the first non-empty value among `aliases` that `parse` accepts.
///
/// For each alias the key is consulted as given, then upper-cased.
pub fn find_signal<S, T, F>(source: &S, aliases: &[String], parse: F) -> Option<T>
where
    S: SignalSource + ?Sized,
    F: Fn(&str) -> Option<T>,
{
    for alias in aliases {
        let upper = alias.to_uppercase();
        for key in [alias.as_str(), upper.as_str()] {
            let parsed = source
                .get(key)
                .filter(|value| !value.is_empty())
                .and_then(|value| parse(&value));
            if parsed.is_some() {
                return parsed;
            }
        }
    }
    None
}

/// Return the first non-empty value among `aliases`.
pub fn first_signal<S>(source: &S, aliases: &[String]) -> Option<String>
where
    S: SignalSource + ?Sized,
{
    find_signal(source, aliases, |value| Some(value.to_string()))
}
