//! Deployment environment resolution.
//!
//! # Resolution Order
//! ```text
//! environment aliases (env, deployEnvironment, environment, stage, ...)
//!     → first non-empty value, upper-cased
//! none found:
//!     → runtime mode == "development" ? DEV : PROD
//! value not in {PROD, TEST, DEV}:
//!     → PROD
//! ```
//!
//! # Design Decisions
//! - Recomputed on every query; nothing is cached here
//! - Anything unrecognized resolves to production (most restrictive)

use std::fmt;
use std::sync::Arc;

use crate::environment::signals::{first_signal, ProcessEnv, SignalNames, SignalSource};

/// Deployment environment the process is running in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    #[default]
    Production,
    Test,
    Development,
}

impl Environment {
    /// All recognized environments.
    pub const ALL: [Environment; 3] = [
        Environment::Production,
        Environment::Test,
        Environment::Development,
    ];

    /// Canonical signal token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Environment::Production => "PROD",
            Environment::Test => "TEST",
            Environment::Development => "DEV",
        }
    }

    /// Match a signal value against the canonical tokens, ignoring case.
    ///
    /// Surrounding whitespace is not stripped; a padded value is unrecognized.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.to_uppercase();
        Self::ALL.into_iter().find(|env| env.as_str() == token)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Low-level runtime mode, independent of the deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RuntimeMode {
    /// Deployed build ("production"). Enables configure-once by default.
    Deployed,
    /// Local development ("development"). Allows the DEV fallback.
    Development,
    /// Anything else, including unset.
    #[default]
    Permissive,
}

impl RuntimeMode {
    fn from_value(value: Option<&str>) -> Self {
        match value {
            Some("production") => RuntimeMode::Deployed,
            Some("development") => RuntimeMode::Development,
            _ => RuntimeMode::Permissive,
        }
    }
}

/// Determines the deployment environment from external signals.
#[derive(Debug, Clone)]
pub struct EnvironmentResolver {
    source: Arc<dyn SignalSource>,
    names: SignalNames,
}

impl EnvironmentResolver {
    /// Create a resolver over `source` using the given signal names.
    pub fn new(source: Arc<dyn SignalSource>, names: SignalNames) -> Self {
        Self { source, names }
    }

    /// Resolver over the process environment with default signal names.
    pub fn from_process_env() -> Self {
        Self::new(Arc::new(ProcessEnv), SignalNames::default())
    }

    /// The underlying signal source.
    pub fn source(&self) -> &dyn SignalSource {
        self.source.as_ref()
    }

    /// Signal names consulted by this resolver.
    pub fn names(&self) -> &SignalNames {
        &self.names
    }

    /// Resolve the current environment.
    pub fn environment(&self) -> Environment {
        match first_signal(self.source.as_ref(), &self.names.environment) {
            Some(value) => Environment::from_token(&value).unwrap_or_default(),
            None if self.runtime_mode() == RuntimeMode::Development => Environment::Development,
            None => Environment::Production,
        }
    }

    /// Resolve the runtime mode signal.
    pub fn runtime_mode(&self) -> RuntimeMode {
        let value = self.source.get(&self.names.runtime_mode);
        RuntimeMode::from_value(value.as_deref())
    }

    pub fn is_production(&self) -> bool {
        self.environment() == Environment::Production
    }

    pub fn is_not_production(&self) -> bool {
        !self.is_production()
    }

    pub fn is_development(&self) -> bool {
        self.environment() == Environment::Development
    }

    pub fn is_test(&self) -> bool {
        self.environment() == Environment::Test
    }
}

impl Default for EnvironmentResolver {
    fn default() -> Self {
        Self::from_process_env()
    }
}
