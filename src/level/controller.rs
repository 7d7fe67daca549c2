//! Effective log level state machine.
//!
//! # States
//! - Uninitialized: nothing resolved yet
//! - Default: level derived from the environment (always 0 in production)
//! - Overridden: operator-requested level, optionally time-bounded
//! - ExpiredOverride: override whose expiration has passed (not stored;
//!   observed until the next read collapses it back to Default)
//!
//! # State Transitions
//! ```text
//! Uninitialized → Default: first read, or configure(None, _)
//! Uninitialized/Default → Overridden: configure(Some(level), unexpired)
//! Overridden → ExpiredOverride: clock passes the stored expiration
//! ExpiredOverride → Default: next read (warns once)
//! configure(Some(level > 0), _) in production → Default (warns)
//! ```
//!
//! # Design Decisions
//! - Never fails: unsafe or malformed requests degrade to the default level
//!   and come back as notices for the caller to log
//! - Notices are returned, not logged, and tracing events fire only after
//!   the guard is released, so nothing is emitted under the lock
//! - The expiration is kept only while an override is in effect
//! - Lazy initialization is double-checked under the write lock, so the
//!   default is computed once even when many threads read first

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::environment::signals::find_signal;
use crate::environment::{Environment, EnvironmentResolver, RuntimeMode};
use crate::gate::Severity;
use crate::level::clock::{Clock, SystemClock};
use crate::level::expiration::Expiration;

const EXPIRED_MESSAGE: &str = "Override of log level default expired. \
    Call to configure_log_level() should be commented out or removed";

/// Conceptual state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelState {
    Uninitialized,
    Default,
    Overridden,
    ExpiredOverride,
}

/// A diagnostic produced while resolving or configuring the level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    fn warn(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warn,
            message: message.into(),
        }
    }

    fn msg(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Msg,
            message: message.into(),
        }
    }
}

/// The level in effect after an operation, plus anything worth logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub level: u8,
    pub notices: Vec<Notice>,
}

impl Resolution {
    fn quiet(level: u8) -> Self {
        Self {
            level,
            notices: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
struct LevelCell {
    level: Option<u8>,
    expiration: Option<DateTime<Utc>>,
    overridden: bool,
}

impl LevelCell {
    fn override_expired(&self, now: DateTime<Utc>) -> bool {
        self.overridden && self.expiration.is_some_and(|at| now > at)
    }
}

/// Holds the effective log level and its optional override expiration.
#[derive(Debug)]
pub struct LogLevelController {
    resolver: EnvironmentResolver,
    clock: Arc<dyn Clock>,
    finalize_after_first: bool,
    cell: RwLock<LevelCell>,
    initializations: AtomicUsize,
}

impl LogLevelController {
    /// Create an uninitialized controller.
    ///
    /// Configure-once enforcement defaults to on when the runtime mode is
    /// `Deployed`; use [`with_finalize_after_first`](Self::with_finalize_after_first)
    /// to set it explicitly.
    pub fn new(resolver: EnvironmentResolver) -> Self {
        let finalize_after_first = resolver.runtime_mode() == RuntimeMode::Deployed;
        Self {
            resolver,
            clock: Arc::new(SystemClock),
            finalize_after_first,
            cell: RwLock::new(LevelCell::default()),
            initializations: AtomicUsize::new(0),
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Reject reconfiguration once a level has been established.
    pub fn with_finalize_after_first(mut self, enabled: bool) -> Self {
        self.finalize_after_first = enabled;
        self
    }

    pub fn resolver(&self) -> &EnvironmentResolver {
        &self.resolver
    }

    pub fn environment(&self) -> Environment {
        self.resolver.environment()
    }

    pub fn finalize_after_first(&self) -> bool {
        self.finalize_after_first
    }

    /// Level derived from the environment alone.
    ///
    /// Production is always 0. Elsewhere the first level alias that parses as
    /// an unsigned integer wins, else 0.
    pub fn default_level(&self) -> u8 {
        if self.resolver.is_production() {
            return 0;
        }
        find_signal(
            self.resolver.source(),
            &self.resolver.names().level,
            parse_level,
        )
        .unwrap_or(0)
    }

    /// Request a level override. `None` re-establishes the default.
    pub fn configure(&self, requested: Option<u8>, expiration: impl Into<Expiration>) -> Resolution {
        let expiration = expiration.into();
        let now = self.clock.now();
        let mut cell = self.cell.write();

        let current = cell.level;
        if self.finalize_after_first {
            if let Some(level) = current {
                drop(cell);
                tracing::debug!(current = level, "configure ignored, level already finalized");
                return Resolution {
                    level,
                    notices: vec![Notice::warn(format!(
                        "Log level already set, cannot reset. Ignoring call to configure_log_level({})",
                        describe(requested)
                    ))],
                };
            }
        }

        let resolution = self.apply(&mut cell, requested, expiration, now);
        let (overridden, expires_at) = (cell.overridden, cell.expiration);
        drop(cell);

        tracing::debug!(
            level = resolution.level,
            overridden,
            expiration = ?expires_at,
            "log level configured"
        );
        resolution
    }

    /// The level currently in effect, initializing or expiring as needed.
    pub fn effective_level(&self) -> Resolution {
        let now = self.clock.now();
        {
            let cell = self.cell.read();
            if let Some(level) = cell.level {
                if !cell.override_expired(now) {
                    return Resolution::quiet(level);
                }
            }
        }

        let mut cell = self.cell.write();
        let current = cell.level;
        let resolution = match current {
            None => self.apply(&mut cell, None, Expiration::None, now),
            Some(_) if cell.override_expired(now) => {
                let level = self.default_level();
                cell.level = Some(level);
                cell.overridden = false;
                cell.expiration = None;
                Resolution {
                    level,
                    notices: vec![Notice::warn(EXPIRED_MESSAGE)],
                }
            }
            // Another caller initialized between the read and write locks.
            Some(level) => return Resolution::quiet(level),
        };
        drop(cell);

        if current.is_some() {
            tracing::debug!(level = resolution.level, "log level override expired");
        } else {
            tracing::debug!(level = resolution.level, "log level initialized");
        }
        resolution
    }

    /// Stored override expiration, if any.
    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.cell.read().expiration
    }

    /// True iff an expiration is set and has not yet passed.
    ///
    /// An expiration is only retained while an override is in effect, so a
    /// rejected or unset request never reports an active override.
    pub fn has_non_expired_override(&self) -> bool {
        let now = self.clock.now();
        self.cell.read().expiration.is_some_and(|at| now <= at)
    }

    pub fn state(&self) -> LevelState {
        let now = self.clock.now();
        let cell = self.cell.read();
        match (cell.level, cell.overridden) {
            (None, _) => LevelState::Uninitialized,
            (Some(_), true) if cell.override_expired(now) => LevelState::ExpiredOverride,
            (Some(_), true) => LevelState::Overridden,
            (Some(_), false) => LevelState::Default,
        }
    }

    /// How many times the level went from uninitialized to initialized.
    pub fn initialization_count(&self) -> usize {
        self.initializations.load(Ordering::Relaxed)
    }

    /// Return to the uninitialized state.
    pub fn reset(&self) {
        *self.cell.write() = LevelCell::default();
        tracing::debug!("log level reset");
    }

    fn apply(
        &self,
        cell: &mut LevelCell,
        requested: Option<u8>,
        expiration: Expiration,
        now: DateTime<Utc>,
    ) -> Resolution {
        let mut notices = Vec::new();
        let (expires_at, invalid) = match expiration {
            Expiration::None => (None, None),
            Expiration::At(at) => (Some(at), None),
            Expiration::Invalid(text) => (None, Some(text)),
        };
        cell.expiration = expires_at;
        cell.overridden = false;

        let level = match requested {
            None => self.default_level(),
            Some(requested) => {
                if let Some(text) = invalid {
                    notices.push(Notice::warn(format!(
                        "Unparseable expiration '{text}' for log level override {requested}. Using default log level"
                    )));
                    self.default_level()
                } else if expires_at.is_some_and(|at| now > at) {
                    notices.push(Notice::warn(EXPIRED_MESSAGE));
                    self.default_level()
                } else if requested > 0 && self.resolver.is_production() {
                    notices.push(Notice::warn(format!(
                        "Production environment. Cannot set log level higher than 0. \
                         Ignoring call to configure_log_level({requested}). \
                         Log level override code should be removed before production"
                    )));
                    self.default_level()
                } else {
                    cell.overridden = true;
                    notices.push(Notice::msg(format!(
                        "Override of log level default set: {requested}. \
                         Log level override code should be removed before production"
                    )));
                    if expires_at.is_none() {
                        notices.push(Notice::warn(
                            "Override of log level default set WITHOUT EXPIRATION. \
                             An expiration is recommended.",
                        ));
                    }
                    requested
                }
            }
        };

        if !cell.overridden {
            cell.expiration = None;
        }
        if cell.level.is_none() {
            self.initializations.fetch_add(1, Ordering::Relaxed);
        }
        cell.level = Some(level);

        Resolution { level, notices }
    }
}

fn parse_level(value: &str) -> Option<u8> {
    value.trim().parse::<u8>().ok()
}

fn describe(requested: Option<u8>) -> String {
    requested.map_or_else(|| "unset".to_string(), |level| level.to_string())
}
