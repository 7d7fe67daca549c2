//! Public logging façade.
//!
//! A `Logger` is constructed once at startup and shared (`Arc<Logger>` or
//! `&Logger`) with every call site. All entry points are safe to call before
//! any explicit configuration; the first call establishes the default level.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::config::{LoggerSettings, SinkKind};
use crate::environment::{Environment, EnvironmentResolver, ProcessEnv, SignalSource};
use crate::gate::dispatch::LogGate;
use crate::gate::severity::Severity;
use crate::level::{Clock, Expiration, LevelState, LogLevelController};
use crate::sink::{ConsoleSink, Sink, TracingSink};

/// Leveled logger gated by deployment environment and verbosity.
#[derive(Debug)]
pub struct Logger {
    gate: LogGate,
}

impl Logger {
    /// Logger over an explicit controller and sink.
    pub fn new(controller: LogLevelController, sink: Arc<dyn Sink>) -> Self {
        Self {
            gate: LogGate::new(controller, sink),
        }
    }

    /// Report sink failures to `writer` instead of stderr.
    pub fn with_fallback<W>(self, writer: W) -> Self
    where
        W: std::io::Write + Send + 'static,
    {
        Self {
            gate: self.gate.with_fallback(writer),
        }
    }

    /// Console logger driven by the process environment.
    pub fn from_process_env() -> Self {
        Self::new(
            LogLevelController::new(EnvironmentResolver::from_process_env()),
            Arc::new(ConsoleSink::new()),
        )
    }

    /// Build a logger from loaded settings, reading signals from `source`.
    ///
    /// A `[override]` section is applied immediately through
    /// [`configure_log_level_until`](Self::configure_log_level_until).
    pub fn from_settings(settings: &LoggerSettings, source: Arc<dyn SignalSource>) -> Self {
        Self::from_settings_with_clock(settings, source, None)
    }

    /// Like [`from_settings`](Self::from_settings) with an explicit clock.
    pub fn from_settings_with_clock(
        settings: &LoggerSettings,
        source: Arc<dyn SignalSource>,
        clock: Option<Arc<dyn Clock>>,
    ) -> Self {
        let resolver = EnvironmentResolver::new(source, settings.signals.clone());
        let mut controller = LogLevelController::new(resolver);
        if let Some(finalize) = settings.finalize_after_first {
            controller = controller.with_finalize_after_first(finalize);
        }
        if let Some(clock) = clock {
            controller = controller.with_clock(clock);
        }

        let redactor = settings.redaction.redactor();
        let sink: Arc<dyn Sink> = match settings.sink {
            SinkKind::Console => Arc::new(ConsoleSink::new().with_redactor(redactor)),
            SinkKind::Tracing => Arc::new(TracingSink::new().with_redactor(redactor)),
        };

        let logger = Self::new(controller, sink);
        if let Some(level_override) = &settings.level_override {
            logger.configure_log_level_until(
                Some(level_override.level),
                level_override.expires.as_deref(),
            );
        }
        logger
    }

    /// Request a level override with an optional absolute expiration.
    ///
    /// `None` re-establishes the environment default. Returns the level now
    /// in effect. Never fails; rejected requests are logged as warnings.
    pub fn configure_log_level(&self, level: Option<u8>, expiration: Option<DateTime<Utc>>) -> u8 {
        self.configure_log_level_until(level, expiration)
    }

    /// Request a level override with any expiration form, including text.
    pub fn configure_log_level_until(&self, level: Option<u8>, expiration: impl Into<Expiration>) -> u8 {
        let resolution = self.gate.controller().configure(level, expiration);
        self.gate.emit_notices(resolution.notices);
        resolution.level
    }

    /// Effective log level (0-5).
    pub fn log_level(&self) -> u8 {
        self.gate.level()
    }

    pub fn environment(&self) -> Environment {
        self.gate.controller().environment()
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.gate.controller().expiration()
    }

    pub fn level_state(&self) -> LevelState {
        self.gate.controller().state()
    }

    pub fn controller(&self) -> &LogLevelController {
        self.gate.controller()
    }

    /// Level 0. Failures that stop the current operation.
    pub fn error(&self, message: &str, payload: Option<Value>) -> bool {
        self.emit(Severity::Error, message, payload)
    }

    /// Level 0. Handled problems; execution continues.
    pub fn warn(&self, message: &str, payload: Option<Value>) -> bool {
        self.emit(Severity::Warn, message, payload)
    }

    /// Same as [`warn`](Self::warn).
    pub fn warning(&self, message: &str, payload: Option<Value>) -> bool {
        self.warn(message, payload)
    }

    /// Level 0. Production-worthy output under a caller-chosen tag.
    ///
    /// A tag naming a severity (`"diag"`, `"error"`, ...) is gated and routed
    /// as that severity; `None` uses `LOG`.
    pub fn log(&self, message: &str, tag: Option<&str>, payload: Option<Value>) -> bool {
        let tag = tag.unwrap_or(Severity::Log.tag());
        self.gate
            .dispatch(Severity::from_tag(tag), tag, message, payload)
    }

    /// Level 1. Short status messages.
    pub fn msg(&self, message: &str, payload: Option<Value>) -> bool {
        self.emit(Severity::Msg, message, payload)
    }

    /// Same as [`msg`](Self::msg).
    pub fn message(&self, message: &str, payload: Option<Value>) -> bool {
        self.msg(message, payload)
    }

    /// Level 3. Timing and counts.
    pub fn diag(&self, message: &str, payload: Option<Value>) -> bool {
        self.emit(Severity::Diag, message, payload)
    }

    /// Level 5. Verbose values and calculations.
    pub fn debug(&self, message: &str, payload: Option<Value>) -> bool {
        self.emit(Severity::Debug, message, payload)
    }

    fn emit(&self, severity: Severity, message: &str, payload: Option<Value>) -> bool {
        self.gate.dispatch(severity, severity.tag(), message, payload)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::from_process_env()
    }
}

impl From<&LoggerSettings> for Logger {
    fn from(settings: &LoggerSettings) -> Self {
        Self::from_settings(settings, Arc::new(ProcessEnv))
    }
}
