//! Gate: resolve level, apply the table, forward to the sink.

use std::fmt;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::gate::severity::{should_emit, Severity};
use crate::level::{LogLevelController, Notice};
use crate::sink::{Record, Sink};

/// Decides whether a call is emitted and hands permitted records to a sink.
pub struct LogGate {
    controller: LogLevelController,
    sink: Arc<dyn Sink>,
    /// Where sink failures are reported. Stderr unless replaced.
    fallback: Mutex<Box<dyn Write + Send>>,
}

impl LogGate {
    pub fn new(controller: LogLevelController, sink: Arc<dyn Sink>) -> Self {
        Self {
            controller,
            sink,
            fallback: Mutex::new(Box::new(io::stderr())),
        }
    }

    /// Report sink failures to `writer` instead of stderr.
    pub fn with_fallback<W>(mut self, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.fallback = Mutex::new(Box::new(writer));
        self
    }

    pub fn controller(&self) -> &LogLevelController {
        &self.controller
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    /// Effective level, logging any notices produced while resolving it.
    pub fn level(&self) -> u8 {
        let resolution = self.controller.effective_level();
        self.emit_notices(resolution.notices);
        resolution.level
    }

    /// Gate and forward one call.
    ///
    /// Returns `true` when the record was emitted and the sink accepted it.
    /// Sink errors and panics are reported on stderr and never propagate.
    pub fn dispatch(
        &self,
        severity: Severity,
        tag: &str,
        message: &str,
        payload: Option<Value>,
    ) -> bool {
        let level = self.level();
        if !should_emit(severity, level) {
            return false;
        }

        let record = Record {
            channel: severity.channel(),
            severity,
            tag: tag.trim().to_uppercase(),
            message: message.to_string(),
            payload,
        };

        match panic::catch_unwind(AssertUnwindSafe(|| self.sink.write(&record))) {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                self.report_failure(&e);
                false
            }
            Err(_) => {
                self.report_failure(&"sink panicked");
                false
            }
        }
    }

    pub(crate) fn emit_notices(&self, notices: Vec<Notice>) {
        for notice in notices {
            self.dispatch(notice.severity, notice.severity.tag(), &notice.message, None);
        }
    }

    fn report_failure(&self, error: &dyn fmt::Display) {
        let mut out = self.fallback.lock();
        let _ = writeln!(out, "Logging failed: {error}");
        let _ = out.flush();
    }
}

impl fmt::Debug for LogGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogGate")
            .field("controller", &self.controller)
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}
