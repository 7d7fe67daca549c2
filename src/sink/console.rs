//! Console sink: error and warn go to stderr, everything else to stdout.

use std::fmt;
use std::io::{self, Write};

use parking_lot::Mutex;

use crate::gate::Channel;
use crate::sink::redact::Redactor;
use crate::sink::{Record, Sink, SinkError};

/// Render a record as `[TAG] message` or `[TAG] message | payload`.
pub fn format_record(record: &Record, redactor: &Redactor) -> Result<String, SinkError> {
    match &record.payload {
        Some(payload) => {
            let rendered = serde_json::to_string(&redactor.redact(payload))?;
            Ok(format!("[{}] {} | {}", record.tag, record.message, rendered))
        }
        None => Ok(format!("[{}] {}", record.tag, record.message)),
    }
}

type BoxedWriter = Box<dyn Write + Send>;

/// Line-oriented sink over a pair of writers.
pub struct ConsoleSink {
    out: Mutex<BoxedWriter>,
    err: Mutex<BoxedWriter>,
    redactor: Redactor,
}

impl ConsoleSink {
    /// Sink over the process stdout and stderr.
    pub fn new() -> Self {
        Self::with_writers(io::stdout(), io::stderr())
    }

    /// Sink over arbitrary writers.
    pub fn with_writers<O, E>(out: O, err: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            out: Mutex::new(Box::new(out)),
            err: Mutex::new(Box::new(err)),
            redactor: Redactor::default(),
        }
    }

    pub fn with_redactor(mut self, redactor: Redactor) -> Self {
        self.redactor = redactor;
        self
    }

    pub fn redactor(&self) -> &Redactor {
        &self.redactor
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("redactor", &self.redactor)
            .finish_non_exhaustive()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, record: &Record) -> Result<(), SinkError> {
        let line = format_record(record, &self.redactor)?;
        let target = match record.channel {
            Channel::Error | Channel::Warn => &self.err,
            Channel::Log | Channel::Info | Channel::Debug => &self.out,
        };

        let mut writer = target.lock();
        writeln!(writer, "{line}")
            .and_then(|()| writer.flush())
            .map_err(|source| SinkError::Io {
                channel: record.channel,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Severity;
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn record(severity: Severity, message: &str, payload: Option<serde_json::Value>) -> Record {
        Record {
            channel: severity.channel(),
            severity,
            tag: severity.tag().to_string(),
            message: message.to_string(),
            payload,
        }
    }

    #[test]
    fn test_format_without_payload() {
        let line = format_record(&record(Severity::Msg, "ready", None), &Redactor::default()).unwrap();
        assert_eq!(line, "[MSG] ready");
    }

    #[test]
    fn test_format_redacts_payload() {
        let r = record(Severity::Diag, "login", Some(json!({"user": "bob", "password": "pw"})));
        let line = format_record(&r, &Redactor::default()).unwrap();
        assert_eq!(line, r#"[DIAG] login | {"password":"******","user":"bob"}"#);
    }

    #[test]
    fn test_channels_route_to_streams() {
        let out = SharedBuf::default();
        let err = SharedBuf::default();
        let sink = ConsoleSink::with_writers(out.clone(), err.clone());

        sink.write(&record(Severity::Error, "boom", None)).unwrap();
        sink.write(&record(Severity::Warn, "careful", None)).unwrap();
        sink.write(&record(Severity::Log, "done", None)).unwrap();
        sink.write(&record(Severity::Debug, "x=1", None)).unwrap();

        assert_eq!(err.contents(), "[ERROR] boom\n[WARN] careful\n");
        assert_eq!(out.contents(), "[LOG] done\n[DEBUG] x=1\n");
    }

    #[test]
    fn test_write_failure_reports_channel() {
        let sink = ConsoleSink::with_writers(BrokenPipe, BrokenPipe);
        let err = sink.write(&record(Severity::Warn, "lost", None)).unwrap_err();
        assert!(matches!(err, SinkError::Io { channel: Channel::Warn, .. }));
        assert!(err.to_string().contains("warn"));
    }
}
