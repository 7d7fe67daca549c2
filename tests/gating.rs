//! End-to-end gating through the public entry points.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;

use loggate::environment::{EnvironmentResolver, SignalNames};
use loggate::gate::Channel;
use loggate::level::LogLevelController;
use loggate::sink::{Record, Sink, SinkError, REDACTED};
use loggate::{Environment, Logger, Severity};
use serde_json::json;

mod common;

use common::{harness, signals};

#[test]
fn test_development_fallback_scenario() {
    let h = harness(&[("RUNTIME_MODE", "development"), ("logLevel", "3")]);

    assert_eq!(h.logger.environment(), Environment::Development);
    assert_eq!(h.logger.log_level(), 3);
    assert!(h.logger.diag("took 12ms", None));
    assert!(!h.logger.debug("x = 42", None));

    let records = h.sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].channel, Channel::Debug);
    assert_eq!(records[0].tag, "DIAG");
}

#[test]
fn test_level_zero_only_passes_unsuppressible_severities() {
    let h = harness(&[]);

    assert!(h.logger.error("failed", None));
    assert!(h.logger.warn("careful", None));
    assert!(h.logger.log("summary", None, None));
    assert!(!h.logger.msg("status", None));
    assert!(!h.logger.diag("timing", None));
    assert!(!h.logger.debug("values", None));

    let channels: Vec<Channel> = h.sink.records().iter().map(|r| r.channel).collect();
    assert_eq!(channels, vec![Channel::Error, Channel::Warn, Channel::Log]);
}

#[test]
fn test_level_five_passes_everything() {
    let h = harness(&[("env", "test"), ("LOGLEVEL", "5")]);

    for severity in Severity::ALL {
        assert!(h.logger.log("line", Some(severity.tag()), None), "{severity}");
    }
    assert_eq!(h.sink.len(), Severity::ALL.len());
}

#[test]
fn test_payload_forwarded_to_sink() {
    let h = harness(&[]);
    h.logger
        .error("request failed", Some(json!({"status": 502, "password": "pw"})));

    let record = &h.sink.records()[0];
    // Redaction belongs to the rendering sinks, not the gate.
    assert_eq!(record.payload, Some(json!({"status": 502, "password": "pw"})));
    let line = loggate::sink::format_record(record, &Default::default()).unwrap();
    assert!(line.contains(REDACTED));
    assert!(line.starts_with("[ERROR] request failed | "));
}

#[derive(Debug)]
struct FlakySink;

impl Sink for FlakySink {
    fn write(&self, record: &Record) -> Result<(), SinkError> {
        if record.severity == Severity::Error {
            panic!("cannot write errors");
        }
        Err(SinkError::Unavailable("disk full".to_string()))
    }
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_sink_failures_never_reach_caller() {
    let captured = Captured::default();
    let resolver = EnvironmentResolver::new(Arc::new(signals(&[])), SignalNames::default());
    let logger = Logger::new(LogLevelController::new(resolver), Arc::new(FlakySink))
        .with_fallback(captured.clone());

    assert!(!logger.error("boom", None));
    assert!(!logger.warn("boom", None));
    // Notices produced during configuration also go through the failing sink.
    assert_eq!(logger.configure_log_level(Some(5), None), 0);

    assert_eq!(
        captured.lines(),
        vec![
            "Logging failed: sink panicked",
            "Logging failed: sink unavailable: disk full",
            "Logging failed: sink unavailable: disk full",
        ]
    );
}

#[test]
fn test_shared_logger_across_threads() {
    let h = harness(&[("env", "dev"), ("logLevel", "1")]);
    let logger = Arc::new(h.logger);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for n in 0..25 {
                    logger.msg(&format!("worker {i} step {n}"), None);
                    logger.diag("suppressed", None);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(h.sink.len(), 100);
    assert_eq!(logger.controller().initialization_count(), 1);
}
