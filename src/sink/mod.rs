//! Output sinks for permitted log records.
//!
//! # Responsibilities
//! - Define the `Sink` contract the gate forwards records to
//! - Format `[TAG] message | payload` lines for console output
//! - Redact sensitive payload fields before rendering
//! - Bridge records into `tracing` for hosts that already run a subscriber
//!
//! # Design Decisions
//! - Sinks return errors; the gate is responsible for swallowing them
//! - Payloads are `serde_json::Value` so any serializable type can be attached

pub mod console;
pub mod memory;
pub mod redact;
pub mod tracing_bridge;

use std::fmt;
use std::io;

use serde_json::Value;
use thiserror::Error;

use crate::gate::{Channel, Severity};

pub use console::{format_record, ConsoleSink};
pub use memory::MemorySink;
pub use redact::{Redactor, REDACTED};
pub use tracing_bridge::TracingSink;

/// A log record that passed the gate.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Output channel chosen from the severity.
    pub channel: Channel,
    /// Severity used for gating.
    pub severity: Severity,
    /// Upper-cased tag shown between square brackets.
    pub tag: String,
    pub message: String,
    pub payload: Option<Value>,
}

/// Destination for log records.
pub trait Sink: Send + Sync + fmt::Debug {
    /// Write one record.
    fn write(&self, record: &Record) -> Result<(), SinkError>;
}

/// Errors that can occur while writing a record.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The underlying stream rejected the write.
    #[error("write to {channel} channel failed: {source}")]
    Io {
        channel: Channel,
        #[source]
        source: io::Error,
    },

    /// The payload could not be rendered.
    #[error("payload rendering failed: {0}")]
    Render(#[from] serde_json::Error),

    /// The sink cannot accept records right now.
    #[error("sink unavailable: {0}")]
    Unavailable(String),
}
