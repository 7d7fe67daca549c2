//! Forward records into `tracing` events.
//!
//! Channel to tracing level: Error → ERROR, Warn → WARN, Log/Info → INFO,
//! Debug → DEBUG. The record tag and rendered payload travel as fields.

use crate::gate::Channel;
use crate::sink::redact::Redactor;
use crate::sink::{Record, Sink, SinkError};

/// Sink that emits each record as a `tracing` event.
#[derive(Debug, Clone, Default)]
pub struct TracingSink {
    redactor: Redactor,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_redactor(mut self, redactor: Redactor) -> Self {
        self.redactor = redactor;
        self
    }
}

impl Sink for TracingSink {
    fn write(&self, record: &Record) -> Result<(), SinkError> {
        let payload = record
            .payload
            .as_ref()
            .map(|p| serde_json::to_string(&self.redactor.redact(p)))
            .transpose()?;
        let tag = record.tag.as_str();
        let message = record.message.as_str();

        match record.channel {
            Channel::Error => tracing::error!(tag, payload, "{message}"),
            Channel::Warn => tracing::warn!(tag, payload, "{message}"),
            Channel::Log | Channel::Info => tracing::info!(tag, payload, "{message}"),
            Channel::Debug => tracing::debug!(tag, payload, "{message}"),
        }
        Ok(())
    }
}
