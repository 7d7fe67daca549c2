//! Gating and dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Logger::diag("message", payload)
//!     → dispatch.rs (effective level from the controller)
//!     → severity.rs (should_emit table, channel map)
//!     → Sink::write(Record)
//!     → on failure: report to stderr, return false
//! ```
//!
//! # Design Decisions
//! - Severity is a closed enum; the table is an exhaustive match
//! - ERROR, WARN and LOG are never suppressed
//! - Nothing raised by a sink reaches the caller

pub mod dispatch;
pub mod logger;
pub mod severity;

pub use dispatch::LogGate;
pub use logger::Logger;
pub use severity::{should_emit, Channel, Severity};
