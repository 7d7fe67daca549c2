//! Environment-gated leveled logging.
//!
//! # Architecture Overview
//!
//! ```text
//!   call site                 ┌────────────────────────────────────────────┐
//!   logger.diag(..) ─────────▶│ gate        should_emit(severity, level)   │
//!                             │   │                                        │
//!                             │   ▼                                        │
//!                             │ level       effective level, override +    │
//!                             │   │         expiration, production floor   │
//!                             │   ▼                                        │
//!                             │ environment PROD / TEST / DEV from signals │
//!                             └───────────────┬────────────────────────────┘
//!                                             │ permitted records
//!                                             ▼
//!                                  sink (console / tracing / memory)
//! ```
//!
//! Severity thresholds: ERROR, WARN and LOG always; MSG at 1; DIAG at 3;
//! DEBUG at 5. Production always runs at level 0.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use loggate::environment::{EnvironmentResolver, MapSignals, SignalNames};
//! use loggate::level::LogLevelController;
//! use loggate::sink::MemorySink;
//! use loggate::Logger;
//!
//! let signals = MapSignals::new().with("env", "dev").with("logLevel", "3");
//! let resolver = EnvironmentResolver::new(Arc::new(signals), SignalNames::default());
//! let sink = MemorySink::new();
//! let logger = Logger::new(LogLevelController::new(resolver), Arc::new(sink.clone()));
//!
//! assert!(logger.diag("cache warmed", None));
//! assert!(!logger.debug("raw values", None));
//! assert_eq!(sink.len(), 1);
//! ```

pub mod config;
pub mod environment;
pub mod gate;
pub mod level;
pub mod sink;

pub use config::LoggerSettings;
pub use environment::Environment;
pub use gate::{Logger, Severity};
