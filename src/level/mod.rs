//! Log level resolution subsystem.
//!
//! # Data Flow
//! ```text
//! configure_log_level(level, expiration)
//!     → expiration.rs (parse timestamp text)
//!     → controller.rs (guards: configure-once, expiry, production floor)
//!     → Resolution { level, notices }
//!
//! every log call:
//!     → controller.rs effective_level() (lazy init / expiry collapse)
//!     → gate
//! ```
//!
//! # Design Decisions
//! - State lives on an explicit controller owned by the logger, not a global
//! - Time comes from a `Clock` so expiry can be driven deterministically

pub mod clock;
pub mod controller;
pub mod expiration;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{LevelState, LogLevelController, Notice, Resolution};
pub use expiration::{parse_timestamp, Expiration, ExpirationParseError};
