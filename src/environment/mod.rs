//! Environment resolution subsystem.
//!
//! # Data Flow
//! ```text
//! SignalSource (process env / in-memory map)
//!     → signals.rs (ordered, case-insensitive alias lookup)
//!     → resolver.rs (Environment + RuntimeMode)
//!     → level controller (production floor, configure-once default)
//! ```
//!
//! # Design Decisions
//! - Leaf component: depends on nothing else in the crate
//! - Pure function of the signals; safe to call on every log line

pub mod resolver;
pub mod signals;

pub use resolver::{Environment, EnvironmentResolver, RuntimeMode};
pub use signals::{MapSignals, ProcessEnv, SignalNames, SignalSource};
