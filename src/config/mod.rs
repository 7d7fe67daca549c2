//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LoggerSettings (validated, immutable)
//!     → Logger::from_settings (resolver names, configure-once flag,
//!       sink + redaction, optional override)
//! ```
//!
//! # Design Decisions
//! - Settings are read once at startup; there is no hot reload, since the
//!   level may only be configured once in deployed mode
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_settings, parse_settings, ConfigError};
pub use schema::{LoggerSettings, OverrideSettings, RedactionSettings, SinkKind};
pub use validation::{validate_settings, ValidationError};
