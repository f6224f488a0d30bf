//! Configuration subsystem: schema, file loading, flag merging.
//!
//! Precedence is command line over config file over built-in defaults.
//! Logging flags are resolved separately (see `observability::logging`) so
//! that config errors can be reported through the configured logger.

pub mod loader;
pub mod schema;

pub use loader::{load_file, merge, ConfigError};
pub use schema::{AppConfig, BuildInfo, FileConfig};
