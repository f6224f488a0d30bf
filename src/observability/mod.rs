//! Observability subsystem.
//!
//! Logging only: structured events through `tracing`, formatted to stdout.
//! The reserved ports carry no traffic worth metering.

pub mod logging;
