//! Port reservation subsystem.
//!
//! Owns the collection of listeners: builds it during startup, closes and
//! joins it during shutdown. Per-port bind failures are partial, never
//! fatal here.

pub mod manager;

pub use manager::{ReservationManager, ReservationSet};
