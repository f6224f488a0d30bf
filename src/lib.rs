//! Port reservation daemon.
//!
//! Holds a listening socket on every configured TCP port and discards any
//! connection made to one, so no other process can bind those ports while
//! it runs.
//!
//! # Architecture Overview
//!
//! ```text
//!     CLI flags / config file
//!              │
//!              ▼
//!     ┌────────────────┐      ┌──────────────────┐      ┌────────────────┐
//!     │     ports      │─────▶│   reservation    │─────▶│      net       │
//!     │  spec parser   │      │     manager      │      │  accept loops  │
//!     └────────────────┘      └──────────────────┘      └────────────────┘
//!              ▲                        │                        │
//!              │               ┌──────────────────┐              │
//!              └───────────────│    lifecycle     │◀─────────────┘
//!                              │ signals/shutdown │
//!                              └──────────────────┘
//! ```
//!
//! One accept loop runs per reserved port. All loops share a single
//! shutdown signal; teardown closes every listener and joins every loop
//! within a bounded deadline.

// Core subsystems
pub mod config;
pub mod net;
pub mod ports;
pub mod reservation;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use lifecycle::Shutdown;
pub use reservation::ReservationManager;
