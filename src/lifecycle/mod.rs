//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Parse spec → Reserve ports → Hold until signalled
//!
//! Shutdown (shutdown.rs):
//!     Trigger once → every accept loop observes the same signal
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → graceful shutdown trigger
//! ```
//!
//! Teardown is bounded: listeners are closed and joined under a deadline,
//! and the driver returns only after that join completes or expires.

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{run, run_with_shutdown, FatalError};
