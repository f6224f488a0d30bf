//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Reserved port
//!     → listener.rs (bind, accept loop)
//!     → per-connection discard task (linger zero, drop)
//! ```
//!
//! No backpressure and no payload handling: accepted connections carry no
//! protocol meaning and are reset as soon as they arrive.

pub mod listener;

pub use listener::{BindError, ListenerHandle};
