//! Startup orchestration and the run state machine.
//!
//! ```text
//! Starting:     parse spec → reserve ports (partial failures tolerated)
//! Running:      wait for SIGINT/SIGTERM or an internal stop
//! ShuttingDown: close all listeners, join accept loops within the deadline
//! Stopped:      return
//! ```
//!
//! Only two conditions are fatal: a specification that does not parse (or
//! was never given) and a reservation pass that binds nothing.

use thiserror::Error;

use crate::config::AppConfig;
use crate::lifecycle::{signals, Shutdown};
use crate::ports::{self, ParseError};
use crate::reservation::ReservationManager;

/// Startup failures that abort the run.
#[derive(Debug, Error)]
pub enum FatalError {
    /// No port specification on the command line or in the config file.
    #[error("no ports specified")]
    NoPortsGiven,

    /// The port specification did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Every reservation attempt failed.
    #[error("no ports could be reserved")]
    NoPortsReserved,
}

/// Run to completion: reserve ports, hold them until a termination signal,
/// then tear everything down within the configured deadline.
pub async fn run(config: AppConfig) -> Result<(), FatalError> {
    run_with_shutdown(config, Shutdown::new()).await
}

/// Same as [`run`], but observing an externally owned shutdown signal so a
/// caller can stop the reservation without delivering an OS signal.
pub async fn run_with_shutdown(config: AppConfig, shutdown: Shutdown) -> Result<(), FatalError> {
    let spec = config
        .ports
        .as_deref()
        .filter(|spec| !spec.is_empty())
        .ok_or(FatalError::NoPortsGiven)?;
    let port_list = ports::parse(spec)?;

    let mut stopped = shutdown.subscribe();
    let manager = ReservationManager::new(shutdown.clone());
    let reservations = manager.reserve_all(&port_list).await;
    if reservations.is_empty() {
        return Err(FatalError::NoPortsReserved);
    }
    tracing::info!(
        reserved = reservations.len(),
        requested = port_list.len(),
        "Reservations active"
    );

    if !shutdown.is_triggered() {
        tokio::select! {
            name = signals::wait_for_termination() => {
                tracing::info!(signal = name, "Received signal, starting graceful shutdown");
                shutdown.trigger();
            }
            _ = stopped.changed() => {
                tracing::info!("Stop requested, starting graceful shutdown");
            }
        }
    }

    manager.shutdown(reservations, config.shutdown_timeout).await;
    Ok(())
}
