//! OS signal handling.
//!
//! Translates SIGINT and SIGTERM into the graceful-shutdown trigger. The
//! first signal wins; later signals are absorbed by the already-triggered
//! shutdown path.

/// Wait for an interrupt or terminate signal, returning its name for the
/// shutdown log line.
#[cfg(unix)]
pub async fn wait_for_termination() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate =
        signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => "interrupt",
        _ = terminate.recv() => "terminate",
    }
}

#[cfg(not(unix))]
pub async fn wait_for_termination() -> &'static str {
    let _ = tokio::signal::ctrl_c().await;
    "interrupt"
}
