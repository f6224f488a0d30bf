//! Per-port TCP listener that discards everything it accepts.
//!
//! # Responsibilities
//! - Bind one socket per reserved port
//! - Run an accept loop until cancellation
//! - Reset accepted connections immediately, reading nothing

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::lifecycle::Shutdown;

/// Pause after a failed accept so a persistent error cannot spin the loop.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Failure to reserve a single port. Non-fatal: the reservation manager
/// logs it and moves on to the next port.
#[derive(Debug, Error)]
#[error("failed to bind port {port}: {source}")]
pub struct BindError {
    /// The port that could not be reserved.
    pub port: u32,
    /// The underlying bind failure.
    #[source]
    pub source: io::Error,
}

/// Handle to one reserved port.
///
/// The bound socket is owned by the accept-loop task; the handle can only
/// ask the loop to stop and wait for it to exit. Dropping the handle does
/// not release the port until the loop observes a signal.
#[derive(Debug)]
pub struct ListenerHandle {
    port: u32,
    local_addr: SocketAddr,
    close_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ListenerHandle {
    /// Bind `0.0.0.0:<port>` and spawn the accept loop.
    ///
    /// Out-of-range port values fail here with an `InvalidInput` cause, the
    /// same way an occupied port fails with `AddrInUse`.
    pub async fn start(port: u32, shutdown: &Shutdown) -> Result<Self, BindError> {
        let addr: SocketAddr = format!("0.0.0.0:{port}").parse().map_err(|e| BindError {
            port,
            source: io::Error::new(io::ErrorKind::InvalidInput, e),
        })?;

        let listener = bind_socket(addr).map_err(|source| BindError { port, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| BindError { port, source })?;

        let (close_tx, close_rx) = watch::channel(false);
        let cancel = shutdown.clone();
        let task = tokio::spawn(accept_loop(listener, port, cancel, close_rx));

        Ok(Self {
            port,
            local_addr,
            close_tx,
            task,
        })
    }

    /// The port this handle reserves.
    pub fn port(&self) -> u32 {
        self.port
    }

    /// The address the socket is actually bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// True once the accept loop has exited and the socket is released.
    pub fn is_stopped(&self) -> bool {
        self.task.is_finished()
    }

    /// Ask the accept loop to stop. Idempotent: closing an already-closed
    /// listener is a no-op.
    pub fn close(&self) {
        if self.close_tx.send(true).is_err() {
            tracing::debug!(port = self.port, "Listener already stopped");
        }
    }

    /// Wait for the accept loop to exit.
    pub async fn join(self) {
        if let Err(err) = self.task.await {
            tracing::warn!(port = self.port, error = %err, "Accept loop terminated abnormally");
        }
    }
}

/// Build the listening socket with keep-alive disabled.
fn bind_socket(addr: SocketAddr) -> io::Result<TcpListener> {
    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4()?,
        SocketAddr::V6(_) => TcpSocket::new_v6()?,
    };
    socket.set_keepalive(false)?;
    socket.bind(addr)?;
    socket.listen(1024)
}

/// Accept connections on one port until the shared shutdown signal or this
/// listener's close signal fires. The socket is released when the loop
/// exits, which is what frees the port.
async fn accept_loop(
    listener: TcpListener,
    port: u32,
    shutdown: Shutdown,
    mut close_rx: watch::Receiver<bool>,
) {
    let mut cancel = shutdown.subscribe();

    loop {
        if shutdown.is_triggered() || *close_rx.borrow() {
            break;
        }

        tokio::select! {
            _ = cancel.changed() => break,
            _ = close_rx.changed() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    tracing::debug!(port, peer = %peer, "Connection received");
                    tokio::spawn(discard(stream, port));
                }
                Err(err) => {
                    if shutdown.is_triggered() || *close_rx.borrow() {
                        // Expected during teardown.
                        tracing::debug!(port, error = %err, "Accept interrupted by shutdown");
                        break;
                    }
                    tracing::error!(port, error = %err, "Accept error");
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                }
            },
        }
    }

    drop(listener);
    tracing::debug!(port, "Listener stopped");
}

/// Reset an accepted connection without reading or writing anything.
///
/// These tasks are fire-and-forget: nothing tracks or joins them. Zero
/// linger turns the close into an RST, so no connection can sit in a wait
/// state past shutdown.
async fn discard(stream: TcpStream, port: u32) {
    if let Err(err) = stream.set_linger(Some(Duration::ZERO)) {
        tracing::debug!(port, error = %err, "Failed to set linger on accepted connection");
    }
    drop(stream);
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn free_port() -> u32 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        u32::from(listener.local_addr().unwrap().port())
    }

    #[tokio::test]
    async fn bind_failure_carries_the_port() {
        let shutdown = Shutdown::new();
        let occupier = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = u32::from(occupier.local_addr().unwrap().port());

        let err = ListenerHandle::start(port, &shutdown).await.unwrap_err();
        assert_eq!(err.port, port);
    }

    #[tokio::test]
    async fn out_of_range_port_fails_to_bind() {
        let shutdown = Shutdown::new();
        let err = ListenerHandle::start(70000, &shutdown).await.unwrap_err();
        assert_eq!(err.port, 70000);
        assert_eq!(err.source.kind(), io::ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let shutdown = Shutdown::new();
        let port = free_port().await;
        let handle = ListenerHandle::start(port, &shutdown).await.unwrap();

        handle.close();
        handle.close();
        handle.join().await;
    }

    #[tokio::test]
    async fn shared_signal_stops_the_loop() {
        let shutdown = Shutdown::new();
        let port = free_port().await;
        let handle = ListenerHandle::start(port, &shutdown).await.unwrap();
        assert!(!handle.is_stopped());

        shutdown.trigger();
        handle.join().await;
    }
}
