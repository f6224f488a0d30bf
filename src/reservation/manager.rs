//! Reservation bookkeeping: start every listener, close every listener.

use std::time::Duration;

use futures_util::future::join_all;

use crate::lifecycle::Shutdown;
use crate::net::ListenerHandle;

/// The listeners that were successfully bound, in reservation order.
///
/// Built once during startup and consumed by the shutdown pass; nothing is
/// ever inserted after the initial reserve.
#[derive(Debug, Default)]
pub struct ReservationSet {
    handles: Vec<ListenerHandle>,
}

impl ReservationSet {
    /// Number of ports currently held.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True when no port could be reserved.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Ports currently held, in reservation order.
    pub fn ports(&self) -> Vec<u32> {
        self.handles.iter().map(ListenerHandle::port).collect()
    }

    fn push(&mut self, handle: ListenerHandle) {
        self.handles.push(handle);
    }
}

/// Starts listeners for a parsed port list and coordinates their teardown.
pub struct ReservationManager {
    shutdown: Shutdown,
}

impl ReservationManager {
    /// Create a manager whose listeners all observe `shutdown`.
    pub fn new(shutdown: Shutdown) -> Self {
        Self { shutdown }
    }

    /// Try to reserve every port, in order.
    ///
    /// Never fails outright: ports that cannot be bound are logged and
    /// skipped. A duplicate entry fails on the second attempt like any
    /// other occupied port. The caller decides whether an empty result is
    /// fatal.
    pub async fn reserve_all(&self, ports: &[u32]) -> ReservationSet {
        let mut set = ReservationSet::default();
        for &port in ports {
            match ListenerHandle::start(port, &self.shutdown).await {
                Ok(handle) => {
                    tracing::info!(port, "Port reserved");
                    set.push(handle);
                }
                Err(err) => {
                    tracing::error!(port, error = %err.source, "Failed to reserve port");
                }
            }
        }
        set
    }

    /// Close every listener and wait for the accept loops to exit, bounded
    /// by `deadline`.
    ///
    /// Close and join problems are logged, never escalated; a loop that
    /// outlives the deadline is abandoned rather than waited on.
    pub async fn shutdown(&self, set: ReservationSet, deadline: Duration) {
        for handle in &set.handles {
            tracing::debug!(port = handle.port(), "Closing listener");
            handle.close();
        }

        let joined = join_all(set.handles.into_iter().map(ListenerHandle::join));
        if tokio::time::timeout(deadline, joined).await.is_err() {
            tracing::warn!(
                deadline_secs = deadline.as_secs(),
                "Shutdown deadline exceeded before all listeners stopped"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::net::TcpListener;

    async fn occupied_port() -> (TcpListener, u32) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = u32::from(listener.local_addr().unwrap().port());
        (listener, port)
    }

    #[tokio::test]
    async fn occupied_ports_are_skipped() {
        let shutdown = Shutdown::new();
        let manager = ReservationManager::new(shutdown.clone());
        let (_occupier, taken) = occupied_port().await;

        let free = {
            let probe = TcpListener::bind("127.0.0.1:0").await.unwrap();
            u32::from(probe.local_addr().unwrap().port())
        };

        let set = manager.reserve_all(&[taken, free]).await;
        assert_eq!(set.ports(), vec![free]);

        shutdown.trigger();
        manager.shutdown(set, Duration::from_secs(5)).await;
    }

    #[tokio::test]
    async fn all_ports_occupied_yields_empty_set() {
        let shutdown = Shutdown::new();
        let manager = ReservationManager::new(shutdown);
        let (_occupier, taken) = occupied_port().await;

        let set = manager.reserve_all(&[taken]).await;
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[tokio::test]
    async fn duplicate_entries_reserve_once() {
        let shutdown = Shutdown::new();
        let manager = ReservationManager::new(shutdown.clone());
        let free = {
            let probe = TcpListener::bind("127.0.0.1:0").await.unwrap();
            u32::from(probe.local_addr().unwrap().port())
        };

        let set = manager.reserve_all(&[free, free]).await;
        assert_eq!(set.ports(), vec![free]);

        shutdown.trigger();
        manager.shutdown(set, Duration::from_secs(5)).await;
    }
}
