//! Shared utilities for integration tests.

use std::io;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};

/// Find a port that is currently free by binding an ephemeral port and
/// releasing it. Racy in principle, fine for tests.
pub async fn free_port() -> u32 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    u32::from(listener.local_addr().unwrap().port())
}

/// Occupy a port with a plain listener, standing in for a foreign process.
/// The port stays taken for as long as the returned listener lives.
pub async fn occupy_port() -> (TcpListener, u32) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = u32::from(listener.local_addr().unwrap().port());
    (listener, port)
}

/// Connect to a port and read until the remote side closes. Returns the
/// number of bytes received before the close, or the read error (an abrupt
/// reset also counts as the remote closing).
pub async fn connect_and_drain(port: u32) -> io::Result<usize> {
    let mut stream = TcpStream::connect(("127.0.0.1", port as u16)).await?;
    let mut buf = [0u8; 64];
    match tokio::time::timeout(Duration::from_secs(2), stream.read(&mut buf)).await {
        Ok(result) => result,
        Err(_) => Err(io::Error::new(
            io::ErrorKind::TimedOut,
            "remote did not close within the deadline",
        )),
    }
}
