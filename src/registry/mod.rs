//! Client registry
//!
//! Tracks the output channels of currently connected clients and fans
//! broadcast messages out to them.
//!
//! Each entry is the sending side of the per-session writer channel, keyed by
//! peer address. The session handler owns the socket; the registry only holds
//! a handle sufficient to queue lines for delivery.

use log::debug;
use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;

/// Handle to one connected client's outbound line queue.
pub type ClientHandle = UnboundedSender<String>;

/// Concurrency-safe set of connected clients.
///
/// Every operation is independently atomic under an internal lock; broadcasts
/// deliver against a snapshot taken under the lock and released before any
/// sends happen, so fan-out never blocks concurrent add/remove.
#[derive(Default)]
pub struct ClientRegistry {
    clients: Mutex<HashMap<SocketAddr, ClientHandle>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a client's handle, visible to subsequent broadcasts immediately.
    pub async fn add(&self, addr: SocketAddr, handle: ClientHandle) {
        let mut clients = self.clients.lock().await;
        clients.insert(addr, handle);
    }

    /// Removes a client's handle. Removing an absent entry is a no-op, so
    /// redundant cleanup calls from concurrent paths are harmless.
    pub async fn remove(&self, addr: &SocketAddr) -> bool {
        let mut clients = self.clients.lock().await;
        clients.remove(addr).is_some()
    }

    /// Number of currently registered clients.
    pub async fn len(&self) -> usize {
        let clients = self.clients.lock().await;
        clients.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Stable view of the current entries for fan-out.
    pub async fn snapshot(&self) -> Vec<(SocketAddr, ClientHandle)> {
        let clients = self.clients.lock().await;
        clients
            .iter()
            .map(|(addr, handle)| (*addr, handle.clone()))
            .collect()
    }

    /// Delivers `text` to every client in the current snapshot.
    ///
    /// Fire-and-forget: a recipient whose channel already closed is logged
    /// and skipped, never aborting delivery to the rest.
    pub async fn broadcast(&self, text: &str) {
        for (addr, handle) in self.snapshot().await {
            if handle.send(text.to_string()).is_err() {
                debug!("Dropping message for {}: channel closed", addr);
            }
        }
    }
}
