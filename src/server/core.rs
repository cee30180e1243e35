//! Acceptor loop
//!
//! Binds the listening socket and spawns one session task per accepted
//! connection. Acceptance never blocks on any individual session.

use log::{error, info};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

use crate::config::ChatConfig;
use crate::registry::ClientRegistry;
use crate::session::run_session;

pub struct ChatServer {
    listener: TcpListener,
    registry: Arc<ClientRegistry>,
}

impl ChatServer {
    /// Binds the listening socket from configuration. A bind failure is fatal
    /// at startup; the caller logs and aborts.
    pub async fn bind(config: &ChatConfig) -> io::Result<Self> {
        let addr = config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;
        info!("Server bound to {}", addr);
        Ok(Self::with_listener(listener))
    }

    /// Builds a server around an already bound listener. Used by tests to
    /// run on an OS-assigned port.
    pub fn with_listener(listener: TcpListener) -> Self {
        Self {
            listener,
            registry: Arc::new(ClientRegistry::new()),
        }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle to the shared client registry.
    pub fn registry(&self) -> Arc<ClientRegistry> {
        Arc::clone(&self.registry)
    }

    /// Accepts connections forever, spawning an independent session task for
    /// each. A failure accepting one connection is logged and the loop
    /// continues.
    pub async fn start(&self) {
        info!("Chat server is online and waiting for connections...");

        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => self.spawn_session(stream, peer),
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }

    fn spawn_session(&self, stream: TcpStream, peer: SocketAddr) {
        let registry = Arc::clone(&self.registry);
        tokio::spawn(async move {
            run_session(stream, peer, registry).await;
        });
    }
}
