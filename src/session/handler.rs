//! Per-connection session handler
//!
//! Each accepted connection runs through a small state machine:
//! handshake (obtain a username), joined (register and announce), active
//! (read lines and broadcast them), closing (deregister and drop the socket).
//! Cleanup runs exactly once on every path out of the read loop.

use log::{debug, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use crate::error::HandshakeError;
use crate::protocol;
use crate::registry::ClientRegistry;

/// Runs the full lifecycle of one client connection.
///
/// Takes the stream, peer address, and registry handle explicitly so session
/// logic stays independent of how the task was spawned.
pub async fn run_session(stream: TcpStream, peer: SocketAddr, registry: Arc<ClientRegistry>) {
    let (read_half, write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut writer = write_half;

    let username = match handshake(&mut reader, &mut writer).await {
        Ok(username) => username,
        Err(HandshakeError::ConnectionClosed) => {
            // No registry entry was ever created; nothing to clean up.
            debug!("Connection from {} closed before a username arrived", peer);
            return;
        }
        Err(e) => {
            warn!("Handshake with {} failed: {}", peer, e);
            return;
        }
    };

    info!("Connection established with {} - user: {}", peer, username);

    // The writer task owns the write half; the registry only holds the
    // sender, so no broadcast can ever write to a closed socket directly.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let writer_task = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if let Err(e) = writer.write_all(format!("{}\n", line).as_bytes()).await {
                debug!("Write to client failed: {}", e);
                break;
            }
        }
        if let Err(e) = writer.shutdown().await {
            debug!("Error closing client socket: {}", e);
        }
    });

    registry.add(peer, tx).await;
    registry.broadcast(&protocol::join_announcement(&username)).await;

    read_loop(&mut reader, &username, &registry).await;

    // Closing: remove exactly once, regardless of which path ended the loop.
    registry.remove(&peer).await;
    // All senders are gone now; the writer drains its queue and exits.
    let _ = writer_task.await;
}

/// Prompts for and reads the username. Aborts without side effects if the
/// connection closes before a line arrives.
async fn handshake<R, W>(reader: &mut R, writer: &mut W) -> Result<String, HandshakeError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    writer
        .write_all(format!("{}\n", protocol::USERNAME_PROMPT).as_bytes())
        .await?;
    writer.flush().await?;

    match protocol::next_line(reader).await? {
        Some(username) => Ok(username),
        None => Err(HandshakeError::ConnectionClosed),
    }
}

/// Active state: reads lines until the leave sentinel, end-of-stream, or an
/// I/O error ends the session.
async fn read_loop<R>(reader: &mut R, username: &str, registry: &ClientRegistry)
where
    R: AsyncBufRead + Unpin,
{
    loop {
        match protocol::next_line(reader).await {
            Ok(Some(line)) => {
                if protocol::is_leave_sentinel(username, &line) {
                    registry
                        .broadcast(&protocol::leave_announcement(username))
                        .await;
                    info!("{} has disconnected", username);
                    return;
                }
                registry.broadcast(&protocol::chat_line(username, &line)).await;
            }
            Ok(None) => {
                // Abrupt drop: no leave announcement, only the log line.
                info!("{} disconnected unexpectedly", username);
                return;
            }
            Err(e) => {
                warn!("Read from {} failed: {}", username, e);
                return;
            }
        }
    }
}
