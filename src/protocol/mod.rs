//! Wire protocol
//!
//! The chat protocol is newline-delimited UTF-8 text. This module holds the
//! fixed message formats exchanged between server and clients, the leave
//! sentinel recognition, and the line-read primitive used on both sides.

use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Prompt sent to every freshly accepted connection.
pub const USERNAME_PROMPT: &str = "Por favor, ingresa tu nombre de usuario:";

/// Announcement broadcast when a user completes the handshake.
pub fn join_announcement(username: &str) -> String {
    format!("{} se ha unido al chat.", username)
}

/// A regular chat line, prefixed with its sender.
pub fn chat_line(username: &str, message: &str) -> String {
    format!("{}: {}", username, message)
}

/// Announcement broadcast when a user leaves gracefully.
pub fn leave_announcement(username: &str) -> String {
    format!("{} ha dejado el chat.", username)
}

/// The exact line a client sends to request a graceful leave.
pub fn leave_sentinel(username: &str) -> String {
    format!("{} ha salido del chat.", username)
}

/// Whether `line` is the leave sentinel for this session's own username.
/// Recognition is case-insensitive; the username must match.
pub fn is_leave_sentinel(username: &str, line: &str) -> bool {
    line.eq_ignore_ascii_case(&leave_sentinel(username))
}

/// Reads the next line from the stream.
///
/// Returns `Ok(Some(line))` with the terminator stripped, `Ok(None)` on
/// end-of-stream, and `Err` on I/O failure, so callers branch on an explicit
/// status rather than catching errors for control flow.
pub async fn next_line<R>(reader: &mut R) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    match reader.read_line(&mut line).await? {
        0 => Ok(None),
        _ => {
            while line.ends_with('\n') || line.ends_with('\r') {
                line.pop();
            }
            Ok(Some(line))
        }
    }
}
