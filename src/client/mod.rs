//! Interactive chat client
//!
//! Console prompting, the server-message listener, and the send loop used by
//! the `chat-client` binary.

pub mod console;
pub mod listener;
pub mod names;
pub mod send;

pub use listener::listen_for_messages;
pub use send::send_loop;
