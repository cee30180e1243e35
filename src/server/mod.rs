//! Server module
//!
//! Listening socket ownership and the accept loop.

pub mod core;

pub use core::ChatServer;
