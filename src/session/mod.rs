//! Session management
//!
//! Owns the lifecycle of one client connection: handshake, join, the active
//! read loop, and cleanup.

pub mod handler;

pub use handler::run_session;
