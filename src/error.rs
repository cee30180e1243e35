//! Error types
//!
//! Defines domain-specific error types for each module of the chat service.

use std::fmt;
use std::io;

/// Errors raised while negotiating a username with a freshly accepted client.
#[derive(Debug)]
pub enum HandshakeError {
    /// The connection closed before a username line arrived.
    ConnectionClosed,
    Io(io::Error),
}

impl fmt::Display for HandshakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandshakeError::ConnectionClosed => {
                write!(f, "Connection closed before a username was received")
            }
            HandshakeError::Io(e) => write!(f, "I/O error during handshake: {}", e),
        }
    }
}

impl std::error::Error for HandshakeError {}

impl From<io::Error> for HandshakeError {
    fn from(error: io::Error) -> Self {
        HandshakeError::Io(error)
    }
}

/// Interactive client errors
#[derive(Debug)]
pub enum ClientError {
    InvalidPort(String),
    ConnectionFailed(io::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidPort(p) => write!(f, "Invalid port: {}", p),
            ClientError::ConnectionFailed(e) => {
                write!(f, "Failed to connect to the server: {}", e)
            }
        }
    }
}

impl std::error::Error for ClientError {}

/// General chat service error that encompasses all error types
#[derive(Debug)]
pub enum ChatError {
    Config(config::ConfigError),
    Handshake(HandshakeError),
    Client(ClientError),
    Io(io::Error),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Config(e) => write!(f, "Configuration error: {}", e),
            ChatError::Handshake(e) => write!(f, "Handshake error: {}", e),
            ChatError::Client(e) => write!(f, "Client error: {}", e),
            ChatError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ChatError {}

impl From<config::ConfigError> for ChatError {
    fn from(error: config::ConfigError) -> Self {
        ChatError::Config(error)
    }
}

impl From<HandshakeError> for ChatError {
    fn from(error: HandshakeError) -> Self {
        ChatError::Handshake(error)
    }
}

impl From<ClientError> for ChatError {
    fn from(error: ClientError) -> Self {
        ChatError::Client(error)
    }
}

impl From<io::Error> for ChatError {
    fn from(error: io::Error) -> Self {
        ChatError::Io(error)
    }
}
