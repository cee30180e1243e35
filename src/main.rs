//! Relay Chat Server - Entry Point
//!
//! A TCP chat server that broadcasts every line a client sends to all
//! currently connected clients.

use log::error;

use relay_chat_server::ChatServer;
use relay_chat_server::config::ChatConfig;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let config = match ChatConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let server = match ChatServer::bind(&config).await {
        Ok(server) => server,
        Err(e) => {
            error!("Server startup failed on {}: {}", config.socket_addr(), e);
            std::process::exit(1);
        }
    };

    server.start().await;
}
