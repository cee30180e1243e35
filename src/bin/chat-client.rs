//! Interactive chat client - Entry Point
//!
//! Prompts for server address, port, and username, then relays console lines
//! to the server while a background task prints incoming messages.

use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use relay_chat_server::client::{console, listen_for_messages, send_loop};
use relay_chat_server::error::{ChatError, ClientError};

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        eprintln!("Error al conectar con el servidor: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ChatError> {
    let mut console_input = BufReader::new(tokio::io::stdin());

    let server_addr = console::prompt_server_addr(&mut console_input).await?;
    let port = console::prompt_port(&mut console_input).await?;
    let username = console::prompt_username(&mut console_input).await?;

    let stream = TcpStream::connect((server_addr.as_str(), port))
        .await
        .map_err(ClientError::ConnectionFailed)?;
    let (read_half, mut write_half) = stream.into_split();

    // The server's first line is the username prompt; answer it right away.
    write_half
        .write_all(format!("{}\n", username).as_bytes())
        .await?;
    println!(
        "Conectado al servidor de mensajes en {}:{}",
        server_addr, port
    );

    // Print server messages without blocking the console input.
    let listener = tokio::spawn(listen_for_messages(BufReader::new(read_half)));

    send_loop(&mut console_input, &mut write_half, &username).await?;

    listener.abort();
    Ok(())
}
