//! Send loop
//!
//! Forwards console lines to the server. Exit commands are handled locally:
//! they open the confirmation dialog and, on confirmation, send the leave
//! sentinel instead of the typed text.

use std::io;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};

use crate::client::console::{self, ExitChoice};
use crate::protocol;

pub async fn send_loop<R, W>(console: &mut R, server: &mut W, username: &str) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        let Some(line) = protocol::next_line(console).await? else {
            break;
        };

        if !console::is_exit_command(&line) {
            server.write_all(format!("{}\n", line).as_bytes()).await?;
            continue;
        }

        match console::confirm_exit(console).await? {
            Some(ExitChoice::Leave) => {
                server
                    .write_all(format!("{}\n", protocol::leave_sentinel(username)).as_bytes())
                    .await?;
                println!("Te has desconectado del chat.");
                break;
            }
            Some(ExitChoice::Stay) => println!("Continuando en el chat..."),
            Some(ExitChoice::Invalid) => {
                println!("Opción no válida. Escribe 's' para salir o 'n' para continuar.")
            }
            None => break,
        }
    }

    Ok(())
}
