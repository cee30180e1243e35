//! Server message listener
//!
//! Prints every line the server sends until the connection ends, then
//! reports the terminated connection to the user.

use tokio::io::AsyncBufRead;

use crate::protocol;

pub async fn listen_for_messages<R>(mut server: R)
where
    R: AsyncBufRead + Unpin,
{
    loop {
        match protocol::next_line(&mut server).await {
            Ok(Some(line)) => println!("{}", line),
            Ok(None) | Err(_) => break,
        }
    }
    println!("Conexión con el servidor finalizada.");
}
