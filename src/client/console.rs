//! Console prompting
//!
//! Interactive prompts for server address, port, and username, plus the
//! local exit-command recognition and confirmation dialog. Prompts are
//! generic over their input so they can be driven from tests.

use std::io::{self, Write};
use tokio::io::AsyncBufRead;

use crate::client::names;
use crate::error::{ChatError, ClientError};
use crate::protocol;

pub const DEFAULT_SERVER: &str = "localhost";
pub const DEFAULT_PORT: u16 = 2024;

/// Commands that trigger the local leave-confirmation dialog instead of
/// being sent to the server.
const EXIT_COMMANDS: [&str; 3] = ["exit", "adios", "chao"];

/// Outcome of the leave-confirmation dialog.
#[derive(Debug, PartialEq, Eq)]
pub enum ExitChoice {
    Leave,
    Stay,
    Invalid,
}

pub fn is_exit_command(line: &str) -> bool {
    EXIT_COMMANDS.iter().any(|cmd| line.eq_ignore_ascii_case(cmd))
}

/// Asks for the server address; empty input falls back to `localhost`.
pub async fn prompt_server_addr<R>(input: &mut R) -> io::Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let line = prompt_line(
        input,
        &format!(
            "Introduce la dirección IP del servidor, por defecto: {}: ",
            DEFAULT_SERVER
        ),
    )
    .await?;

    match line {
        Some(addr) if !addr.is_empty() => Ok(addr),
        _ => Ok(DEFAULT_SERVER.to_string()),
    }
}

/// Asks for the server port; empty input falls back to 2024, anything that
/// is not a port number is rejected.
pub async fn prompt_port<R>(input: &mut R) -> Result<u16, ChatError>
where
    R: AsyncBufRead + Unpin,
{
    let line = prompt_line(
        input,
        &format!(
            "Introduce el puerto del servidor, por defecto PORT: {}: ",
            DEFAULT_PORT
        ),
    )
    .await?;

    match line {
        Some(port) if !port.is_empty() => port
            .parse()
            .map_err(|_| ClientError::InvalidPort(port).into()),
        _ => Ok(DEFAULT_PORT),
    }
}

/// Asks for the username; empty input gets a random name and a notice.
pub async fn prompt_username<R>(input: &mut R) -> io::Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let line = prompt_line(input, "Introduce tu nombre de usuario: ").await?;

    match line {
        Some(username) if !username.is_empty() => Ok(username),
        _ => {
            let username = names::random_username();
            println!(
                "No ingresaste un nombre. Se te asignará el nombre de usuario: {}",
                username
            );
            Ok(username)
        }
    }
}

/// Runs the yes/no leave confirmation. Returns `None` if the console input
/// ended.
pub async fn confirm_exit<R>(input: &mut R) -> io::Result<Option<ExitChoice>>
where
    R: AsyncBufRead + Unpin,
{
    let line = prompt_line(input, "¿Deseas salir del chat? (s/n): ").await?;

    Ok(line.map(|answer| match answer.to_lowercase().as_str() {
        "s" => ExitChoice::Leave,
        "n" => ExitChoice::Stay,
        _ => ExitChoice::Invalid,
    }))
}

async fn prompt_line<R>(input: &mut R, prompt: &str) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    print!("{}", prompt);
    io::stdout().flush()?;

    let line = protocol::next_line(input).await?;
    Ok(line.map(|l| l.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_address_defaults_to_localhost() {
        let mut input: &[u8] = b"\n";
        assert_eq!(prompt_server_addr(&mut input).await.unwrap(), "localhost");
    }

    #[tokio::test]
    async fn explicit_address_is_kept() {
        let mut input: &[u8] = b"192.168.1.20\n";
        assert_eq!(
            prompt_server_addr(&mut input).await.unwrap(),
            "192.168.1.20"
        );
    }

    #[tokio::test]
    async fn empty_port_defaults_to_2024() {
        let mut input: &[u8] = b"\n";
        assert_eq!(prompt_port(&mut input).await.unwrap(), 2024);
    }

    #[tokio::test]
    async fn unparsable_port_is_rejected() {
        let mut input: &[u8] = b"veinte\n";
        assert!(matches!(
            prompt_port(&mut input).await,
            Err(ChatError::Client(ClientError::InvalidPort(_)))
        ));
    }

    #[tokio::test]
    async fn empty_username_gets_a_random_name() {
        let mut input: &[u8] = b"\n";
        let username = prompt_username(&mut input).await.unwrap();
        assert!(names::FUNNY_NAMES.contains(&username.as_str()));
    }

    #[tokio::test]
    async fn confirmation_answers_map_to_choices() {
        let mut input: &[u8] = b"s\nN\nquizas\n";
        assert_eq!(
            confirm_exit(&mut input).await.unwrap(),
            Some(ExitChoice::Leave)
        );
        assert_eq!(
            confirm_exit(&mut input).await.unwrap(),
            Some(ExitChoice::Stay)
        );
        assert_eq!(
            confirm_exit(&mut input).await.unwrap(),
            Some(ExitChoice::Invalid)
        );
    }

    #[test]
    fn exit_commands_are_case_insensitive() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("ADIOS"));
        assert!(is_exit_command("Chao"));
        assert!(!is_exit_command("hola"));
        assert!(!is_exit_command("exit ahora"));
    }
}
