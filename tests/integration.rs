//! End-to-end tests running a real server on an OS-assigned port with real
//! TCP clients.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{
    TcpListener, TcpStream,
    tcp::{OwnedReadHalf, OwnedWriteHalf},
};
use tokio::time::{sleep, timeout};

use relay_chat_server::ChatServer;
use relay_chat_server::registry::ClientRegistry;

const PROMPT: &str = "Por favor, ingresa tu nombre de usuario:";

async fn start_server() -> (SocketAddr, Arc<ClientRegistry>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server = ChatServer::with_listener(listener);
    let addr = server.local_addr().unwrap();
    let registry = server.registry();
    tokio::spawn(async move {
        server.start().await;
    });
    (addr, registry)
}

async fn read_line(reader: &mut BufReader<OwnedReadHalf>) -> String {
    let mut line = String::new();
    let n = timeout(Duration::from_secs(2), reader.read_line(&mut line))
        .await
        .expect("timed out waiting for a line")
        .expect("read failed");
    assert!(n > 0, "connection closed while expecting a line");
    line.trim_end().to_string()
}

async fn connect_and_join(
    addr: SocketAddr,
    username: &str,
) -> (BufReader<OwnedReadHalf>, OwnedWriteHalf) {
    let stream = TcpStream::connect(addr).await.unwrap();
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    assert_eq!(read_line(&mut reader).await, PROMPT);
    write_half
        .write_all(format!("{}\n", username).as_bytes())
        .await
        .unwrap();

    // Every client sees its own join announcement once registered.
    assert_eq!(
        read_line(&mut reader).await,
        format!("{} se ha unido al chat.", username)
    );

    (reader, write_half)
}

async fn wait_for_client_count(registry: &ClientRegistry, expected: usize) {
    timeout(Duration::from_secs(2), async {
        while registry.len().await != expected {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap_or_else(|_| {
        panic!("registry never reached {} clients", expected);
    });
}

#[tokio::test]
async fn messages_reach_every_connected_client() {
    let (addr, registry) = start_server().await;

    let (mut ana_reader, mut ana_writer) = connect_and_join(addr, "Ana").await;
    let (mut bob_reader, _bob_writer) = connect_and_join(addr, "Bob").await;
    assert_eq!(read_line(&mut ana_reader).await, "Bob se ha unido al chat.");
    wait_for_client_count(&registry, 2).await;

    ana_writer.write_all(b"hola\n").await.unwrap();

    assert_eq!(read_line(&mut bob_reader).await, "Ana: hola");
    assert_eq!(read_line(&mut ana_reader).await, "Ana: hola");
}

#[tokio::test]
async fn leave_sentinel_announces_and_removes_the_session() {
    let (addr, registry) = start_server().await;

    let (mut ana_reader, mut ana_writer) = connect_and_join(addr, "Ana").await;
    let (mut bob_reader, mut bob_writer) = connect_and_join(addr, "Bob").await;
    assert_eq!(read_line(&mut ana_reader).await, "Bob se ha unido al chat.");
    wait_for_client_count(&registry, 2).await;

    ana_writer
        .write_all(b"Ana ha salido del chat.\n")
        .await
        .unwrap();

    assert_eq!(read_line(&mut bob_reader).await, "Ana ha dejado el chat.");
    wait_for_client_count(&registry, 1).await;

    // Ana is gone: a later broadcast reaches Bob but never Ana, whose
    // connection ends without further lines.
    bob_writer.write_all(b"sigue aqui\n").await.unwrap();
    assert_eq!(read_line(&mut bob_reader).await, "Bob: sigue aqui");

    assert_eq!(read_line(&mut ana_reader).await, "Ana ha dejado el chat.");
    let mut rest = String::new();
    let n = timeout(Duration::from_secs(2), ana_reader.read_line(&mut rest))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(n, 0, "Ana's connection should be closed after leaving");
}

#[tokio::test]
async fn abrupt_disconnect_removes_without_announcement() {
    let (addr, registry) = start_server().await;

    let (mut ana_reader, mut ana_writer) = connect_and_join(addr, "Ana").await;
    let (bob_reader, bob_writer) = connect_and_join(addr, "Bob").await;
    assert_eq!(read_line(&mut ana_reader).await, "Bob se ha unido al chat.");
    wait_for_client_count(&registry, 2).await;

    // Bob vanishes without sending the sentinel.
    drop(bob_reader);
    drop(bob_writer);
    wait_for_client_count(&registry, 1).await;

    // No leave announcement was broadcast: the next line Ana sees is her
    // own message echoed back.
    ana_writer.write_all(b"hola\n").await.unwrap();
    assert_eq!(read_line(&mut ana_reader).await, "Ana: hola");
}

#[tokio::test]
async fn concurrent_joiners_see_each_other() {
    let (addr, _registry) = start_server().await;

    // Join without waiting for announcements, so the two handshakes overlap.
    let (bob, cleo) = tokio::join!(connect(addr, "Bob"), connect(addr, "Cleo"));
    let (mut bob_reader, _bob_writer) = bob;
    let (mut cleo_reader, _cleo_writer) = cleo;

    // Relative order of the two join announcements is unspecified, but each
    // client must eventually see the other's.
    expect_line_eventually(&mut bob_reader, "Cleo se ha unido al chat.").await;
    expect_line_eventually(&mut cleo_reader, "Bob se ha unido al chat.").await;
}

async fn connect(
    addr: SocketAddr,
    username: &str,
) -> (BufReader<OwnedReadHalf>, OwnedWriteHalf) {
    let stream = TcpStream::connect(addr).await.unwrap();
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    assert_eq!(read_line(&mut reader).await, PROMPT);
    write_half
        .write_all(format!("{}\n", username).as_bytes())
        .await
        .unwrap();

    (reader, write_half)
}

async fn expect_line_eventually(reader: &mut BufReader<OwnedReadHalf>, expected: &str) {
    timeout(Duration::from_secs(2), async {
        loop {
            if read_line(reader).await == expected {
                break;
            }
        }
    })
    .await
    .unwrap_or_else(|_| panic!("never received line: {}", expected));
}

#[tokio::test]
async fn closing_before_the_username_leaves_no_entry() {
    let (addr, registry) = start_server().await;

    let stream = TcpStream::connect(addr).await.unwrap();
    let (read_half, write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    assert_eq!(read_line(&mut reader).await, PROMPT);

    drop(reader);
    drop(write_half);

    sleep(Duration::from_millis(100)).await;
    assert_eq!(registry.len().await, 0);
}
