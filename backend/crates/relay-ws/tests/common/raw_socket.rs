#![allow(dead_code)]

//! Raw TCP access to a relay listener, for peers that misbehave below the
//! WebSocket client API: never reading, or leaving mid-handshake.

use relay_ws::{RelayState, subscriber_handler};

use std::net::SocketAddr;

use axum::{Router, routing::get};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{Duration, timeout};

const UPGRADE_REQUEST: &str = "GET / HTTP/1.1\r\n\
    Host: 127.0.0.1\r\n\
    Connection: Upgrade\r\n\
    Upgrade: websocket\r\n\
    Sec-WebSocket-Version: 13\r\n\
    Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\
    \r\n";

/// Serve the subscriber handler on a real loopback port
pub async fn spawn_subscriber_listener(state: RelayState) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    let app = Router::new()
        .route("/", get(subscriber_handler))
        .with_state(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test listener failed");
    });

    addr
}

/// Send the upgrade request without waiting for the response
pub async fn send_upgrade_request(addr: SocketAddr) -> TcpStream {
    let mut stream = TcpStream::connect(addr).await.expect("Failed to connect");
    stream
        .write_all(UPGRADE_REQUEST.as_bytes())
        .await
        .expect("Failed to send upgrade request");
    stream
}

/// Complete the handshake, then leave the socket alone
pub async fn upgrade(addr: SocketAddr) -> TcpStream {
    let mut stream = send_upgrade_request(addr).await;
    let mut head = Vec::new();
    let mut byte = [0u8; 1];

    while !head.ends_with(b"\r\n\r\n") {
        let read = stream.read(&mut byte).await.expect("Failed to read response");
        assert!(read > 0, "connection closed during handshake");
        head.push(byte[0]);
    }

    let head = String::from_utf8_lossy(&head);
    assert!(head.starts_with("HTTP/1.1 101"), "unexpected response: {head}");
    stream
}

/// Read everything the relay still sends until it closes the connection
pub async fn read_until_closed(stream: &mut TcpStream, limit: Duration) -> Vec<u8> {
    let mut received = Vec::new();
    let mut chunk = vec![0u8; 64 * 1024];

    timeout(limit, async {
        loop {
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(read) => received.extend_from_slice(&chunk[..read]),
            }
        }
    })
    .await
    .expect("relay kept the connection open");

    received
}
