#![allow(dead_code)]

use axum_test::{TestServer, TestWebSocket, WsMessage};
use bytes::Bytes;

/// WebSocket test client wrapper, usable on either listener
pub struct WsTestClient {
    ws: TestWebSocket,
}

impl WsTestClient {
    /// Connect to the listener's root path
    pub async fn connect(server: &TestServer) -> Self {
        Self::connect_path(server, "/").await
    }

    pub async fn connect_path(server: &TestServer, path: &str) -> Self {
        let ws = server.get_websocket(path).await.into_websocket().await;
        Self { ws }
    }

    /// Send binary frame
    pub async fn send_binary(&mut self, data: impl Into<Bytes>) {
        let bytes = data.into();
        self.ws.send_message(WsMessage::Binary(bytes)).await;
    }

    /// Send text frame
    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    /// Receive binary frame
    pub async fn receive_binary(&mut self) -> Bytes {
        self.ws.receive_bytes().await
    }

    /// Receive text frame
    pub async fn receive_text(&mut self) -> String {
        self.ws.receive_text().await
    }

    /// Receive whatever comes next, including close frames
    pub async fn receive_message(&mut self) -> WsMessage {
        self.ws.receive_message().await
    }

    /// Close the WebSocket connection
    pub async fn close(self) {
        self.ws.close().await;
    }
}

/// Connect `count` subscribers
pub async fn connect_subscribers(server: &TestServer, count: usize) -> Vec<WsTestClient> {
    let mut clients = Vec::with_capacity(count);
    for _ in 0..count {
        clients.push(WsTestClient::connect(server).await);
    }
    clients
}
