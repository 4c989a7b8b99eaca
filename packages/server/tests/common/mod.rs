//! Shared helpers for in-process server tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use quizroom_server::{
    infrastructure::{
        dto::websocket::ServerMessage, message_pusher::WebSocketMessagePusher,
        repository::InMemoryRoomRepository,
    },
    ui::Server,
    usecase::{GetRoomDetailUseCase, GetRoomsUseCase, RoomCoordinator},
};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Start a server on an ephemeral port and return its address
pub async fn start_server() -> SocketAddr {
    let repository = Arc::new(InMemoryRoomRepository::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let (coordinator, _task) = RoomCoordinator::new(repository.clone(), message_pusher).spawn();
    let server = Server::new(
        coordinator,
        Arc::new(GetRoomsUseCase::new(repository.clone())),
        Arc::new(GetRoomDetailUseCase::new(repository)),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to get local address");
    tokio::spawn(server.serve(listener));
    addr
}

/// WebSocket client used by the tests
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn connect(addr: SocketAddr) -> Self {
        let (stream, _) = connect_async(format!("ws://{}/ws", addr))
            .await
            .expect("Failed to connect");
        Self { stream }
    }

    pub async fn send(&mut self, frame: serde_json::Value) {
        self.stream
            .send(Message::Text(frame.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    /// Wait for the next text frame from the server
    pub async fn recv(&mut self) -> ServerMessage {
        loop {
            let message = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for a frame")
                .expect("Connection closed")
                .expect("WebSocket error");
            if let Message::Text(text) = message {
                return serde_json::from_str(text.as_str()).expect("Unexpected frame");
            }
        }
    }

    /// Assert that nothing arrives within a short window
    pub async fn expect_silence(&mut self) {
        let result = tokio::time::timeout(Duration::from_millis(200), self.stream.next()).await;
        assert!(result.is_err(), "unexpected frame: {:?}", result);
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }

    /// Create a room and consume the broadcast and ack
    pub async fn create_room(&mut self, room_id: &str, name: &str, player_id: &str) {
        self.send(serde_json::json!({
            "type": "createRoom",
            "roomId": room_id,
            "playerName": name,
            "playerId": player_id,
        }))
        .await;
        assert!(matches!(self.recv().await, ServerMessage::PlayerList { .. }));
        assert!(matches!(
            self.recv().await,
            ServerMessage::CreateRoomAck { success: true, .. }
        ));
    }

    /// Join a room and consume the broadcast and ack
    pub async fn join_room(&mut self, room_id: &str, name: &str, player_id: &str) {
        self.send(serde_json::json!({
            "type": "joinRoom",
            "roomId": room_id,
            "playerName": name,
            "playerId": player_id,
        }))
        .await;
        assert!(matches!(self.recv().await, ServerMessage::PlayerList { .. }));
        assert!(matches!(
            self.recv().await,
            ServerMessage::JoinRoomAck { success: true, .. }
        ));
    }
}
