//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, PlayerId, PlayerName, PusherChannel, RoomId, ValueObjectError},
    infrastructure::dto::websocket::{ClientMessage, PlayerInfo, ServerMessage},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// Both broadcasts from the room coordinator and acknowledgements for this
/// connection's own requests go through the same channel, so they reach the
/// client in the order they were produced.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    // 送信先として登録（ブロードキャストはこの tx 経由で届く）
    state.coordinator.connect(connection_id, tx.clone());
    tracing::info!("Connection '{}' opened", connection_id);

    let (sender, mut receiver) = socket.split();

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let text = text.as_str();
                    tracing::debug!("Received text from '{}': {}", connection_id, text);
                    handle_client_message(&state_clone, connection_id, &tx, text).await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.coordinator.disconnect(connection_id);
    tracing::info!("Connection '{}' closed", connection_id);
}

/// クライアントからのフレームを 1 件処理する
///
/// パースできないフレームは無視する。createRoom / joinRoom の入力値が不正な
/// 場合は `success: false` の ack を返す。
async fn handle_client_message(
    state: &AppState,
    connection_id: ConnectionId,
    tx: &PusherChannel,
    text: &str,
) {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!("Ignored malformed frame from '{}': {}", connection_id, e);
            return;
        }
    };

    match message {
        ClientMessage::CreateRoom {
            request_id,
            room_id,
            player_name,
            player_id,
        } => {
            let result = match parse_room_entry(room_id, player_name, player_id) {
                Ok((room_id, player_name, player_id)) => state
                    .coordinator
                    .create_room(connection_id, room_id, player_name, player_id)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            reply(
                tx,
                ServerMessage::CreateRoomAck {
                    request_id,
                    success: result.is_ok(),
                    message: result.err(),
                },
            );
        }
        ClientMessage::JoinRoom {
            request_id,
            room_id,
            player_name,
            player_id,
        } => {
            let result = match parse_room_entry(room_id, player_name, player_id) {
                Ok((room_id, player_name, player_id)) => state
                    .coordinator
                    .join_room(connection_id, room_id, player_name, player_id)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            reply(
                tx,
                ServerMessage::JoinRoomAck {
                    request_id,
                    success: result.is_ok(),
                    message: result.err(),
                },
            );
        }
        ClientMessage::SetReadyStatus {
            room_id,
            player_id,
            ready,
        } => match (RoomId::new(room_id), PlayerId::new(player_id)) {
            (Ok(room_id), Ok(player_id)) => {
                state.coordinator.set_ready_status(room_id, player_id, ready)
            }
            _ => tracing::debug!("Ignored setReadyStatus with invalid ids"),
        },
        ClientMessage::StartGame { room_id } => match RoomId::new(room_id) {
            Ok(room_id) => state.coordinator.start_game(connection_id, room_id),
            Err(e) => tracing::debug!("Ignored startGame: {}", e),
        },
        ClientMessage::GetPlayerList {
            request_id,
            room_id,
        } => {
            let players = match RoomId::new(room_id) {
                Ok(room_id) => state.coordinator.get_player_list(room_id).await,
                Err(_) => Vec::new(),
            };
            reply(
                tx,
                ServerMessage::PlayerListAck {
                    request_id,
                    players: players.iter().map(PlayerInfo::from).collect(),
                },
            );
        }
    }
}

fn parse_room_entry(
    room_id: String,
    player_name: String,
    player_id: String,
) -> Result<(RoomId, PlayerName, PlayerId), ValueObjectError> {
    Ok((
        RoomId::new(room_id)?,
        PlayerName::new(player_name)?,
        PlayerId::new(player_id)?,
    ))
}

fn reply(tx: &PusherChannel, message: ServerMessage) {
    match serde_json::to_string(&message) {
        Ok(json) => {
            if tx.send(json).is_err() {
                tracing::debug!("Connection closed before acknowledgement was sent");
            }
        }
        Err(e) => tracing::warn!("Failed to encode acknowledgement: {}", e),
    }
}
