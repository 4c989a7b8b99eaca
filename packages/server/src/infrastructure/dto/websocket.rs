//! WebSocket frame DTOs.
//!
//! Every frame is a JSON object tagged by a camelCase `type` field.

use serde::{Deserialize, Serialize};

/// Player as seen by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub id: String,
    pub name: String,
    pub is_admin: bool,
    pub ready: bool,
}

/// Client → server frames.
///
/// `request_id` is echoed back in the matching acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    CreateRoom {
        request_id: Option<u64>,
        room_id: String,
        player_name: String,
        player_id: String,
    },
    JoinRoom {
        request_id: Option<u64>,
        room_id: String,
        player_name: String,
        player_id: String,
    },
    SetReadyStatus {
        room_id: String,
        player_id: String,
        ready: bool,
    },
    StartGame {
        room_id: String,
    },
    GetPlayerList {
        request_id: Option<u64>,
        room_id: String,
    },
}

/// Server → client frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    CreateRoomAck {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<u64>,
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    JoinRoomAck {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<u64>,
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    PlayerListAck {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<u64>,
        players: Vec<PlayerInfo>,
    },
    PlayerList {
        room_id: String,
        players: Vec<PlayerInfo>,
    },
    GameStarted {
        room_id: String,
    },
    RoomClosed {
        room_id: String,
    },
}
