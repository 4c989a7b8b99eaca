//! Outbound room events, broadcast to every connection in a room group.

use super::{entity::Player, value_object::RoomId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// Membership or readiness changed; carries the full ordered list.
    PlayerList { room_id: RoomId, players: Vec<Player> },
    GameStarted { room_id: RoomId },
    /// Terminal: the admin grace period expired.
    RoomClosed { room_id: RoomId },
}

impl RoomEvent {
    pub fn room_id(&self) -> &RoomId {
        match self {
            Self::PlayerList { room_id, .. }
            | Self::GameStarted { room_id }
            | Self::RoomClosed { room_id } => room_id,
        }
    }
}
