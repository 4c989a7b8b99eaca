//! Conversion logic between DTOs and domain entities.

use quizroom_shared::time::timestamp_to_rfc3339;

use crate::domain::{Player, Room, RoomEvent};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Entity → WebSocket DTO
// ========================================

impl From<&Player> for dto::PlayerInfo {
    fn from(model: &Player) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            name: model.name.as_str().to_string(),
            is_admin: model.is_admin,
            ready: model.ready,
        }
    }
}

impl From<&RoomEvent> for dto::ServerMessage {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::PlayerList { room_id, players } => Self::PlayerList {
                room_id: room_id.as_str().to_string(),
                players: players.iter().map(dto::PlayerInfo::from).collect(),
            },
            RoomEvent::GameStarted { room_id } => Self::GameStarted {
                room_id: room_id.as_str().to_string(),
            },
            RoomEvent::RoomClosed { room_id } => Self::RoomClosed {
                room_id: room_id.as_str().to_string(),
            },
        }
    }
}

// ========================================
// Domain Entity → HTTP DTO
// ========================================

impl From<&Room> for http::RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            players: room
                .players
                .iter()
                .map(|p| p.name.as_str().to_string())
                .collect(),
            player_count: room.players.len(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<&Player> for http::PlayerDetailDto {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.as_str().to_string(),
            name: player.name.as_str().to_string(),
            is_admin: player.is_admin,
            ready: player.ready,
            joined_at: timestamp_to_rfc3339(player.joined_at.value()),
        }
    }
}

impl From<&Room> for http::RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            players: room.players.iter().map(http::PlayerDetailDto::from).collect(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlayerId, PlayerName, RoomId, Timestamp};

    fn create_test_room() -> Room {
        let mut room = Room::new(
            RoomId::new("r1".to_string()).unwrap(),
            Player::admin(
                PlayerId::new("a".to_string()).unwrap(),
                PlayerName::new("Alice".to_string()).unwrap(),
                Timestamp::new(0),
            ),
            Timestamp::new(0),
        );
        room.join(
            PlayerId::new("b".to_string()).unwrap(),
            PlayerName::new("Bob".to_string()).unwrap(),
            Timestamp::new(1500),
        );
        room
    }

    #[test]
    fn test_player_list_event_to_dto() {
        // テスト項目: PlayerList イベントが参加順を保った DTO に変換される
        // given (前提条件):
        let room = create_test_room();
        let event = RoomEvent::PlayerList {
            room_id: room.id.clone(),
            players: room.players.clone(),
        };

        // when (操作):
        let message = dto::ServerMessage::from(&event);

        // then (期待する結果):
        match message {
            dto::ServerMessage::PlayerList { room_id, players } => {
                assert_eq!(room_id, "r1");
                assert_eq!(players.len(), 2);
                assert_eq!(players[0].id, "a");
                assert!(players[0].is_admin);
                assert_eq!(players[1].name, "Bob");
                assert!(!players[1].is_admin);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_room_closed_event_to_dto() {
        // テスト項目: RoomClosed イベントの変換
        // given (前提条件):
        let event = RoomEvent::RoomClosed {
            room_id: RoomId::new("r1".to_string()).unwrap(),
        };

        // when (操作):
        let message = dto::ServerMessage::from(&event);

        // then (期待する結果):
        assert_eq!(
            message,
            dto::ServerMessage::RoomClosed {
                room_id: "r1".to_string()
            }
        );
    }

    #[test]
    fn test_room_to_http_dtos() {
        // テスト項目: Room が HTTP の概要・詳細 DTO に変換される
        // given (前提条件):
        let room = create_test_room();

        // when (操作):
        let summary = http::RoomSummaryDto::from(&room);
        let detail = http::RoomDetailDto::from(&room);

        // then (期待する結果):
        assert_eq!(summary.players, vec!["Alice".to_string(), "Bob".to_string()]);
        assert_eq!(summary.player_count, 2);
        assert_eq!(summary.created_at, "1970-01-01T00:00:00.000Z");
        assert_eq!(detail.players[1].joined_at, "1970-01-01T00:00:01.500Z");
        assert!(detail.players[0].is_admin);
    }
}
