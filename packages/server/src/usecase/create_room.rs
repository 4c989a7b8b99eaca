//! UseCase: Room 作成処理
//!
//! 既に同じ ID の Room が存在する場合は作成を拒否する（既存 Room の参加者を
//! 置き去りにしないため、上書きはしない）。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, Player, PlayerId, PlayerName, Room, RoomId, RoomRepository,
    Timestamp,
};

use super::{broadcast_player_list, error::CreateRoomError};

/// Room 作成のユースケース
pub struct CreateRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl CreateRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Room を作成し、作成者を admin として登録する
    ///
    /// 成功時は作成者の接続を Room グループに参加させ、参加者リストをブロードキャストする。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        player_name: PlayerName,
        player_id: PlayerId,
    ) -> Result<(), CreateRoomError> {
        let now = Timestamp::now();
        let room = Room::new(room_id, Player::admin(player_id, player_name, now), now);

        self.repository
            .create_room(room.clone())
            .await
            .map_err(|_| CreateRoomError::RoomAlreadyExists(room.id.to_string()))?;

        self.message_pusher.join_group(connection_id, &room.id).await;
        broadcast_player_list(self.message_pusher.as_ref(), &room).await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{infrastructure::dto::websocket::ServerMessage, usecase::test_support::*};

    #[tokio::test]
    async fn test_create_room_success() {
        // テスト項目: Room を作成すると作成者だけが未準備の admin として登録される
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let usecase = CreateRoomUseCase::new(repository.clone(), message_pusher.clone());
        let (connection_id, mut rx) = connect(message_pusher.as_ref()).await;

        // when (操作):
        let result = usecase
            .execute(&connection_id, room_id("r1"), player_name("Alice"), player_id("a"))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        let room = repository.get_room(&room_id("r1")).await.unwrap();
        assert_eq!(room.players.len(), 1);
        assert_eq!(room.players[0].id, player_id("a"));
        assert_eq!(room.players[0].name.as_str(), "Alice");
        assert!(room.players[0].is_admin);
        assert!(!room.players[0].ready);

        // 作成者の接続に参加者リストが届く
        let messages = drain(&mut rx);
        assert_eq!(messages.len(), 1);
        assert!(matches!(
            &messages[0],
            ServerMessage::PlayerList { room_id, players } if room_id == "r1" && players.len() == 1
        ));
    }

    #[tokio::test]
    async fn test_create_room_rejects_existing_id() {
        // テスト項目: 同じ ID の Room は作成できず、既存の参加者は残る
        // given (前提条件):
        let repository = create_test_repository();
        let message_pusher = create_test_message_pusher();
        let usecase = CreateRoomUseCase::new(repository.clone(), message_pusher.clone());
        let (alice_conn, _alice_rx) = connect(message_pusher.as_ref()).await;
        let (mallory_conn, mut mallory_rx) = connect(message_pusher.as_ref()).await;
        usecase
            .execute(&alice_conn, room_id("r1"), player_name("Alice"), player_id("a"))
            .await
            .unwrap();

        // when (操作):
        let result = usecase
            .execute(&mallory_conn, room_id("r1"), player_name("Mallory"), player_id("m"))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(CreateRoomError::RoomAlreadyExists("r1".to_string()))
        );
        let room = repository.get_room(&room_id("r1")).await.unwrap();
        assert_eq!(room.players.len(), 1);
        assert_eq!(room.players[0].id, player_id("a"));
        assert!(drain(&mut mallory_rx).is_empty());
        assert_eq!(message_pusher.group_size(&room_id("r1")).await, 1);
    }
}
