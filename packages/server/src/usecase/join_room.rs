//! UseCase: Room 参加処理
//!
//! 同じ player_id での再参加は名前の更新のみ行う（再接続時の冪等な再参加）。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, JoinOutcome, MessagePusher, PlayerId, PlayerName, RoomId, RoomRepository,
    Timestamp,
};

use super::{broadcast_player_list, error::JoinRoomError};

/// Room 参加のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Room に参加（または再参加）する
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 新規参加か再参加か
    /// * `Err(JoinRoomError::RoomNotFound)` - Room が存在しない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        player_name: PlayerName,
        player_id: PlayerId,
    ) -> Result<JoinOutcome, JoinRoomError> {
        let mut room = self
            .repository
            .get_room(&room_id)
            .await
            .map_err(|_| JoinRoomError::RoomNotFound(room_id.to_string()))?;

        let outcome = room.join(player_id, player_name, Timestamp::now());

        self.repository
            .update_room(room.clone())
            .await
            .map_err(|_| JoinRoomError::RoomNotFound(room_id.to_string()))?;

        self.message_pusher.join_group(connection_id, &room.id).await;
        broadcast_player_list(self.message_pusher.as_ref(), &room).await;

        Ok(outcome)
    }
}
