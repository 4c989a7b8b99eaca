//! UseCase: 準備状態の変更
//!
//! 呼び出し元の接続が player_id の持ち主かどうかは検証しない（クライアントが
//! 送ってきた player_id をそのまま信頼する）。

use std::sync::Arc;

use crate::domain::{MessagePusher, PlayerId, RoomError, RoomId, RoomRepository};

use super::{broadcast_player_list, error::SetReadyStatusError};

/// 準備状態変更のユースケース
pub struct SetReadyStatusUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl SetReadyStatusUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    pub async fn execute(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
        ready: bool,
    ) -> Result<(), SetReadyStatusError> {
        let mut room = self
            .repository
            .get_room(room_id)
            .await
            .map_err(|_| SetReadyStatusError::RoomNotFound(room_id.to_string()))?;

        room.set_ready(player_id, ready).map_err(|e| match e {
            RoomError::PlayerNotFound(id) => SetReadyStatusError::PlayerNotFound(id),
        })?;

        self.repository
            .update_room(room.clone())
            .await
            .map_err(|_| SetReadyStatusError::RoomNotFound(room_id.to_string()))?;

        broadcast_player_list(self.message_pusher.as_ref(), &room).await;

        Ok(())
    }
}
