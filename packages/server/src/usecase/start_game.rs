//! UseCase: ゲーム開始
//!
//! admin として紐付いた接続からの要求で、かつ全員が準備完了の場合のみ
//! `GameStarted` をブロードキャストする。ゲーム内容の進行はこの層の責務外。

use std::sync::Arc;

use crate::domain::{MessagePusher, PlayerId, RoomEvent, RoomId, RoomRepository};

use super::error::StartGameError;

/// ゲーム開始のユースケース
pub struct StartGameUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl StartGameUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ゲーム開始を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象の Room
    /// * `caller` - 要求元の接続に紐付いた player_id（紐付けが無ければ `None`）
    pub async fn execute(
        &self,
        room_id: &RoomId,
        caller: Option<&PlayerId>,
    ) -> Result<(), StartGameError> {
        let room = self
            .repository
            .get_room(room_id)
            .await
            .map_err(|_| StartGameError::RoomNotFound(room_id.to_string()))?;

        match (room.admin(), caller) {
            (Some(admin), Some(caller)) if &admin.id == caller => {}
            _ => return Err(StartGameError::Unauthorized),
        }

        if !room.all_ready() {
            return Err(StartGameError::PreconditionNotMet);
        }

        let event = RoomEvent::GameStarted {
            room_id: room.id.clone(),
        };
        if let Err(e) = self.message_pusher.broadcast(&event).await {
            tracing::warn!("Failed to broadcast game start for '{}': {}", room.id, e);
        }
        tracing::info!("Game started in room '{}'", room.id);

        Ok(())
    }
}
