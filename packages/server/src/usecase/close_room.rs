//! UseCase: Room の終了
//!
//! Room を削除し、グループに `RoomClosed` を通知してからグループを解散する。

use std::sync::Arc;

use crate::domain::{MessagePusher, RepositoryError, RoomEvent, RoomId, RoomRepository};

/// Room 終了のユースケース
pub struct CloseRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl CloseRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    pub async fn execute(&self, room_id: &RoomId) -> Result<(), RepositoryError> {
        self.repository.delete_room(room_id).await?;

        let event = RoomEvent::RoomClosed {
            room_id: room_id.clone(),
        };
        if let Err(e) = self.message_pusher.broadcast(&event).await {
            tracing::warn!("Failed to broadcast room closure for '{}': {}", room_id, e);
        }
        self.message_pusher.dissolve_group(room_id).await;

        tracing::info!("Room '{}' closed", room_id);
        Ok(())
    }
}
