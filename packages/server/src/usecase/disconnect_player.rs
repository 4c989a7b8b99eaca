//! UseCase: プレイヤー切断処理
//!
//! 切断した接続が参加していた Room ごとに処理する。
//! 非 admin のプレイヤーはその Room から即座に取り除く。
//! admin は Room に残したまま、猶予期間の対象となる Room を呼び出し元へ返す
//! （猶予期間のタイマーは RoomCoordinator が管理する）。

use std::sync::Arc;

use crate::domain::{MessagePusher, PlayerId, RoomId, RoomRepository};

use super::broadcast_player_list;

/// プレイヤー切断のユースケース
pub struct DisconnectPlayerUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectPlayerUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// `rooms` の各 Room からプレイヤーの切断を処理する
    ///
    /// # Returns
    ///
    /// `rooms` のうち、プレイヤーが admin である Room の ID リスト
    pub async fn execute(&self, player_id: &PlayerId, rooms: &[RoomId]) -> Vec<RoomId> {
        let mut admin_rooms = Vec::new();

        for room_id in rooms {
            let Ok(mut room) = self.repository.get_room(room_id).await else {
                continue;
            };
            if room.is_admin(player_id) {
                admin_rooms.push(room.id.clone());
                continue;
            }
            if room.remove_player(player_id).is_none() {
                continue;
            }

            if let Err(e) = self.repository.update_room(room.clone()).await {
                tracing::warn!("Failed to remove '{}' from '{}': {}", player_id, room.id, e);
                continue;
            }
            tracing::info!("Player '{}' removed from room '{}'", player_id, room.id);
            broadcast_player_list(self.message_pusher.as_ref(), &room).await;
        }

        admin_rooms
    }
}
