//! UseCase: Room 一覧取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{Room, RoomRepository};

/// Room 一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 全ての Room を ID 順で返す
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.get_rooms().await
    }
}
