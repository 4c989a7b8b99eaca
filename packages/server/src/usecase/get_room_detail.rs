//! UseCase: Room 詳細取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRepository};

use super::error::GetRoomDetailError;

/// Room 詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, room_id: String) -> Result<Room, GetRoomDetailError> {
        let room_id = RoomId::new(room_id.clone())
            .map_err(|_| GetRoomDetailError::InvalidRoomId(room_id))?;

        self.repository
            .get_room(&room_id)
            .await
            .map_err(|_| GetRoomDetailError::RoomNotFound(room_id.into_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Player, Timestamp},
        usecase::test_support::*,
    };

    #[tokio::test]
    async fn test_get_room_detail() {
        // テスト項目: 既存の Room の詳細を取得できる
        // given (前提条件):
        let repository = create_test_repository();
        let room = Room::new(
            room_id("r1"),
            Player::admin(player_id("a"), player_name("Alice"), Timestamp::new(0)),
            Timestamp::new(0),
        );
        repository.create_room(room.clone()).await.unwrap();
        let usecase = GetRoomDetailUseCase::new(repository);

        // when (操作):
        let result = usecase.execute("r1".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(room));
    }

    #[tokio::test]
    async fn test_get_room_detail_errors() {
        // テスト項目: 存在しない Room と不正な ID はそれぞれのエラーになる
        // given (前提条件):
        let usecase = GetRoomDetailUseCase::new(create_test_repository());

        // when (操作):
        let missing = usecase.execute("nope".to_string()).await;
        let invalid = usecase.execute("   ".to_string()).await;

        // then (期待する結果):
        assert_eq!(
            missing,
            Err(GetRoomDetailError::RoomNotFound("nope".to_string()))
        );
        assert_eq!(
            invalid,
            Err(GetRoomDetailError::InvalidRoomId("   ".to_string()))
        );
    }
}
