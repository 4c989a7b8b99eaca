//! UseCase: 参加者リスト取得

use std::sync::Arc;

use crate::domain::{Player, RoomId, RoomRepository};

/// 参加者リスト取得のユースケース
pub struct GetPlayerListUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetPlayerListUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 参加順の参加者リストを返す。Room が無ければ空リスト。
    pub async fn execute(&self, room_id: &RoomId) -> Vec<Player> {
        self.repository
            .get_room(room_id)
            .await
            .map(|room| room.players)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Room, Timestamp},
        usecase::test_support::*,
    };

    #[tokio::test]
    async fn test_get_player_list() {
        // テスト項目: 参加順の参加者リストが返される
        // given (前提条件):
        let repository = create_test_repository();
        let mut room = Room::new(
            room_id("r1"),
            Player::admin(player_id("a"), player_name("Alice"), Timestamp::new(0)),
            Timestamp::new(0),
        );
        room.join(player_id("b"), player_name("Bob"), Timestamp::new(0));
        repository.create_room(room).await.unwrap();
        let usecase = GetPlayerListUseCase::new(repository);

        // when (操作):
        let players = usecase.execute(&room_id("r1")).await;

        // then (期待する結果):
        let ids: Vec<&str> = players.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_get_player_list_missing_room_is_empty() {
        // テスト項目: 存在しない Room は空リストになる（エラーにはならない）
        // given (前提条件):
        let usecase = GetPlayerListUseCase::new(create_test_repository());

        // when (操作):
        let players = usecase.execute(&room_id("nope")).await;

        // then (期待する結果):
        assert!(players.is_empty());
    }
}
