//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。プロセス再起動で全ての Room は失われます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RepositoryError, Room, RoomId, RoomRepository};

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// Key: RoomId, Value: Room ドメインモデル
    rooms: Mutex<HashMap<RoomId, Room>>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(&self, room: Room) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.contains_key(&room.id) {
            return Err(RepositoryError::RoomAlreadyExists(room.id.into_string()));
        }
        rooms.insert(room.id.clone(), room);
        Ok(())
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.to_string()))
    }

    async fn update_room(&self, room: Room) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        match rooms.get_mut(&room.id) {
            Some(stored) => {
                *stored = room;
                Ok(())
            }
            None => Err(RepositoryError::RoomNotFound(room.id.into_string())),
        }
    }

    async fn delete_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        rooms
            .remove(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.to_string()))
    }

    async fn get_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut result: Vec<Room> = rooms.values().cloned().collect();
        result.sort_by(|a, b| a.id.cmp(&b.id));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Player, PlayerId, PlayerName, Timestamp};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomRepository の基本的な CRUD 操作
    // - 同じ ID の Room の重複作成が拒否されること
    //
    // 【どのようなシナリオをテストするか】
    // 1. Room 作成と取得
    // 2. 重複作成のエラー
    // 3. 更新・削除（存在しない Room を含む）
    // ========================================

    fn room(room_id: &str, admin_id: &str) -> Room {
        Room::new(
            RoomId::new(room_id.to_string()).unwrap(),
            Player::admin(
                PlayerId::new(admin_id.to_string()).unwrap(),
                PlayerName::new("Admin".to_string()).unwrap(),
                Timestamp::new(1000),
            ),
            Timestamp::new(1000),
        )
    }

    fn room_id(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_room() {
        // テスト項目: 作成した Room を取得できる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();

        // when (操作):
        let result = repo.create_room(room("r1", "a")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let stored = repo.get_room(&room_id("r1")).await.unwrap();
        assert_eq!(stored.players.len(), 1);
        assert_eq!(stored.players[0].id.as_str(), "a");
    }

    #[tokio::test]
    async fn test_create_room_rejects_duplicate() {
        // テスト項目: 同じ ID の Room は作成できず、既存の Room は変更されない
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        repo.create_room(room("r1", "a")).await.unwrap();

        // when (操作):
        let result = repo.create_room(room("r1", "z")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::RoomAlreadyExists("r1".to_string()))
        );
        let stored = repo.get_room(&room_id("r1")).await.unwrap();
        assert_eq!(stored.players[0].id.as_str(), "a");
    }

    #[tokio::test]
    async fn test_get_missing_room() {
        // テスト項目: 存在しない Room の取得はエラーになる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();

        // when (操作):
        let result = repo.get_room(&room_id("nope")).await;

        // then (期待する結果):
        assert_eq!(result, Err(RepositoryError::RoomNotFound("nope".to_string())));
    }

    #[tokio::test]
    async fn test_update_room() {
        // テスト項目: 取得した Room を変更して書き戻せる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        repo.create_room(room("r1", "a")).await.unwrap();
        let mut stored = repo.get_room(&room_id("r1")).await.unwrap();
        stored
            .set_ready(&PlayerId::new("a".to_string()).unwrap(), true)
            .unwrap();

        // when (操作):
        let result = repo.update_room(stored).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(repo.get_room(&room_id("r1")).await.unwrap().players[0].ready);
    }

    #[tokio::test]
    async fn test_update_missing_room() {
        // テスト項目: 削除済みの Room への書き戻しは再作成せずエラーになる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();

        // when (操作):
        let result = repo.update_room(room("ghost", "a")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(RepositoryError::RoomNotFound(_))));
        assert!(repo.get_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_room() {
        // テスト項目: Room を削除すると以後取得できない
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        repo.create_room(room("r1", "a")).await.unwrap();

        // when (操作):
        let deleted = repo.delete_room(&room_id("r1")).await;
        let deleted_again = repo.delete_room(&room_id("r1")).await;

        // then (期待する結果):
        assert_eq!(deleted.unwrap().id.as_str(), "r1");
        assert!(deleted_again.is_err());
        assert!(repo.get_room(&room_id("r1")).await.is_err());
    }

    #[tokio::test]
    async fn test_get_rooms_sorted_by_id() {
        // テスト項目: Room 一覧は ID 順で返される
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        repo.create_room(room("charlie", "c")).await.unwrap();
        repo.create_room(room("alpha", "a")).await.unwrap();
        repo.create_room(room("bravo", "b")).await.unwrap();

        // when (操作):
        let rooms = repo.get_rooms().await;

        // then (期待する結果):
        let ids: Vec<&str> = rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "bravo", "charlie"]);
    }
}
