//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{RepositoryError, Room, RoomId};

/// Room Repository trait
///
/// 全ての Room を保持するストアへのインターフェース。
/// 返される Room はスナップショット（clone）であり、変更は `update_room` で書き戻す。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Room を新規登録（同じ ID の Room が既にあればエラー）
    async fn create_room(&self, room: Room) -> Result<(), RepositoryError>;

    /// Room を取得
    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// 既存の Room を上書き
    async fn update_room(&self, room: Room) -> Result<(), RepositoryError>;

    /// Room を削除し、削除した Room を返す
    async fn delete_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// 全ての Room を ID 順で取得
    async fn get_rooms(&self) -> Vec<Room>;
}
