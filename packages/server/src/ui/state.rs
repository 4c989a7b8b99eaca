//! Server state shared by every handler.

use std::sync::Arc;

use crate::usecase::{CoordinatorHandle, GetRoomDetailUseCase, GetRoomsUseCase};

/// Shared application state
pub struct AppState {
    /// Room 状態を変更する唯一の入口
    pub coordinator: CoordinatorHandle,
    /// GetRoomsUseCase（Room 一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（Room 詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
