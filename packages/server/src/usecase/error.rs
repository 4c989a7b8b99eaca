//! UseCase 層のエラー型

use thiserror::Error;

/// Room 作成の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    #[error("Room '{0}' already exists")]
    RoomAlreadyExists(String),

    #[error("Room coordinator is not running")]
    CoordinatorUnavailable,
}

/// Room 参加の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error("Room coordinator is not running")]
    CoordinatorUnavailable,
}

/// 準備状態変更の失敗（呼び出し側では無視される）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetReadyStatusError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error("Player '{0}' not found in room")]
    PlayerNotFound(String),
}

/// ゲーム開始の失敗（呼び出し側では無視される）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartGameError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error("Only the room admin can start the game")]
    Unauthorized,

    #[error("Not every player is ready")]
    PreconditionNotMet,
}

/// Room 詳細取得の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error("Invalid room id: {0}")]
    InvalidRoomId(String),
}
