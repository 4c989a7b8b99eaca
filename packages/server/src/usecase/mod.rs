//! UseCase layer: one use case per room operation, plus the coordinator that
//! serializes them.

mod close_room;
mod coordinator;
mod create_room;
mod disconnect_player;
mod error;
mod get_player_list;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod set_ready_status;
mod start_game;

pub use close_room::CloseRoomUseCase;
pub use coordinator::{ADMIN_GRACE_PERIOD, CoordinatorHandle, RoomCoordinator};
pub use create_room::CreateRoomUseCase;
pub use disconnect_player::DisconnectPlayerUseCase;
pub use error::{
    CreateRoomError, GetRoomDetailError, JoinRoomError, SetReadyStatusError, StartGameError,
};
pub use get_player_list::GetPlayerListUseCase;
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use set_ready_status::SetReadyStatusUseCase;
pub use start_game::StartGameUseCase;

use crate::domain::{MessagePusher, Room, RoomEvent};

/// Room の最新の参加者リストをグループへブロードキャストする
///
/// 送信失敗は状態遷移を巻き戻さないため、ログに残すだけにする。
async fn broadcast_player_list(message_pusher: &dyn MessagePusher, room: &Room) {
    let event = RoomEvent::PlayerList {
        room_id: room.id.clone(),
        players: room.players.clone(),
    };
    if let Err(e) = message_pusher.broadcast(&event).await {
        tracing::warn!("Failed to broadcast player list for '{}': {}", room.id, e);
    }
}
