//! Domain layer: entities, value objects and the ports the use cases depend on.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{JoinOutcome, Player, Room};
pub use error::{MessagePushError, RepositoryError, RoomError, ValueObjectError};
pub use event::RoomEvent;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::RoomRepository;
pub use value_object::{ConnectionId, PlayerId, PlayerName, RoomId, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
