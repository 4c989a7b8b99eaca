//! Domain-level error types.

use thiserror::Error;

/// Validation failure when constructing a value object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{kind} must be at most {max} characters")]
    TooLong { kind: &'static str, max: usize },
}

/// Failure of an operation on a [`Room`](super::Room) entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("player '{0}' is not in the room")]
    PlayerNotFound(String),
}

/// Failure reported by a [`RoomRepository`](super::RoomRepository).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),

    #[error("room '{0}' already exists")]
    RoomAlreadyExists(String),
}

/// Failure reported by a [`MessagePusher`](super::MessagePusher).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),

    #[error("failed to encode message: {0}")]
    Encode(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
