//! Domain entities: players and rooms.

use super::{
    error::RoomError,
    value_object::{PlayerId, PlayerName, RoomId, Timestamp},
};

/// A player in a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: PlayerName,
    pub is_admin: bool,
    pub ready: bool,
    pub joined_at: Timestamp,
}

impl Player {
    /// The player who created the room.
    pub fn admin(id: PlayerId, name: PlayerName, joined_at: Timestamp) -> Self {
        Self {
            id,
            name,
            is_admin: true,
            ready: false,
            joined_at,
        }
    }

    pub fn member(id: PlayerId, name: PlayerName, joined_at: Timestamp) -> Self {
        Self {
            id,
            name,
            is_admin: false,
            ready: false,
            joined_at,
        }
    }
}

/// Result of [`Room::join`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// A new player was appended.
    Joined,
    /// The player was already in the room; only the name was updated.
    Rejoined,
}

/// A quiz lobby: an ordered list of players, in join order.
///
/// Exactly one player is admin from creation on; admin status never transfers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub players: Vec<Player>,
    pub created_at: Timestamp,
}

impl Room {
    /// Create a room with `admin` as its only player.
    pub fn new(id: RoomId, admin: Player, created_at: Timestamp) -> Self {
        debug_assert!(admin.is_admin);
        Self {
            id,
            players: vec![admin],
            created_at,
        }
    }

    pub fn admin(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_admin)
    }

    pub fn find_player(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == player_id)
    }

    pub fn contains_player(&self, player_id: &PlayerId) -> bool {
        self.find_player(player_id).is_some()
    }

    pub fn is_admin(&self, player_id: &PlayerId) -> bool {
        self.admin().is_some_and(|admin| &admin.id == player_id)
    }

    /// Add a player, or rename them if `player_id` is already present.
    pub fn join(
        &mut self,
        player_id: PlayerId,
        name: PlayerName,
        joined_at: Timestamp,
    ) -> JoinOutcome {
        if let Some(existing) = self.players.iter_mut().find(|p| p.id == player_id) {
            existing.name = name;
            return JoinOutcome::Rejoined;
        }
        self.players.push(Player::member(player_id, name, joined_at));
        JoinOutcome::Joined
    }

    pub fn set_ready(&mut self, player_id: &PlayerId, ready: bool) -> Result<(), RoomError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| &p.id == player_id)
            .ok_or_else(|| RoomError::PlayerNotFound(player_id.to_string()))?;
        player.ready = ready;
        Ok(())
    }

    /// Remove a player, keeping the order of the others.
    pub fn remove_player(&mut self, player_id: &PlayerId) -> Option<Player> {
        let index = self.players.iter().position(|p| &p.id == player_id)?;
        Some(self.players.remove(index))
    }

    /// `true` iff the room has players and every one of them is ready.
    pub fn all_ready(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| p.ready)
    }
}
