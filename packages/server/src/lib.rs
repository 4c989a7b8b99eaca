//! Room coordinator for multiplayer quiz lobbies.
//!
//! Players create or join rooms over WebSocket, mark themselves ready, and the
//! room admin starts the game once everyone is ready. A room whose admin
//! disconnects is closed after a grace period unless the admin comes back.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
