//! Quiz room server: WebSocket endpoint and HTTP API.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
