//! Quiz room server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin quizroom-server
//! cargo run --bin quizroom-server -- --host 0.0.0.0 --port 3000 --log-level debug
//! ```

use std::sync::Arc;

use clap::Parser;
use quizroom_server::{
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::Server,
    usecase::{GetRoomDetailUseCase, GetRoomsUseCase, RoomCoordinator},
};
use quizroom_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "quizroom-server")]
#[command(about = "Room coordinator for multiplayer quiz lobbies", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. RoomCoordinator / UseCases
    // 4. Server

    // 1. Create Repository (in-memory database)
    let repository = Arc::new(InMemoryRoomRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Start the coordinator and create read-only UseCases
    let (coordinator, coordinator_task) =
        RoomCoordinator::new(repository.clone(), message_pusher).spawn();
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository));

    // 4. Create and run the server
    let server = Server::new(coordinator, get_rooms_usecase, get_room_detail_usecase);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    coordinator_task.abort();
}
