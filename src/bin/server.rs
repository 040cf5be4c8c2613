//! Room-based WebSocket chat server.
//!
//! Clients claim display names, browse public and private rooms, and exchange
//! messages fanned out to all connected sessions.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use izba::{
    common::logger::setup_logger,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryRoomStore, InMemoryUserRegistry},
    },
    ui::Server,
    usecase::SessionGateway,
};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Room-based WebSocket chat server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry and store (in-memory state)
    // 2. MessagePusher
    // 3. SessionGateway
    // 4. Server
    let users = Arc::new(InMemoryUserRegistry::new());
    let rooms = Arc::new(InMemoryRoomStore::new());
    let pusher = Arc::new(WebSocketMessagePusher::new());
    let gateway = Arc::new(SessionGateway::new(
        users.clone(),
        rooms.clone(),
        pusher.clone(),
    ));

    let server = Server::new(gateway, pusher, users, rooms);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
