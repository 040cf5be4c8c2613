//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::domain::{MessagePusher, RoomStore, UserRegistry};
use crate::usecase::SessionGateway;

use super::{
    handler::{
        http::{debug_state, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat server
///
/// Encapsulates the wired dependencies and runs the axum router.
pub struct Server {
    gateway: Arc<SessionGateway>,
    pusher: Arc<dyn MessagePusher>,
    users: Arc<dyn UserRegistry>,
    rooms: Arc<dyn RoomStore>,
}

impl Server {
    pub fn new(
        gateway: Arc<SessionGateway>,
        pusher: Arc<dyn MessagePusher>,
        users: Arc<dyn UserRegistry>,
        rooms: Arc<dyn RoomStore>,
    ) -> Self {
        Self {
            gateway,
            pusher,
            users,
            rooms,
        }
    }

    /// Run the chat server.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            gateway: self.gateway,
            pusher: self.pusher,
            users: self.users,
            rooms: self.rooms,
        });

        let app = Router::new()
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/debug/state", get(debug_state))
            .with_state(app_state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
