//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::ui::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint with the current roster and public rooms (for manual testing)
pub async fn debug_state(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let users = state.users.active_users().await;
    let public_rooms = state.rooms.list_public().await;
    Json(serde_json::json!({
        "users": users,
        "publicRooms": public_rooms,
    }))
}
