//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::common::normalize::normalize_fields;
use crate::domain::SessionId;
use crate::infrastructure::dto::websocket::ClientEvent;
use crate::ui::state::AppState;
use crate::usecase::SessionGateway;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the rx channel and pushes them to
/// the WebSocket sender.
///
/// This handles the outbound flow: events addressed to this session (unicast
/// replies and global broadcasts) arrive on the channel and are written to
/// the socket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the frame to this session
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id: SessionId = Uuid::new_v4();

    // Create a channel for this session to receive outbound events
    let (tx, rx) = mpsc::unbounded_channel();
    state.pusher.register_session(session_id, tx).await;
    tracing::info!("Session '{}' connected and registered", session_id);

    let (sender, mut receiver) = socket.split();

    // Spawn a task to receive events from other sessions and send to this one
    let mut send_task = pusher_loop(rx, sender);

    // Spawn a task to receive events from this session
    let gateway = state.gateway.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch(&gateway, session_id, &text).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", session_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Only the delivery channel is dropped here. A claimed display name is
    // NOT auto-released on disconnect; clients release it with logout-user.
    state.pusher.unregister_session(&session_id).await;
    tracing::info!("Session '{}' disconnected and unregistered", session_id);
}

/// Parse one inbound frame, normalize its payload strings, and hand it to the
/// gateway. A malformed frame is rejected with a `serve-error` unicast and
/// never takes down the handling of other sessions.
async fn dispatch(gateway: &SessionGateway, session_id: SessionId, text: &str) {
    tracing::debug!("Received text: {}", text);

    let mut value: serde_json::Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Failed to parse frame as JSON: {}", e);
            gateway.reject(session_id, "invalid JSON").await;
            return;
        }
    };

    // All string fields of every inbound payload pass through the normalizer
    // before use.
    normalize_fields(&mut value);

    let event: ClientEvent = match serde_json::from_value(value) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Failed to parse event: {}", e);
            gateway
                .reject(session_id, "unrecognized or incomplete event")
                .await;
            return;
        }
    };

    gateway.handle(session_id, event).await;
}
