//! WebSocket implementation of the MessagePusher trait.
//!
//! Owns the map of connected sessions and their outbound channels. Socket
//! creation happens in the UI layer; this implementation only hands frames
//! to each session's channel, from which the socket task drains them.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePusher, PushError, PusherChannel, SessionId};

/// Session-channel map behind a single lock.
#[derive(Default)]
pub struct WebSocketMessagePusher {
    sessions: Mutex<HashMap<SessionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently registered sessions.
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_session(&self, session_id: SessionId, sender: PusherChannel) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session_id, sender);
        tracing::debug!("Session '{}' registered to MessagePusher", session_id);
    }

    async fn unregister_session(&self, session_id: &SessionId) {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(session_id);
        tracing::debug!("Session '{}' unregistered from MessagePusher", session_id);
    }

    async fn push_to(&self, session_id: &SessionId, content: &str) -> Result<(), PushError> {
        let sessions = self.sessions.lock().await;

        if let Some(sender) = sessions.get(session_id) {
            sender
                .send(content.to_string())
                .map_err(|e| PushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to session '{}'", session_id);
            Ok(())
        } else {
            Err(PushError::SessionNotFound(*session_id))
        }
    }

    async fn broadcast_all(&self, content: &str) -> Result<(), PushError> {
        let sessions = self.sessions.lock().await;

        for (session_id, sender) in sessions.iter() {
            // Broadcast tolerates individual delivery failures.
            if let Err(e) = sender.send(content.to_string()) {
                tracing::warn!("Failed to push message to session '{}': {}", session_id, e);
            } else {
                tracing::debug!("Broadcasted message to session '{}'", session_id);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_push_to_success() {
        // given:
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let session_id = Uuid::new_v4();
        pusher.register_session(session_id, tx).await;

        // when:
        let result = pusher.push_to(&session_id, "Hello").await;

        // then:
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("Hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_unknown_session_fails() {
        // given:
        let pusher = WebSocketMessagePusher::new();
        let session_id = Uuid::new_v4();

        // when:
        let result = pusher.push_to(&session_id, "Hello").await;

        // then:
        assert_eq!(result, Err(PushError::SessionNotFound(session_id)));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_session() {
        // given:
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_session(Uuid::new_v4(), tx1).await;
        pusher.register_session(Uuid::new_v4(), tx2).await;

        // when:
        let result = pusher.broadcast_all("Broadcast message").await;

        // then:
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
        assert_eq!(rx2.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_tolerates_closed_channels() {
        // given: one live session, one whose receiver was dropped
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel::<String>();
        drop(rx2);
        pusher.register_session(Uuid::new_v4(), tx1).await;
        pusher.register_session(Uuid::new_v4(), tx2).await;

        // when:
        let result = pusher.broadcast_all("Broadcast message").await;

        // then:
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_unregister_removes_session() {
        // given:
        let pusher = WebSocketMessagePusher::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let session_id = Uuid::new_v4();
        pusher.register_session(session_id, tx).await;
        assert_eq!(pusher.session_count().await, 1);

        // when:
        pusher.unregister_session(&session_id).await;

        // then:
        assert_eq!(pusher.session_count().await, 0);
        assert_eq!(
            pusher.push_to(&session_id, "Hello").await,
            Err(PushError::SessionNotFound(session_id))
        );
    }
}
