//! MessagePusher trait definition.
//!
//! The use-case layer depends on this interface to deliver outbound events;
//! the WebSocket implementation lives in the infrastructure layer.

use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::PushError;

/// Identifier of one connected session. Independent of the display name: a
/// session may not have claimed a name yet.
pub type SessionId = Uuid;

/// Channel used to hand outbound JSON frames to a session's socket task.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a newly connected session.
    async fn register_session(&self, session_id: SessionId, sender: PusherChannel);

    /// Drop a session on disconnect.
    async fn unregister_session(&self, session_id: &SessionId);

    /// Unicast: deliver to one session only.
    async fn push_to(&self, session_id: &SessionId, content: &str) -> Result<(), PushError>;

    /// Broadcast: deliver to every connected session, the sender included.
    /// Partial delivery failures are tolerated.
    async fn broadcast_all(&self, content: &str) -> Result<(), PushError>;
}
