//! Server state shared across connection handlers.

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomStore, UserRegistry};
use crate::usecase::SessionGateway;

/// Shared application state
pub struct AppState {
    /// SessionGateway (event handling use case)
    pub gateway: Arc<SessionGateway>,
    /// MessagePusher (outbound delivery abstraction)
    pub pusher: Arc<dyn MessagePusher>,
    /// UserRegistry (active display names)
    pub users: Arc<dyn UserRegistry>,
    /// RoomStore (rooms, memberships, message logs)
    pub rooms: Arc<dyn RoomStore>,
}
