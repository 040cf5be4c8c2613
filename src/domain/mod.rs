//! Domain model for the chat server.
//!
//! Entities, the error taxonomy, and the interfaces the use-case layer
//! depends on. Concrete implementations live in the infrastructure layer
//! (dependency inversion).

mod entity;
mod error;
mod pusher;
mod repository;

pub use entity::{ChatMessage, MESSAGE_HISTORY_LIMIT, Room, Visibility};
pub use error::{PushError, RegistryError, RoomError};
pub use pusher::{MessagePusher, PusherChannel, SessionId};
pub use repository::{RoomStore, UserRegistry};
