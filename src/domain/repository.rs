//! Registry and store trait definitions.
//!
//! The interfaces the use-case layer depends on for shared mutable state.
//! Implementations must make every read-modify-write sequence atomic with
//! respect to concurrent callers (check-and-set under one lock acquisition);
//! the in-memory implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::{ChatMessage, RegistryError, Room, RoomError, Visibility};

/// The set of currently active display names.
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Idempotently record a name. No feedback, no effect when present.
    async fn remember(&self, name: String);

    /// True iff the name is not currently registered.
    async fn is_available(&self, name: &str) -> bool;

    /// Atomically check availability and register. Returns the full roster on
    /// success so callers can display it.
    async fn claim(&self, name: String) -> Result<Vec<String>, RegistryError>;

    /// Remove a name; no-op when absent.
    async fn release(&self, name: &str);

    /// Snapshot of all active names, in registration order.
    async fn active_users(&self) -> Vec<String>;
}

/// The collection of rooms, keyed uniquely by name.
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Names of all public rooms.
    async fn list_public(&self) -> Vec<String>;

    /// Names of the private rooms `user` is a member of. Public rooms are
    /// never returned here.
    async fn list_private_for(&self, user: &str) -> Vec<String>;

    /// Create a room. Fails when the name is taken (case-sensitive exact
    /// match). A private room starts with the creator as its sole member.
    async fn create(
        &self,
        name: String,
        visibility: Visibility,
        creator: String,
    ) -> Result<Room, RoomError>;

    /// Message log and member list of a room. A private room is only opened
    /// for its members; to anyone else it is indistinguishable from a missing
    /// room. Public rooms report an empty member list.
    async fn open(
        &self,
        name: &str,
        requester: &str,
    ) -> Result<(Vec<ChatMessage>, Vec<String>), RoomError>;

    /// Add a member to a room; idempotent. Returns the member list after the
    /// add, unchanged when the user was already a member.
    async fn add_member(&self, room_name: &str, user: String) -> Result<Vec<String>, RoomError>;

    /// Append a message to a room's history, evicting the oldest entries past
    /// the history limit.
    async fn append_message(&self, room_name: &str, message: ChatMessage)
    -> Result<(), RoomError>;
}
