//! Error taxonomy for the chat server.
//!
//! All of these are reported back to the originating client as a dedicated
//! failure event or an absent-result signal; none crosses the connection
//! boundary as a protocol-level fault.

use thiserror::Error;

use super::SessionId;

/// Display-name registry failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("display name '{0}' is already taken")]
    NameTaken(String),
}

/// Room store failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomError {
    #[error("room '{0}' already exists")]
    NameTaken(String),
    /// Also covers "requester is not a member": a private room is treated as
    /// if it did not exist to non-members.
    #[error("room '{0}' not found")]
    NotFound(String),
}

/// Outbound delivery failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PushError {
    #[error("session '{0}' is not registered")]
    SessionNotFound(SessionId),
    #[error("failed to push message: {0}")]
    PushFailed(String),
}
