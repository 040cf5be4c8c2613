//! WebSocket event DTOs.
//!
//! Every frame on the wire is a JSON object tagged with an `event` field,
//! e.g. `{"event":"add-user","displayName":"mozz"}`. Inbound payload strings
//! are normalized before these types are deserialized.

use serde::{Deserialize, Serialize};

/// Events sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Record a name without claiming feedback (used on page reload).
    #[serde(rename_all = "camelCase")]
    RememberUser { display_name: String },
    /// Ask whether a name is available.
    #[serde(rename_all = "camelCase")]
    CheckUser { display_name: String },
    /// Claim a name.
    #[serde(rename_all = "camelCase")]
    AddUser { display_name: String },
    /// Release a name.
    #[serde(rename_all = "camelCase")]
    LogoutUser { display_name: String },
    GetPublicRooms,
    GetPrivateRooms {
        user: String,
    },
    CreateRoom {
        name: String,
        public: bool,
        user: String,
    },
    OpenRoom {
        room: String,
        user: String,
    },
    AddMember {
        room: String,
        user: String,
    },
    NewMessage {
        room: String,
        content: String,
        user: String,
        /// Display timestamp; filled in server-side when missing or empty.
        #[serde(default)]
        timestamp: String,
    },
}

/// Which listing a `serve-rooms` response carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomListKind {
    Public,
    Private,
}

/// One message as carried in `serve-open-room` payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub content: String,
    pub user: String,
    pub timestamp: String,
}

/// Events sent by the server, either unicast to the requesting session or
/// broadcast to every connected session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ServerEvent {
    #[serde(rename_all = "camelCase")]
    ServeCheckUser {
        available: bool,
        display_name: String,
    },
    #[serde(rename_all = "camelCase")]
    ServeAddedUser {
        display_name: String,
        users: Vec<String>,
    },
    ServeLogoutUser,
    ServeRooms {
        rooms: Vec<String>,
        #[serde(rename = "type")]
        kind: RoomListKind,
    },
    /// Room summary sans message log, announced on creation.
    ServeNewRoom {
        name: String,
        public: bool,
        members: Vec<String>,
    },
    ServeNewRoomFail,
    ServeOpenRoom {
        messages: Vec<MessageDto>,
        members: Vec<String>,
    },
    ServeAddMember {
        room: String,
        members: Vec<String>,
    },
    ServeNewMessage {
        room: String,
        content: String,
        user: String,
        timestamp: String,
    },
    /// Generic rejection of one malformed inbound event.
    ServeError {
        reason: String,
    },
}
