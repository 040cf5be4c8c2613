//! UseCase: session event handling.
//!
//! One method per inbound event. Side effects are either **unicast** (reply
//! to the originating session only) or **broadcast** (fan out to every
//! connected session). Room-scoped events deliberately fan out globally and
//! rely on clients to filter by room name; scoping delivery to room members
//! would need a subscription model the protocol does not have.
//!
//! There is no enforced session state machine: an event does not require a
//! prior name claim, although clients claim a name first in practice.

use std::sync::Arc;

use crate::common::time::now_chat_timestamp;
use crate::domain::{
    ChatMessage, MessagePusher, RoomStore, SessionId, UserRegistry, Visibility,
};
use crate::infrastructure::dto::websocket::{ClientEvent, MessageDto, RoomListKind, ServerEvent};

/// Connection-handling layer between the wire protocol and the domain state.
pub struct SessionGateway {
    users: Arc<dyn UserRegistry>,
    rooms: Arc<dyn RoomStore>,
    pusher: Arc<dyn MessagePusher>,
}

impl SessionGateway {
    pub fn new(
        users: Arc<dyn UserRegistry>,
        rooms: Arc<dyn RoomStore>,
        pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            users,
            rooms,
            pusher,
        }
    }

    /// Dispatch one inbound event for the given session.
    pub async fn handle(&self, session_id: SessionId, event: ClientEvent) {
        match event {
            ClientEvent::RememberUser { display_name } => self.remember_user(display_name).await,
            ClientEvent::CheckUser { display_name } => {
                self.check_user(session_id, display_name).await;
            }
            ClientEvent::AddUser { display_name } => {
                self.add_user(session_id, display_name).await;
            }
            ClientEvent::LogoutUser { display_name } => {
                self.logout_user(session_id, display_name).await;
            }
            ClientEvent::GetPublicRooms => self.get_public_rooms(session_id).await,
            ClientEvent::GetPrivateRooms { user } => {
                self.get_private_rooms(session_id, user).await;
            }
            ClientEvent::CreateRoom { name, public, user } => {
                self.create_room(session_id, name, public, user).await;
            }
            ClientEvent::OpenRoom { room, user } => self.open_room(session_id, room, user).await,
            ClientEvent::AddMember { room, user } => self.add_member(room, user).await,
            ClientEvent::NewMessage {
                room,
                content,
                user,
                timestamp,
            } => self.new_message(room, content, user, timestamp).await,
        }
    }

    /// Reject one malformed inbound event. The session and the rest of the
    /// process keep running.
    pub async fn reject(&self, session_id: SessionId, reason: &str) {
        self.unicast(
            session_id,
            &ServerEvent::ServeError {
                reason: reason.to_string(),
            },
        )
        .await;
    }

    async fn remember_user(&self, display_name: String) {
        self.users.remember(display_name).await;
    }

    async fn check_user(&self, session_id: SessionId, display_name: String) {
        let available = self.users.is_available(&display_name).await;
        self.unicast(
            session_id,
            &ServerEvent::ServeCheckUser {
                available,
                display_name,
            },
        )
        .await;
    }

    async fn add_user(&self, session_id: SessionId, display_name: String) {
        match self.users.claim(display_name.clone()).await {
            Ok(users) => {
                tracing::info!("User '{}' claimed a display name", display_name);
                self.unicast(
                    session_id,
                    &ServerEvent::ServeAddedUser {
                        display_name,
                        users,
                    },
                )
                .await;
            }
            // Absent-result signal: a rejected claim gets no response event.
            Err(e) => tracing::debug!("Name claim rejected: {}", e),
        }
    }

    async fn logout_user(&self, session_id: SessionId, display_name: String) {
        self.users.release(&display_name).await;
        tracing::info!("User '{}' logged out", display_name);
        self.unicast(session_id, &ServerEvent::ServeLogoutUser).await;
    }

    async fn get_public_rooms(&self, session_id: SessionId) {
        let rooms = self.rooms.list_public().await;
        self.unicast(
            session_id,
            &ServerEvent::ServeRooms {
                rooms,
                kind: RoomListKind::Public,
            },
        )
        .await;
    }

    async fn get_private_rooms(&self, session_id: SessionId, user: String) {
        let rooms = self.rooms.list_private_for(&user).await;
        self.unicast(
            session_id,
            &ServerEvent::ServeRooms {
                rooms,
                kind: RoomListKind::Private,
            },
        )
        .await;
    }

    async fn create_room(&self, session_id: SessionId, name: String, public: bool, user: String) {
        match self
            .rooms
            .create(name, Visibility::from(public), user)
            .await
        {
            Ok(room) => {
                tracing::info!("Room '{}' created", room.name);
                let summary = ServerEvent::ServeNewRoom {
                    name: room.name,
                    public,
                    members: room.members.clone(),
                };
                // Announcement scope follows the visibility flag: public
                // rooms are announced to everyone, private ones only to the
                // creator.
                if public {
                    self.broadcast(&summary).await;
                } else {
                    self.unicast(session_id, &summary).await;
                }
                self.unicast(
                    session_id,
                    &ServerEvent::ServeOpenRoom {
                        messages: Vec::new(),
                        members: room.members,
                    },
                )
                .await;
            }
            Err(e) => {
                tracing::debug!("Room creation rejected: {}", e);
                self.unicast(session_id, &ServerEvent::ServeNewRoomFail).await;
            }
        }
    }

    async fn open_room(&self, session_id: SessionId, room: String, user: String) {
        // A missing room and a forbidden private room collapse into the same
        // empty payload; neither existence nor content is leaked.
        let (messages, members) = self.rooms.open(&room, &user).await.unwrap_or_default();
        let messages = messages.into_iter().map(MessageDto::from).collect();
        self.unicast(
            session_id,
            &ServerEvent::ServeOpenRoom { messages, members },
        )
        .await;
    }

    async fn add_member(&self, room: String, user: String) {
        match self.rooms.add_member(&room, user).await {
            // Membership changes announce to every connected session.
            Ok(members) => {
                self.broadcast(&ServerEvent::ServeAddMember { room, members })
                    .await;
            }
            Err(e) => tracing::warn!("add-member ignored: {}", e),
        }
    }

    async fn new_message(&self, room: String, content: String, user: String, timestamp: String) {
        let timestamp = if timestamp.is_empty() {
            now_chat_timestamp()
        } else {
            timestamp
        };

        let message = ChatMessage {
            content: content.clone(),
            author: user.clone(),
            timestamp: timestamp.clone(),
        };
        if let Err(e) = self.rooms.append_message(&room, message).await {
            // Dropped silently; the echo below still goes out.
            tracing::debug!("Message not stored: {}", e);
        }

        self.broadcast(&ServerEvent::ServeNewMessage {
            room,
            content,
            user,
            timestamp,
        })
        .await;
    }

    async fn unicast(&self, session_id: SessionId, event: &ServerEvent) {
        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize server event: {}", e);
                return;
            }
        };
        if let Err(e) = self.pusher.push_to(&session_id, &json).await {
            tracing::warn!("Failed to unicast to session '{}': {}", session_id, e);
        }
    }

    async fn broadcast(&self, event: &ServerEvent) {
        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize server event: {}", e);
                return;
            }
        };
        if let Err(e) = self.pusher.broadcast_all(&json).await {
            tracing::warn!("Failed to broadcast: {}", e);
        }
    }
}
