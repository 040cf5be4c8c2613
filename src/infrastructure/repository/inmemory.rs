//! In-memory UserRegistry and RoomStore implementations.
//!
//! State is process-lifetime only. Each trait method takes its tokio `Mutex`
//! exactly once, so every check-then-mutate sequence (claim a name, create a
//! room, append-then-evict) is atomic with respect to concurrent sessions.
//! Vec-backed collections preserve insertion order, matching what clients
//! observe from the rosters and room lists.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, RegistryError, Room, RoomError, RoomStore, UserRegistry, Visibility,
};

/// In-memory set of active display names.
#[derive(Default)]
pub struct InMemoryUserRegistry {
    names: Mutex<Vec<String>>,
}

impl InMemoryUserRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRegistry for InMemoryUserRegistry {
    async fn remember(&self, name: String) {
        let mut names = self.names.lock().await;
        if !names.contains(&name) {
            names.push(name);
        }
    }

    async fn is_available(&self, name: &str) -> bool {
        let names = self.names.lock().await;
        !names.iter().any(|n| n == name)
    }

    async fn claim(&self, name: String) -> Result<Vec<String>, RegistryError> {
        let mut names = self.names.lock().await;
        if names.contains(&name) {
            return Err(RegistryError::NameTaken(name));
        }
        names.push(name);
        Ok(names.clone())
    }

    async fn release(&self, name: &str) {
        let mut names = self.names.lock().await;
        names.retain(|n| n != name);
    }

    async fn active_users(&self) -> Vec<String> {
        let names = self.names.lock().await;
        names.clone()
    }
}

/// In-memory collection of rooms, keyed uniquely by name.
#[derive(Default)]
pub struct InMemoryRoomStore {
    rooms: Mutex<Vec<Room>>,
}

impl InMemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStore for InMemoryRoomStore {
    async fn list_public(&self) -> Vec<String> {
        let rooms = self.rooms.lock().await;
        rooms
            .iter()
            .filter(|room| room.visibility == Visibility::Public)
            .map(|room| room.name.clone())
            .collect()
    }

    async fn list_private_for(&self, user: &str) -> Vec<String> {
        let rooms = self.rooms.lock().await;
        rooms
            .iter()
            .filter(|room| room.visibility == Visibility::Private && room.is_member(user))
            .map(|room| room.name.clone())
            .collect()
    }

    async fn create(
        &self,
        name: String,
        visibility: Visibility,
        creator: String,
    ) -> Result<Room, RoomError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.iter().any(|room| room.name == name) {
            return Err(RoomError::NameTaken(name));
        }
        let room = Room::new(name, visibility, &creator);
        rooms.push(room.clone());
        Ok(room)
    }

    async fn open(
        &self,
        name: &str,
        requester: &str,
    ) -> Result<(Vec<ChatMessage>, Vec<String>), RoomError> {
        let rooms = self.rooms.lock().await;
        let room = rooms
            .iter()
            .find(|room| room.name == name)
            .ok_or_else(|| RoomError::NotFound(name.to_string()))?;

        match room.visibility {
            Visibility::Public => Ok((room.messages.iter().cloned().collect(), Vec::new())),
            Visibility::Private if room.is_member(requester) => Ok((
                room.messages.iter().cloned().collect(),
                room.members.clone(),
            )),
            // Do not leak the room's existence to non-members.
            Visibility::Private => Err(RoomError::NotFound(name.to_string())),
        }
    }

    async fn add_member(&self, room_name: &str, user: String) -> Result<Vec<String>, RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .iter_mut()
            .find(|room| room.name == room_name)
            .ok_or_else(|| RoomError::NotFound(room_name.to_string()))?;

        room.add_member(user);
        Ok(room.members.clone())
    }

    async fn append_message(
        &self,
        room_name: &str,
        message: ChatMessage,
    ) -> Result<(), RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .iter_mut()
            .find(|room| room.name == room_name)
            .ok_or_else(|| RoomError::NotFound(room_name.to_string()))?;

        room.append_message(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MESSAGE_HISTORY_LIMIT;
    use std::sync::Arc;

    fn message(content: &str, author: &str) -> ChatMessage {
        ChatMessage {
            content: content.to_string(),
            author: author.to_string(),
            timestamp: "25 Jan 21:44".to_string(),
        }
    }

    #[tokio::test]
    async fn test_claim_registers_and_returns_roster() {
        // given:
        let registry = InMemoryUserRegistry::new();

        // when:
        let result = registry.claim("mozz".to_string()).await;

        // then:
        assert_eq!(result, Ok(vec!["mozz".to_string()]));
        assert!(!registry.is_available("mozz").await);
    }

    #[tokio::test]
    async fn test_second_claim_of_same_name_fails() {
        // given:
        let registry = InMemoryUserRegistry::new();
        registry.claim("mozz".to_string()).await.unwrap();

        // when: a different session claims the same name
        let result = registry.claim("mozz".to_string()).await;

        // then: the claim fails and the roster still holds the name once
        assert_eq!(result, Err(RegistryError::NameTaken("mozz".to_string())));
        assert_eq!(registry.active_users().await, vec!["mozz".to_string()]);
    }

    #[tokio::test]
    async fn test_concurrent_claims_yield_one_winner() {
        // given:
        let registry = Arc::new(InMemoryUserRegistry::new());

        // when: many sessions race to claim the same name
        let mut handles = Vec::new();
        for _ in 0..16 {
            let registry = registry.clone();
            handles.push(tokio::spawn(
                async move { registry.claim("mozz".to_string()).await },
            ));
        }
        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        // then: exactly one claim succeeds
        assert_eq!(successes, 1);
        assert_eq!(registry.active_users().await, vec!["mozz".to_string()]);
    }

    #[tokio::test]
    async fn test_remember_is_idempotent() {
        // given:
        let registry = InMemoryUserRegistry::new();

        // when:
        registry.remember("ava".to_string()).await;
        registry.remember("ava".to_string()).await;

        // then:
        assert_eq!(registry.active_users().await, vec!["ava".to_string()]);
    }

    #[tokio::test]
    async fn test_release_is_noop_when_absent() {
        // given:
        let registry = InMemoryUserRegistry::new();
        registry.claim("mozz".to_string()).await.unwrap();

        // when:
        registry.release("gooy").await;
        registry.release("mozz").await;

        // then:
        assert!(registry.active_users().await.is_empty());
        assert!(registry.is_available("mozz").await);
    }

    #[tokio::test]
    async fn test_roster_preserves_insertion_order() {
        // given:
        let registry = InMemoryUserRegistry::new();

        // when:
        registry.claim("mozz".to_string()).await.unwrap();
        registry.claim("gooy".to_string()).await.unwrap();
        registry.claim("ava".to_string()).await.unwrap();

        // then:
        assert_eq!(
            registry.active_users().await,
            vec!["mozz".to_string(), "gooy".to_string(), "ava".to_string()]
        );
    }

    #[tokio::test]
    async fn test_create_public_room_and_list() {
        // given:
        let store = InMemoryRoomStore::new();

        // when:
        let room = store
            .create("lobby".to_string(), Visibility::Public, "ava".to_string())
            .await
            .unwrap();

        // then:
        assert_eq!(room.name, "lobby");
        assert!(room.members.is_empty());
        assert_eq!(store.list_public().await, vec!["lobby".to_string()]);
    }

    #[tokio::test]
    async fn test_create_duplicate_room_fails() {
        // given:
        let store = InMemoryRoomStore::new();
        store
            .create("lobby".to_string(), Visibility::Public, "ava".to_string())
            .await
            .unwrap();

        // when:
        let result = store
            .create("lobby".to_string(), Visibility::Public, "gooy".to_string())
            .await;

        // then: still listed exactly once
        assert_eq!(result, Err(RoomError::NameTaken("lobby".to_string())));
        assert_eq!(store.list_public().await, vec!["lobby".to_string()]);
    }

    #[tokio::test]
    async fn test_concurrent_same_name_creates_yield_one_winner() {
        // given:
        let store = Arc::new(InMemoryRoomStore::new());

        // when:
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create("lobby".to_string(), Visibility::Public, "ava".to_string())
                    .await
            }));
        }
        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        // then:
        assert_eq!(successes, 1);
        assert_eq!(store.list_public().await, vec!["lobby".to_string()]);
    }

    #[tokio::test]
    async fn test_room_name_match_is_case_sensitive() {
        // given:
        let store = InMemoryRoomStore::new();
        store
            .create("Lobby".to_string(), Visibility::Public, "ava".to_string())
            .await
            .unwrap();

        // when:
        let result = store
            .create("lobby".to_string(), Visibility::Public, "ava".to_string())
            .await;

        // then:
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_private_listing_is_scoped_to_membership() {
        // given:
        let store = InMemoryRoomStore::new();
        store
            .create("den".to_string(), Visibility::Private, "ava".to_string())
            .await
            .unwrap();

        // when / then:
        assert_eq!(store.list_private_for("ava").await, vec!["den".to_string()]);
        assert!(store.list_private_for("gooy").await.is_empty());

        // when: gooy is added as a member
        store.add_member("den", "gooy".to_string()).await.unwrap();

        // then:
        assert_eq!(
            store.list_private_for("gooy").await,
            vec!["den".to_string()]
        );
    }

    #[tokio::test]
    async fn test_public_rooms_never_listed_as_private() {
        // given:
        let store = InMemoryRoomStore::new();
        store
            .create("lobby".to_string(), Visibility::Public, "ava".to_string())
            .await
            .unwrap();

        // when:
        let result = store.list_private_for("ava").await;

        // then:
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_open_public_room_returns_log_and_no_members() {
        // given:
        let store = InMemoryRoomStore::new();
        store
            .create("lobby".to_string(), Visibility::Public, "ava".to_string())
            .await
            .unwrap();
        store
            .append_message("lobby", message("Hello, everyone!", "mozz"))
            .await
            .unwrap();

        // when: any user may open a public room
        let (messages, members) = store.open("lobby", "gooy").await.unwrap();

        // then:
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "Hello, everyone!");
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn test_open_private_room_gated_on_membership() {
        // given:
        let store = InMemoryRoomStore::new();
        store
            .create("den".to_string(), Visibility::Private, "ava".to_string())
            .await
            .unwrap();
        store
            .append_message("den", message("servus!", "ava"))
            .await
            .unwrap();

        // when / then: a member sees log and member list
        let (messages, members) = store.open("den", "ava").await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(members, vec!["ava".to_string()]);

        // when / then: a non-member gets the same outcome as a missing room
        assert_eq!(
            store.open("den", "gooy").await,
            Err(RoomError::NotFound("den".to_string()))
        );
    }

    #[tokio::test]
    async fn test_open_missing_room_fails() {
        // given:
        let store = InMemoryRoomStore::new();

        // when:
        let result = store.open("nowhere", "ava").await;

        // then:
        assert_eq!(result, Err(RoomError::NotFound("nowhere".to_string())));
    }

    #[tokio::test]
    async fn test_add_member_readd_succeeds_with_unchanged_list() {
        // given:
        let store = InMemoryRoomStore::new();
        store
            .create("den".to_string(), Visibility::Private, "ava".to_string())
            .await
            .unwrap();
        store.add_member("den", "gooy".to_string()).await.unwrap();

        // when:
        let result = store.add_member("den", "gooy".to_string()).await;

        // then:
        assert_eq!(result, Ok(vec!["ava".to_string(), "gooy".to_string()]));
    }

    #[tokio::test]
    async fn test_add_member_to_missing_room_fails() {
        // given:
        let store = InMemoryRoomStore::new();

        // when:
        let result = store.add_member("nowhere", "gooy".to_string()).await;

        // then:
        assert_eq!(result, Err(RoomError::NotFound("nowhere".to_string())));
    }

    #[tokio::test]
    async fn test_append_message_evicts_beyond_limit() {
        // given:
        let store = InMemoryRoomStore::new();
        store
            .create("lobby".to_string(), Visibility::Public, "ava".to_string())
            .await
            .unwrap();

        // when: append one message past the limit
        for i in 0..=MESSAGE_HISTORY_LIMIT {
            store
                .append_message("lobby", message(&format!("msg-{}", i), "mozz"))
                .await
                .unwrap();
        }

        // then:
        let (messages, _) = store.open("lobby", "mozz").await.unwrap();
        assert_eq!(messages.len(), MESSAGE_HISTORY_LIMIT);
        assert_eq!(messages.first().unwrap().content, "msg-1");
        assert_eq!(
            messages.last().unwrap().content,
            format!("msg-{}", MESSAGE_HISTORY_LIMIT)
        );
    }

    #[tokio::test]
    async fn test_append_message_to_missing_room_fails() {
        // given:
        let store = InMemoryRoomStore::new();

        // when:
        let result = store.append_message("nowhere", message("hi", "mozz")).await;

        // then:
        assert_eq!(result, Err(RoomError::NotFound("nowhere".to_string())));
    }
}
