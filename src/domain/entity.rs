//! Chat room entities.

use std::collections::VecDeque;

/// Maximum number of messages a room keeps; older messages are evicted.
pub const MESSAGE_HISTORY_LIMIT: usize = 100;

/// Who may read and write a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Open to every user.
    Public,
    /// Restricted to the explicit member list.
    Private,
}

/// A single chat message, immutable once created.
///
/// Timestamps are display strings supplied by the client (e.g. "25 Jan 21:44");
/// the server fills them in only when the client leaves them empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub content: String,
    pub author: String,
    pub timestamp: String,
}

/// A named channel with a bounded message history.
///
/// The member list is only meaningful for private rooms; public rooms are
/// conceptually open to all users and keep it empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    pub visibility: Visibility,
    pub members: Vec<String>,
    pub messages: VecDeque<ChatMessage>,
}

impl Room {
    /// Create an empty room. A private room starts with its creator as the
    /// sole member.
    pub fn new(name: String, visibility: Visibility, creator: &str) -> Self {
        let members = match visibility {
            Visibility::Private => vec![creator.to_string()],
            Visibility::Public => Vec::new(),
        };
        Self {
            name,
            visibility,
            members,
            messages: VecDeque::new(),
        }
    }

    pub fn is_member(&self, user: &str) -> bool {
        self.members.iter().any(|member| member == user)
    }

    /// Idempotent: re-adding an existing member leaves the list unchanged.
    pub fn add_member(&mut self, user: String) {
        if !self.is_member(&user) {
            self.members.push(user);
        }
    }

    /// Append at the tail, evicting from the head once the history limit is
    /// exceeded.
    pub fn append_message(&mut self, message: ChatMessage) {
        self.messages.push_back(message);
        while self.messages.len() > MESSAGE_HISTORY_LIMIT {
            self.messages.pop_front();
        }
    }
}
