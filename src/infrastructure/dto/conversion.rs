//! Conversion logic between DTOs and domain entities.

use crate::domain::{ChatMessage, Visibility};
use crate::infrastructure::dto::websocket::MessageDto;

impl From<ChatMessage> for MessageDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            content: message.content,
            user: message.author,
            timestamp: message.timestamp,
        }
    }
}

impl From<MessageDto> for ChatMessage {
    fn from(dto: MessageDto) -> Self {
        Self {
            content: dto.content,
            author: dto.user,
            timestamp: dto.timestamp,
        }
    }
}

/// The wire carries visibility as the original `public` boolean flag.
impl From<bool> for Visibility {
    fn from(public: bool) -> Self {
        if public {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }
}

impl From<Visibility> for bool {
    fn from(visibility: Visibility) -> Self {
        visibility == Visibility::Public
    }
}
