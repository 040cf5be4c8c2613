//! Infrastructure layer: wire DTOs, in-memory state, WebSocket delivery.

pub mod dto;
pub mod message_pusher;
pub mod repository;
