//! Data Transfer Objects (DTOs) for the chat server.
//!
//! - `websocket`: the tagged JSON events exchanged over the WebSocket
//! - `conversion`: mapping between DTOs and domain entities

pub mod conversion;
pub mod websocket;
