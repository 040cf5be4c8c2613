//! Outbound event delivery implementations.

mod websocket;

pub use websocket::WebSocketMessagePusher;
