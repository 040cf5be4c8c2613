//! Connection and endpoint handlers.

pub mod http;
pub mod websocket;
