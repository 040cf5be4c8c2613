//! UI layer: axum router, WebSocket connection handling, HTTP endpoints.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
