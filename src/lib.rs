//! Room-based WebSocket chat server library.
//!
//! Clients connect over a persistent WebSocket, claim a display name, browse
//! and create public or private rooms, and exchange messages that fan out to
//! every connected session.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;
