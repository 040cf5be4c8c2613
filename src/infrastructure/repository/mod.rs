//! Concrete registry and store implementations.

mod inmemory;

pub use inmemory::{InMemoryRoomStore, InMemoryUserRegistry};
