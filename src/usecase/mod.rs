//! Use-case layer: translates inbound events into registry/store calls and
//! outbound notifications.

mod gateway;

pub use gateway::SessionGateway;
