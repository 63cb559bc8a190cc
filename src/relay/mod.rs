//! Relay adapter: the WebSocket channel to the chat relay.

mod socket;
pub mod wire;

pub use socket::{RelayConnection, RelaySocketStartError};

/// Returns the relay module name for smoke checks.
pub fn module_name() -> &'static str {
    "relay"
}
