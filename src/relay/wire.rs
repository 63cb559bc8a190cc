//! Wire format of the relay's text frames.
//!
//! Inbound frames carry either a liveness heartbeat or a chat message;
//! any other `type` value (or malformed JSON) fails deserialization and is
//! handled as a malformed payload by the dispatcher.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InboundFrame {
    /// Liveness ping from the relay; carries no displayable content.
    Heartbeat,
    Message { data: String, username: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundFrame<'a> {
    Message {
        data: &'a str,
        username: &'a str,
        key: &'a str,
    },
}
