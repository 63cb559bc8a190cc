use chrono::Utc;

/// A chat message as held by the core after inbound dispatch.
///
/// Heartbeat frames never reach this type; they are filtered at the wire
/// boundary. The receipt time is stamped locally and is never taken from
/// the wire payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub username: String,
    pub text: String,
    pub received_at_unix_ms: i64,
}

impl ChatMessage {
    /// Builds a message stamped with the current local receipt time.
    pub fn received_now(username: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            text: text.into(),
            received_at_unix_ms: now_unix_ms(),
        }
    }
}

pub fn now_unix_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn received_now_stamps_a_plausible_receipt_time() {
        let before = now_unix_ms();
        let message = ChatMessage::received_now("Alice", "hello");
        let after = now_unix_ms();

        assert_eq!(message.username, "Alice");
        assert_eq!(message.text, "hello");
        assert!(message.received_at_unix_ms >= before);
        assert!(message.received_at_unix_ms <= after);
    }
}
