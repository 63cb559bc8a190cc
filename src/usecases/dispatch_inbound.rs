//! Classification of raw inbound relay payloads.

use crate::{
    domain::{message::ChatMessage, message_buffer::MessageBuffer},
    relay::wire::InboundFrame,
};

const MALFORMED_PAYLOAD: &str = "MALFORMED_PAYLOAD";

/// What happened to an inbound payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A chat message was appended; the display needs a resync.
    Appended,
    /// Liveness ping; dropped with no further effect.
    HeartbeatDropped,
    /// Malformed payload; logged and discarded.
    Rejected,
}

/// Classifies one raw text frame and routes it.
///
/// Heartbeats are dropped. Chat messages are stamped with the current local
/// receipt time and appended to the buffer. Malformed payloads (invalid
/// JSON or an unrecognized `type`) are logged and discarded; this function
/// never panics on bad input.
pub fn dispatch_inbound(buffer: &mut MessageBuffer, raw: &str) -> DispatchOutcome {
    match serde_json::from_str::<InboundFrame>(raw) {
        Err(error) => {
            tracing::warn!(
                code = MALFORMED_PAYLOAD,
                error = %error,
                "discarding malformed relay payload"
            );
            DispatchOutcome::Rejected
        }
        Ok(InboundFrame::Heartbeat) => DispatchOutcome::HeartbeatDropped,
        Ok(InboundFrame::Message { data, username }) => {
            buffer.push(ChatMessage::received_now(username, data));
            DispatchOutcome::Appended
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_frame(username: &str, data: &str) -> String {
        format!(r#"{{ "type": "message", "data": "{data}", "username": "{username}" }}"#)
    }

    #[test]
    fn appends_message_frames_in_delivery_order() {
        let mut buffer = MessageBuffer::default();

        dispatch_inbound(&mut buffer, &message_frame("Alice", "A1"));
        dispatch_inbound(&mut buffer, &message_frame("Bob", "B1"));
        dispatch_inbound(&mut buffer, &message_frame("Alice", "A2"));

        let snapshot = buffer.snapshot();
        let entries: Vec<(&str, &str)> = snapshot
            .iter()
            .map(|m| (m.username.as_str(), m.text.as_str()))
            .collect();

        assert_eq!(
            entries,
            vec![("Alice", "A1"), ("Bob", "B1"), ("Alice", "A2")]
        );
    }

    #[test]
    fn heartbeats_never_change_the_buffer() {
        let mut buffer = MessageBuffer::default();
        dispatch_inbound(&mut buffer, &message_frame("Alice", "A1"));
        let before = buffer.snapshot();

        let outcome = dispatch_inbound(&mut buffer, r#"{ "type": "heartbeat" }"#);

        assert_eq!(outcome, DispatchOutcome::HeartbeatDropped);
        assert_eq!(buffer.snapshot(), before);
    }

    #[test]
    fn malformed_payload_is_rejected_without_mutation() {
        let mut buffer = MessageBuffer::default();
        dispatch_inbound(&mut buffer, &message_frame("Alice", "A1"));
        let before = buffer.snapshot();

        for raw in ["not json at all", "{}", r#"{ "type": "presence" }"#, ""] {
            let outcome = dispatch_inbound(&mut buffer, raw);
            assert_eq!(outcome, DispatchOutcome::Rejected, "input: {raw:?}");
        }

        assert_eq!(buffer.snapshot(), before);
    }

    #[test]
    fn stamps_receipt_time_locally() {
        let mut buffer = MessageBuffer::default();
        let before = crate::domain::message::now_unix_ms();

        dispatch_inbound(&mut buffer, &message_frame("Alice", "A1"));

        let snapshot = buffer.snapshot();
        assert!(snapshot[0].received_at_unix_ms >= before);
    }
}
