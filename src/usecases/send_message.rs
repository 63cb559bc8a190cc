//! Use case for sending a composed message to the relay.
//!
//! This module provides the `FrameTransmitter` trait and `send_message`
//! function for handing encoded message frames to the transport.

use crate::{
    domain::{connection::ConnectionState, session::SessionContext},
    relay::wire::OutboundFrame,
};

const OUTBOUND_ENCODE_FAILED: &str = "OUTBOUND_ENCODE_FAILED";

/// Result of a send that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The frame was handed to the transport; the caller clears the
    /// compose input.
    Sent,
    /// Empty compose text is a non-event: nothing is transmitted and no
    /// input state is cleared.
    SkippedEmpty,
}

/// Errors that can occur at the transport level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransmitSourceError {
    /// The outbound channel to the socket worker is gone.
    ChannelUnavailable,
}

/// Trait for handing encoded frames to the transport.
pub trait FrameTransmitter {
    /// Transmits one encoded text frame.
    ///
    /// # Errors
    /// Returns `TransmitSourceError` if the frame could not be handed over.
    fn transmit(&self, frame: &str) -> Result<(), TransmitSourceError>;
}

impl<T: FrameTransmitter + ?Sized> FrameTransmitter for &T {
    fn transmit(&self, frame: &str) -> Result<(), TransmitSourceError> {
        (*self).transmit(frame)
    }
}

/// Domain-level errors for the send operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// The channel is not open; nothing was transmitted.
    NotConnected,
    /// The outbound frame could not be encoded.
    EncodeFailed,
    /// The transport rejected the frame.
    ChannelUnavailable,
}

/// Sends composed text to the relay as a message frame.
///
/// Empty text (after trimming) is a silent no-op. Sending requires the
/// channel to be `Open`; anything else fails fast with `NotConnected`
/// rather than attempting transmission on a non-open channel. The nickname
/// and access key are read from the session context at send time.
///
/// # Errors
/// Returns `SendMessageError::NotConnected` when the channel is not open,
/// and maps transport errors for the remaining failure cases.
pub fn send_message(
    transmitter: &dyn FrameTransmitter,
    connection: ConnectionState,
    session: &SessionContext,
    text: &str,
) -> Result<SendOutcome, SendMessageError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(SendOutcome::SkippedEmpty);
    }

    if !connection.is_open() {
        return Err(SendMessageError::NotConnected);
    }

    let frame = OutboundFrame::Message {
        data: text,
        username: session.nickname(),
        key: session.access_key(),
    };
    let encoded = serde_json::to_string(&frame).map_err(|error| {
        tracing::error!(
            code = OUTBOUND_ENCODE_FAILED,
            error = %error,
            "failed to encode outbound frame"
        );
        SendMessageError::EncodeFailed
    })?;

    transmitter.transmit(&encoded).map_err(map_source_error)?;
    Ok(SendOutcome::Sent)
}

fn map_source_error(error: TransmitSourceError) -> SendMessageError {
    match error {
        TransmitSourceError::ChannelUnavailable => SendMessageError::ChannelUnavailable,
    }
}
