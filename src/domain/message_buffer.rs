//! Bounded store of recent chat messages.

use std::collections::VecDeque;

use crate::domain::message::ChatMessage;

/// Maximum number of messages kept for display.
pub const MESSAGE_BUFFER_CAPACITY: usize = 20;

/// Ordered buffer of the most recent messages with strict FIFO eviction.
///
/// Invariant: holds at most [`MESSAGE_BUFFER_CAPACITY`] entries; when full,
/// the oldest entry is evicted before a new one is appended. Insertion order
/// is preserved and duplicates are not collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBuffer {
    entries: VecDeque<ChatMessage>,
}

impl MessageBuffer {
    /// Appends a message at the tail, evicting the head entry when full.
    /// Always succeeds.
    pub fn push(&mut self, message: ChatMessage) {
        if self.entries.len() == MESSAGE_BUFFER_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(message);
    }

    /// Returns a point-in-time copy of the contents, oldest first.
    ///
    /// Never mutates the buffer; repeated calls without an intervening
    /// `push` return equal sequences.
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
