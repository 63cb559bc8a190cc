//! Message list rendering logic.
//!
//! Projects the buffer snapshot into visual elements: sender alignment
//! (sent vs received relative to the local nickname), a display timestamp,
//! and any appended error notices.

use chrono::Local;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::ListItem,
};

use crate::domain::message::ChatMessage;

use super::styles;

/// Which side of the list a message is aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAlignment {
    /// Composed by the local user; right-aligned.
    Sent,
    /// Composed by another user; left-aligned.
    Received,
}

/// Represents a visual element in the messages list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageListElement {
    /// A chat message with derived alignment.
    Message {
        time: String,
        username: String,
        content: String,
        alignment: MessageAlignment,
    },
    /// An appended error notice.
    Notice(String),
}

/// Builds display elements for a buffer snapshot.
///
/// Alignment derives from comparing each sender against the session
/// nickname. The displayed time is the wall clock at render time, matching
/// the widget this replaces; the receipt timestamp on the entity is not
/// consulted here.
pub fn build_message_list_elements(
    messages: &[ChatMessage],
    local_username: &str,
) -> Vec<MessageListElement> {
    let rendered_at = Local::now().format("%H:%M").to_string();

    messages
        .iter()
        .map(|message| {
            let alignment = if message.username == local_username {
                MessageAlignment::Sent
            } else {
                MessageAlignment::Received
            };

            MessageListElement::Message {
                time: rendered_at.clone(),
                username: message.username.clone(),
                content: message.text.clone(),
                alignment,
            }
        })
        .collect()
}

/// Wraps a notice for display after the projected messages.
pub fn notice_element(notice: &str) -> MessageListElement {
    MessageListElement::Notice(notice.to_owned())
}

/// Converts a list element to a ListItem for ratatui rendering.
pub fn element_to_list_item(element: &MessageListElement) -> ListItem<'static> {
    match element {
        MessageListElement::Message {
            time,
            username,
            content,
            alignment,
        } => message_item(time, username, content, *alignment),
        MessageListElement::Notice(text) => notice_item(text),
    }
}

fn message_item(
    time: &str,
    username: &str,
    content: &str,
    alignment: MessageAlignment,
) -> ListItem<'static> {
    let (line_alignment, content_style) = match alignment {
        MessageAlignment::Sent => (Alignment::Right, styles::sent_message_style()),
        MessageAlignment::Received => (Alignment::Left, styles::message_text_style()),
    };

    let line = Line::from(vec![
        Span::styled(format!("{username}: "), styles::message_sender_style()),
        Span::styled(content.to_owned(), content_style),
        Span::styled(format!("  {time}"), styles::message_time_style()),
    ])
    .alignment(line_alignment);

    ListItem::new(line)
}

fn notice_item(text: &str) -> ListItem<'static> {
    let line = Line::from(Span::styled(text.to_owned(), styles::notice_style()))
        .alignment(Alignment::Left);
    ListItem::new(line)
}
