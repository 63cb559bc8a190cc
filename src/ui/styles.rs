//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Message list styles
// =============================================================================

/// Style for message sender name (white, bold).
pub fn message_sender_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for message text content.
pub fn message_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for the render-time timestamp suffix.
pub fn message_time_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for messages sent by the local user.
pub fn sent_message_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Style for error notices appended to the message list.
pub fn notice_style() -> Style {
    Style::default().fg(Color::Red)
}

// =============================================================================
// Input field styles
// =============================================================================

/// Style for the input prompt symbol.
pub fn input_prompt_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Style for typed input text.
pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for placeholder text in an empty input.
pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Chrome styles
// =============================================================================

/// Style for panel borders.
pub fn panel_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for the status line.
pub fn status_line_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for hint text on the nickname form.
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
