use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListState, Paragraph},
    Frame,
};

use crate::domain::{
    activation::ActivationState, compose_state::ComposeState, connection::ConnectionState,
    shell_state::ShellState,
};

use super::message_rendering::{
    build_message_list_elements, element_to_list_item, notice_element,
};
use super::styles;

/// Prompt symbol shown before input text.
const PROMPT_SYMBOL: &str = "> ";

const NICKNAME_FORM_TITLE: &str = "Join the chat";
const NICKNAME_PLACEHOLDER: &str = "Enter a nickname to join...";
const NICKNAME_HINT: &str = "Press Enter to join, Esc to quit.";
const COMPOSE_PLACEHOLDER: &str = "Type a message and press Enter to send...";

pub fn render(frame: &mut Frame<'_>, state: &ShellState) {
    match state.activation_state() {
        ActivationState::CollectingNickname => render_nickname_form(frame, state),
        ActivationState::Active => render_messenger(frame, state),
    }
}

fn render_nickname_form(frame: &mut Frame<'_>, state: &ShellState) {
    let [_, form_area, _] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Min(1),
        ])
        .areas(frame.area());

    let [input_area, hint_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .areas(form_area);

    render_input_field(
        frame,
        input_area,
        state.nickname_input(),
        NICKNAME_FORM_TITLE,
        NICKNAME_PLACEHOLDER,
    );

    let hint = Paragraph::new(Line::from(Span::styled(
        NICKNAME_HINT.to_owned(),
        styles::hint_style(),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

fn render_messenger(frame: &mut Frame<'_>, state: &ShellState) {
    // 3 lines for the input: 1 border + 1 text + 1 border.
    let [messages_area, input_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    render_messages_panel(frame, messages_area, state);
    render_input_field(
        frame,
        input_area,
        state.compose_input(),
        "Message",
        COMPOSE_PLACEHOLDER,
    );

    let status = Paragraph::new(status_line(state)).style(styles::status_line_style());
    frame.render_widget(status, status_area);
}

fn render_messages_panel(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let snapshot = state.messages().snapshot();
    let mut elements = build_message_list_elements(&snapshot, state.session().nickname());
    elements.extend(state.notices().iter().map(|notice| notice_element(notice)));

    let items: Vec<_> = elements.iter().map(element_to_list_item).collect();
    let newest = items.len().checked_sub(1);

    let list = List::new(items).block(
        Block::default()
            .title("Messages")
            .borders(Borders::ALL)
            .border_style(styles::panel_border_style()),
    );

    // Selecting the newest entry keeps the view scrolled to the bottom.
    let mut list_state = ListState::default();
    list_state.select(newest);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_input_field(
    frame: &mut Frame<'_>,
    area: Rect,
    input: &ComposeState,
    title: &str,
    placeholder: &str,
) {
    let line = if input.is_empty() {
        Line::from(vec![
            Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style()),
            Span::styled(placeholder.to_owned(), styles::input_placeholder_style()),
        ])
    } else {
        Line::from(vec![
            Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style()),
            Span::styled(input.text().to_owned(), styles::input_text_style()),
        ])
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title(title.to_owned())
            .borders(Borders::ALL)
            .border_style(styles::panel_border_style()),
    );
    frame.render_widget(paragraph, area);

    // Use saturating arithmetic to prevent overflow with very long inputs.
    let cursor_x = area
        .x
        .saturating_add(1)
        .saturating_add(PROMPT_SYMBOL.len() as u16)
        .saturating_add(input.width_before_cursor().min(u16::MAX as usize) as u16);
    let cursor_y = area.y.saturating_add(1);
    frame.set_cursor_position((cursor_x, cursor_y));
}

fn status_line(state: &ShellState) -> String {
    let connection = match state.connection_state() {
        ConnectionState::Disconnected => "offline",
        ConnectionState::Connecting => "connecting...",
        ConnectionState::Open => "online",
        ConnectionState::Errored => "connection error",
    };

    format!(" {} | {}", connection, state.session().nickname())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::SessionContext;

    #[test]
    fn status_line_shows_connection_and_nickname() {
        let mut session = SessionContext::new("k-123");
        session.set_nickname("Alice");
        let mut state = ShellState::new(session);
        state.set_connection_state(ConnectionState::Open);

        assert_eq!(status_line(&state), " online | Alice");
    }

    #[test]
    fn status_line_reports_terminal_error_state() {
        let state = {
            let mut state = ShellState::default();
            state.set_connection_state(ConnectionState::Errored);
            state
        };

        assert!(status_line(&state).contains("connection error"));
    }
}
