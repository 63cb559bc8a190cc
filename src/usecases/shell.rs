use anyhow::Result;

use crate::{
    domain::{
        activation::ActivationState,
        connection::ConnectionState,
        events::{AppEvent, KeyInput, RelayEvent},
        session::SessionContext,
        shell_state::ShellState,
    },
    usecases::{
        contracts::ShellOrchestrator,
        dispatch_inbound::dispatch_inbound,
        send_message::{send_message, FrameTransmitter, SendMessageError, SendOutcome},
    },
};

const SEND_NOT_CONNECTED: &str = "SEND_NOT_CONNECTED";
const SEND_DELIVERY_FAILED: &str = "SEND_DELIVERY_FAILED";

const CONNECT_ERROR_NOTICE: &str = "Error connecting to server. Please try again later.";
const NOT_CONNECTED_NOTICE: &str = "Not connected to the server. Your message was not sent.";
const SEND_FAILED_NOTICE: &str = "Could not deliver your message. Please try again.";

/// Event orchestrator for the messenger shell.
///
/// Runs on the single event loop: each handler is invoked once per event and
/// runs to completion, so no state access ever interleaves.
pub struct DefaultShellOrchestrator<T>
where
    T: FrameTransmitter,
{
    state: ShellState,
    transmitter: T,
}

impl<T> DefaultShellOrchestrator<T>
where
    T: FrameTransmitter,
{
    pub fn new(session: SessionContext, transmitter: T) -> Self {
        Self {
            state: ShellState::new(session),
            transmitter,
        }
    }

    fn handle_nickname_key(&mut self, key: KeyInput) {
        if key.ctrl {
            return;
        }

        match key.key.as_str() {
            "enter" => {
                let nickname = self.state.nickname_input().text().trim().to_owned();
                // The form guards against submitting an empty nickname;
                // the state machine itself does not validate content.
                if nickname.is_empty() {
                    return;
                }
                let outcome = self.state.activate_with_nickname(&nickname);
                tracing::info!(?outcome, "nickname submitted");
            }
            "backspace" => self.state.nickname_input_mut().delete_char_before(),
            "delete" => self.state.nickname_input_mut().delete_char_at(),
            "left" => self.state.nickname_input_mut().move_cursor_left(),
            "right" => self.state.nickname_input_mut().move_cursor_right(),
            "home" => self.state.nickname_input_mut().move_cursor_home(),
            "end" => self.state.nickname_input_mut().move_cursor_end(),
            key => {
                if let Some(ch) = single_char(key) {
                    self.state.nickname_input_mut().insert_char(ch);
                }
            }
        }
    }

    fn handle_compose_key(&mut self, key: KeyInput) {
        if key.ctrl {
            return;
        }

        match key.key.as_str() {
            "enter" => self.send_composed_message(),
            "backspace" => self.state.compose_input_mut().delete_char_before(),
            "delete" => self.state.compose_input_mut().delete_char_at(),
            "left" => self.state.compose_input_mut().move_cursor_left(),
            "right" => self.state.compose_input_mut().move_cursor_right(),
            "home" => self.state.compose_input_mut().move_cursor_home(),
            "end" => self.state.compose_input_mut().move_cursor_end(),
            key => {
                if let Some(ch) = single_char(key) {
                    self.state.compose_input_mut().insert_char(ch);
                }
            }
        }
    }

    fn send_composed_message(&mut self) {
        let text = self.state.compose_input().text().to_owned();

        let result = send_message(
            &self.transmitter,
            self.state.connection_state(),
            self.state.session(),
            &text,
        );

        match result {
            Ok(SendOutcome::Sent) => self.state.compose_input_mut().clear(),
            Ok(SendOutcome::SkippedEmpty) => {}
            Err(SendMessageError::NotConnected) => {
                tracing::warn!(code = SEND_NOT_CONNECTED, "send rejected: channel not open");
                self.state.push_notice(NOT_CONNECTED_NOTICE);
            }
            Err(error) => {
                tracing::error!(code = SEND_DELIVERY_FAILED, ?error, "send failed");
                self.state.push_notice(SEND_FAILED_NOTICE);
            }
        }
    }

    fn handle_relay_event(&mut self, event: RelayEvent) {
        match event {
            RelayEvent::Opened => {
                self.state.set_connection_state(ConnectionState::Open);
                tracing::info!(state = ConnectionState::Open.as_label(), "relay channel open");
            }
            RelayEvent::Errored { code } => {
                // Terminal for this session; the notice is appended and
                // prior content stays visible.
                self.state.set_connection_state(ConnectionState::Errored);
                self.state.push_notice(CONNECT_ERROR_NOTICE);
                tracing::error!(
                    code = %code,
                    state = ConnectionState::Errored.as_label(),
                    "relay channel errored"
                );
            }
            RelayEvent::Frame(raw) => {
                let outcome = dispatch_inbound(self.state.messages_mut(), &raw);
                tracing::trace!(?outcome, "inbound frame dispatched");
            }
        }
    }
}

impl<T> ShellOrchestrator for DefaultShellOrchestrator<T>
where
    T: FrameTransmitter,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => {}
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::InputKey(key) => match self.state.activation_state() {
                ActivationState::CollectingNickname => self.handle_nickname_key(key),
                ActivationState::Active => self.handle_compose_key(key),
            },
            AppEvent::Relay(event) => self.handle_relay_event(event),
        }

        Ok(())
    }
}

fn single_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::send_message::TransmitSourceError;
    use std::cell::RefCell;

    struct StubTransmitter {
        result: Result<(), TransmitSourceError>,
        captured_frames: RefCell<Vec<String>>,
    }

    impl StubTransmitter {
        fn ok() -> Self {
            Self {
                result: Ok(()),
                captured_frames: RefCell::new(Vec::new()),
            }
        }
    }

    impl FrameTransmitter for StubTransmitter {
        fn transmit(&self, frame: &str) -> Result<(), TransmitSourceError> {
            self.captured_frames.borrow_mut().push(frame.to_owned());
            self.result.clone()
        }
    }

    fn orchestrator() -> DefaultShellOrchestrator<StubTransmitter> {
        DefaultShellOrchestrator::new(SessionContext::new("k-123"), StubTransmitter::ok())
    }

    fn type_text(orchestrator: &mut DefaultShellOrchestrator<StubTransmitter>, text: &str) {
        for ch in text.chars() {
            orchestrator
                .handle_event(AppEvent::InputKey(KeyInput::new(ch.to_string(), false)))
                .expect("key event must be handled");
        }
    }

    fn press(orchestrator: &mut DefaultShellOrchestrator<StubTransmitter>, key: &str) {
        orchestrator
            .handle_event(AppEvent::InputKey(KeyInput::new(key, false)))
            .expect("key event must be handled");
    }

    fn activate_as(orchestrator: &mut DefaultShellOrchestrator<StubTransmitter>, nickname: &str) {
        type_text(orchestrator, nickname);
        press(orchestrator, "enter");
    }

    #[test]
    fn stops_on_quit_event() {
        let mut orchestrator = orchestrator();

        orchestrator
            .handle_event(AppEvent::QuitRequested)
            .expect("event must be handled");

        assert!(!orchestrator.state().is_running());
    }

    #[test]
    fn typed_nickname_and_enter_activates_the_shell() {
        let mut orchestrator = orchestrator();

        activate_as(&mut orchestrator, "Alice");

        assert_eq!(
            orchestrator.state().activation_state(),
            ActivationState::Active
        );
        assert_eq!(orchestrator.state().session().nickname(), "Alice");
    }

    #[test]
    fn empty_nickname_submission_is_ignored() {
        let mut orchestrator = orchestrator();

        press(&mut orchestrator, "enter");

        assert_eq!(
            orchestrator.state().activation_state(),
            ActivationState::CollectingNickname
        );
    }

    #[test]
    fn activation_is_terminal_across_repeated_signals() {
        let mut orchestrator = orchestrator();
        activate_as(&mut orchestrator, "Alice");

        // Keys now edit the compose field; a forged second submission can
        // only come through the state machine, which stays Active.
        assert_eq!(
            orchestrator
                .state
                .activate_with_nickname("Bob"),
            crate::domain::activation::ActivationOutcome::AlreadyActive
        );
        assert_eq!(orchestrator.state().session().nickname(), "Alice");
    }

    #[test]
    fn opened_event_marks_the_channel_open() {
        let mut orchestrator = orchestrator();

        orchestrator
            .handle_event(AppEvent::Relay(RelayEvent::Opened))
            .expect("relay event must be handled");

        assert_eq!(
            orchestrator.state().connection_state(),
            ConnectionState::Open
        );
    }

    #[test]
    fn errored_event_is_terminal_and_appends_a_notice() {
        let mut orchestrator = orchestrator();
        orchestrator
            .handle_event(AppEvent::Relay(RelayEvent::Frame(
                r#"{ "type": "message", "data": "A1", "username": "Alice" }"#.to_owned(),
            )))
            .expect("frame event must be handled");

        orchestrator
            .handle_event(AppEvent::Relay(RelayEvent::Errored {
                code: "RELAY_CONNECT_FAILED".to_owned(),
            }))
            .expect("error event must be handled");

        assert_eq!(
            orchestrator.state().connection_state(),
            ConnectionState::Errored
        );
        assert_eq!(orchestrator.state().notices(), [CONNECT_ERROR_NOTICE]);
        // Prior messages stay visible; the notice is appended, not a replacement.
        assert_eq!(orchestrator.state().messages().len(), 1);
    }

    #[test]
    fn inbound_frames_append_to_the_buffer() {
        let mut orchestrator = orchestrator();

        orchestrator
            .handle_event(AppEvent::Relay(RelayEvent::Frame(
                r#"{ "type": "message", "data": "hello", "username": "Bob" }"#.to_owned(),
            )))
            .expect("frame event must be handled");

        let snapshot = orchestrator.state().messages().snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].username, "Bob");
        assert_eq!(snapshot[0].text, "hello");
    }

    #[test]
    fn heartbeat_frames_leave_the_buffer_unchanged() {
        let mut orchestrator = orchestrator();

        orchestrator
            .handle_event(AppEvent::Relay(RelayEvent::Frame(
                r#"{ "type": "heartbeat" }"#.to_owned(),
            )))
            .expect("frame event must be handled");

        assert!(orchestrator.state().messages().is_empty());
    }

    #[test]
    fn compose_enter_sends_and_clears_when_open() {
        let mut orchestrator = orchestrator();
        activate_as(&mut orchestrator, "Alice");
        orchestrator
            .handle_event(AppEvent::Relay(RelayEvent::Opened))
            .expect("relay event must be handled");

        type_text(&mut orchestrator, "hi");
        press(&mut orchestrator, "enter");

        assert!(orchestrator.state().compose_input().is_empty());
        let frames = orchestrator.transmitter.captured_frames.borrow();
        assert_eq!(frames.len(), 1);
        let value: serde_json::Value =
            serde_json::from_str(&frames[0]).expect("frame must be valid JSON");
        assert_eq!(value["username"], "Alice");
        assert_eq!(value["data"], "hi");
    }

    #[test]
    fn compose_enter_with_empty_text_transmits_nothing() {
        let mut orchestrator = orchestrator();
        activate_as(&mut orchestrator, "Alice");
        orchestrator
            .handle_event(AppEvent::Relay(RelayEvent::Opened))
            .expect("relay event must be handled");

        press(&mut orchestrator, "enter");

        assert!(orchestrator.transmitter.captured_frames.borrow().is_empty());
        assert!(orchestrator.state().notices().is_empty());
    }

    #[test]
    fn compose_enter_before_open_surfaces_not_connected_notice() {
        let mut orchestrator = orchestrator();
        activate_as(&mut orchestrator, "Alice");

        type_text(&mut orchestrator, "hi");
        press(&mut orchestrator, "enter");

        assert!(orchestrator.transmitter.captured_frames.borrow().is_empty());
        assert_eq!(orchestrator.state().notices(), [NOT_CONNECTED_NOTICE]);
        // The composed text is kept so the user can retry.
        assert_eq!(orchestrator.state().compose_input().text(), "hi");
    }

    #[test]
    fn keys_edit_the_nickname_form_before_activation() {
        let mut orchestrator = orchestrator();

        type_text(&mut orchestrator, "Alicea");
        press(&mut orchestrator, "backspace");

        assert_eq!(orchestrator.state().nickname_input().text(), "Alice");
        assert!(orchestrator.state().compose_input().is_empty());
    }
}
