use super::{
    activation::{Activation, ActivationOutcome, ActivationState},
    compose_state::ComposeState,
    connection::ConnectionState,
    message_buffer::MessageBuffer,
    session::SessionContext,
};

/// Aggregate state owned by the shell orchestrator.
///
/// All mutation happens on the single event loop; the view only reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    activation: Activation,
    connection: ConnectionState,
    nickname_input: ComposeState,
    compose_input: ComposeState,
    messages: MessageBuffer,
    notices: Vec<String>,
    session: SessionContext,
}

impl ShellState {
    pub fn new(session: SessionContext) -> Self {
        Self {
            running: true,
            activation: Activation::default(),
            // The relay channel is opened before the shell loop starts.
            connection: ConnectionState::Connecting,
            nickname_input: ComposeState::default(),
            compose_input: ComposeState::default(),
            messages: MessageBuffer::default(),
            notices: Vec::new(),
            session,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn activation_state(&self) -> ActivationState {
        self.activation.state()
    }

    /// Applies a nickname-submitted signal; records the nickname in the
    /// session only on the first (activating) signal.
    pub fn activate_with_nickname(&mut self, nickname: &str) -> ActivationOutcome {
        let outcome = self.activation.submit_nickname();
        if outcome == ActivationOutcome::Activated {
            self.session.set_nickname(nickname);
        }
        outcome
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection
    }

    /// Only the transport-event reactions may call this.
    pub fn set_connection_state(&mut self, state: ConnectionState) {
        self.connection = state;
    }

    pub fn nickname_input(&self) -> &ComposeState {
        &self.nickname_input
    }

    pub fn nickname_input_mut(&mut self) -> &mut ComposeState {
        &mut self.nickname_input
    }

    pub fn compose_input(&self) -> &ComposeState {
        &self.compose_input
    }

    pub fn compose_input_mut(&mut self) -> &mut ComposeState {
        &mut self.compose_input
    }

    pub fn messages(&self) -> &MessageBuffer {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageBuffer {
        &mut self.messages
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Appends a user-visible notice; prior content is never replaced.
    pub fn push_notice(&mut self, notice: impl Into<String>) {
        self.notices.push(notice.into());
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new(SessionContext::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running_and_collecting_nickname() {
        let state = ShellState::default();

        assert!(state.is_running());
        assert_eq!(state.activation_state(), ActivationState::CollectingNickname);
        assert_eq!(state.connection_state(), ConnectionState::Connecting);
    }

    #[test]
    fn activation_records_nickname_once() {
        let mut state = ShellState::default();

        assert_eq!(
            state.activate_with_nickname("Alice"),
            ActivationOutcome::Activated
        );
        assert_eq!(
            state.activate_with_nickname("Bob"),
            ActivationOutcome::AlreadyActive
        );

        assert_eq!(state.activation_state(), ActivationState::Active);
        assert_eq!(state.session().nickname(), "Alice");
    }

    #[test]
    fn notices_accumulate_in_order() {
        let mut state = ShellState::default();
        state.push_notice("first");
        state.push_notice("second");

        assert_eq!(state.notices(), ["first", "second"]);
    }
}
