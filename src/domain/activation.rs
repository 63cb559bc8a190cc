/// Visibility/readiness state of the messenger shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationState {
    /// Initial state: the nickname form is presented.
    #[default]
    CollectingNickname,
    /// Terminal state: the chat surface is presented.
    Active,
}

/// Result of feeding a nickname-submitted signal to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    Activated,
    AlreadyActive,
}

/// One-way state machine from nickname collection to active chat.
///
/// The first nickname-submitted signal transitions to `Active`; every later
/// signal is inert because there is no path back. Nickname content is not
/// validated here; the surrounding UI guards against empty submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activation {
    state: ActivationState,
}

impl Activation {
    pub fn state(&self) -> ActivationState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ActivationState::Active
    }

    pub fn submit_nickname(&mut self) -> ActivationOutcome {
        match self.state {
            ActivationState::CollectingNickname => {
                self.state = ActivationState::Active;
                ActivationOutcome::Activated
            }
            ActivationState::Active => ActivationOutcome::AlreadyActive,
        }
    }
}
