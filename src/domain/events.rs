#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
    Relay(RelayEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }
}

/// Event delivered by the relay socket worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// The channel reported its open signal.
    Opened,
    /// A raw text frame arrived from the relay.
    Frame(String),
    /// The channel reported an error; terminal for this session.
    Errored { code: String },
}
