//! Session context passed into send and render operations.

/// Per-shell session state: the local nickname and the relay access key.
///
/// Replaces a process-wide key-value lookup; the shell owns the lifecycle
/// and hands out references at send and render time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    nickname: String,
    access_key: String,
}

impl SessionContext {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            nickname: String::new(),
            access_key: access_key.into(),
        }
    }

    /// Local nickname; empty until activation has recorded one.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn set_nickname(&mut self, nickname: impl Into<String>) {
        self.nickname = nickname.into();
    }

    /// Shared access key attached to outbound message frames.
    pub fn access_key(&self) -> &str {
        &self.access_key
    }
}
