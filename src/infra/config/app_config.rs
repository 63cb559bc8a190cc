use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub relay: RelayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// Log to a file under the app storage layout instead of stderr.
    /// The terminal is the rendering surface while the shell runs, so
    /// this defaults to on.
    pub to_file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            to_file: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayConfig {
    /// Fixed relay endpoint; the channel is opened once per shell instance.
    pub endpoint: String,
    /// Shared access key attached to outbound message frames.
    pub access_key: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: "wss://courselab.lnu.se/message-app/socket".to_owned(),
            access_key: "replace-me".to_owned(),
        }
    }
}
