use serde::Deserialize;

use crate::infra::config::{AppConfig, LogConfig, RelayConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub relay: Option<FileRelayConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(relay) = self.relay {
            relay.merge_into(&mut config.relay);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub to_file: Option<bool>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(to_file) = self.to_file {
            config.to_file = to_file;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileRelayConfig {
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
}

impl FileRelayConfig {
    fn merge_into(self, config: &mut RelayConfig) {
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }

        if let Some(access_key) = self.access_key {
            config.access_key = access_key;
        }
    }
}
