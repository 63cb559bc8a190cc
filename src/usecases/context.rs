use tracing_appender::non_blocking::WorkerGuard;

use crate::infra::config::AppConfig;

pub struct AppContext {
    pub config: AppConfig,
    /// Keeps the background log writer alive for the process lifetime.
    _log_guard: Option<WorkerGuard>,
}

impl AppContext {
    pub fn new(config: AppConfig, log_guard: Option<WorkerGuard>) -> Self {
        Self {
            config,
            _log_guard: log_guard,
        }
    }
}
