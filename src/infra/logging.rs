use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError, storage_layout::StorageLayout};

const LOG_FILE_NAME: &str = "rmc.log";

/// Initializes the tracing subscriber.
///
/// While the shell runs, the terminal is the rendering surface, so the
/// default sink is a file under the app storage layout. The returned guard
/// must be kept alive for the lifetime of the process; dropping it stops
/// the background log writer.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>, AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if !config.to_file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .map_err(AppError::LoggingInit)?;
        return Ok(None);
    }

    let layout = StorageLayout::resolve()?;
    layout.ensure_dirs()?;

    let appender = tracing_appender::rolling::never(&layout.log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(AppError::LoggingInit)?;

    Ok(Some(guard))
}
