use std::{fs, path::PathBuf};

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "rmc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub config_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl StorageLayout {
    pub fn resolve() -> Result<Self, AppError> {
        let config_base = dirs::config_dir().ok_or_else(|| AppError::StoragePathResolution {
            details: "unable to resolve the user config directory".into(),
        })?;

        let config_dir = config_base.join(APP_DIR_NAME);
        let log_dir = config_dir.join("logs");

        Ok(Self {
            config_dir,
            log_dir,
        })
    }

    pub fn ensure_dirs(&self) -> Result<(), AppError> {
        for dir in [&self.config_dir, &self.log_dir] {
            fs::create_dir_all(dir).map_err(|source| AppError::StorageDirCreate {
                path: dir.clone(),
                source,
            })?;
        }

        Ok(())
    }
}
