use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "slowka";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Directory for files the app writes on its own (progress, logs).
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join(APP_NAME),
            )
        } else {
            ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_local_dir().to_path_buf())
        }
    }

    pub fn progress_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("progress.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("slowka.log"))
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.json"))
    }
}
