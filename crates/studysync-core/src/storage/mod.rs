pub mod config;
pub mod snapshot;

pub use config::Config;
pub use snapshot::Snapshot;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/studysync[-dev]/` based on STUDYSYNC_ENV.
///
/// Set STUDYSYNC_ENV=dev to use development data directory.
/// STUDYSYNC_DATA_DIR overrides the location entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("STUDYSYNC_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("STUDYSYNC_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("studysync-dev")
            } else {
                base_dir.join("studysync")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
