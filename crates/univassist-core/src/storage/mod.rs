mod config;
mod record_store;
pub mod seed;

pub use config::{Config, PlannerConfig, ServerConfig};
pub use record_store::{next_id, Record, RecordStore};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `UNIVASSIST_DATA_DIR` wins when set. Otherwise the directory is
/// `~/.config/univassist[-dev]/`; set UNIVASSIST_ENV=dev to use the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("UNIVASSIST_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("UNIVASSIST_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("univassist-dev")
            } else {
                base_dir.join("univassist")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
