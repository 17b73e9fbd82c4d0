//! Where log files go
//!
//! Logs live under the platform's local data dir
//! (`~/.local/share/form-modal/logs` on Linux), falling back to the
//! system temp dir when there is none.

use std::path::PathBuf;

const APP_DIR: &str = "form-modal";

/// Directory for all log files, created on demand
pub fn log_dir() -> PathBuf {
    let dir = dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join("logs");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!("Failed to create log dir {}: {}", dir.display(), e);
    }
    dir
}

/// Main diagnostic log
pub fn main_log_path() -> PathBuf {
    log_dir().join("form-modal.log")
}

/// Accessibility announcements log
pub fn announce_log_path() -> PathBuf {
    log_dir().join("announcements.log")
}
