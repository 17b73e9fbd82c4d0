//! Global tracing subscriber
//!
//! Diagnostics go to a log file (the terminal belongs to the UI).
//! `RUST_LOG` overrides the default filter of `form_modal=debug`.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use super::announce_log::{self, AnnounceLogHandle};

const DEFAULT_FILTER: &str = "form_modal=debug,a11y=info";

/// Paths of the files the subscriber writes
#[derive(Debug, Clone)]
pub struct LogHandles {
    pub main_log: PathBuf,
    pub announcements: AnnounceLogHandle,
}

/// Install the global subscriber
///
/// `log_path` replaces the default main log location.
pub fn init(log_path: Option<PathBuf>) -> std::io::Result<LogHandles> {
    let main_log = log_path.unwrap_or_else(super::log_dirs::main_log_path);
    let file = File::create(&main_log)?;
    let (announce_layer, announcements) = announce_log::create()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false),
        )
        .with(announce_layer)
        .try_init()
        .map_err(std::io::Error::other)?;

    tracing::info!(log = %main_log.display(), "logging initialized");
    Ok(LogHandles {
        main_log,
        announcements,
    })
}
