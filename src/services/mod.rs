//! Runtime services: logging setup and log locations

pub mod announce_log;
pub mod log_dirs;
pub mod tracing_setup;
