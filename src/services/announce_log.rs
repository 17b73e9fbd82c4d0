//! Announcement log layer for tracing
//!
//! Live-region announcements are emitted as tracing events with target
//! `a11y`. This layer copies them, timestamped, into their own file so a
//! session's spoken output can be reviewed after the fact.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Target used by [`crate::view::a11y::LiveRegion`]
pub const ANNOUNCE_TARGET: &str = "a11y";

/// A tracing layer that writes announcements to a file
pub struct AnnounceLogLayer {
    file: Arc<Mutex<File>>,
}

/// Where the announcements went
#[derive(Debug, Clone)]
pub struct AnnounceLogHandle {
    pub path: PathBuf,
}

/// Create the layer over the default announcements log
pub fn create() -> std::io::Result<(AnnounceLogLayer, AnnounceLogHandle)> {
    create_with_path(super::log_dirs::announce_log_path())
}

pub fn create_with_path(path: PathBuf) -> std::io::Result<(AnnounceLogLayer, AnnounceLogHandle)> {
    let file = File::create(&path)?;
    Ok((
        AnnounceLogLayer {
            file: Arc::new(Mutex::new(file)),
        },
        AnnounceLogHandle { path },
    ))
}

impl<S> Layer<S> for AnnounceLogLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target() != ANNOUNCE_TARGET {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        // WARN marks assertive announcements
        let urgency = if *metadata.level() == tracing::Level::WARN {
            "assertive"
        } else {
            "polite"
        };
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("{} [{}] {}\n", timestamp, urgency, visitor.0);

        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }
}

#[derive(Default)]
struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        }
    }
}
