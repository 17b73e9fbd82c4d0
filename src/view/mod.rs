//! View layer
//!
//! - `ui/` - Focus ring and hit-testing helpers
//! - `a11y.rs` - Accessibility tree and live-region announcements

pub mod a11y;
pub mod ui;

pub use a11y::{AccessNode, Announcement, LiveRegion, Politeness, Role};
