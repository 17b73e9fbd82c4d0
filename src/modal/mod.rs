//! The imperative form modal
//!
//! - `controller.rs` - Open flag, trigger and resolve/close exits
//! - `host.rs` - `FormModal`, the mounted dialog component
//! - `lock.rs` - One-dialog-at-a-time lock
//! - `opener.rs` - `ModalOpener::open`, returning a `PendingResult`
//! - `render.rs` - Dialog layout, hit testing and drawing
//! - `settle.rs` - Single-settlement result cell

pub mod controller;
pub mod host;
pub mod lock;
pub mod opener;
pub mod render;
pub mod settle;

pub use controller::{ModalController, TriggerRef};
pub use host::{DialogFocus, FormModal, ModalPhase, ModalProps, DEFAULT_MAX_WIDTH};
pub use lock::{OpenLock, OpenLockGuard};
pub use opener::{ModalOpener, OpenOptions};
pub use settle::{PendingResult, ResultCell};
