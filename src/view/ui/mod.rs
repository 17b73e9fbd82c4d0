//! Reusable UI building blocks

pub mod focus;
pub mod layout;

pub use focus::FocusManager;
pub use layout::{centered_rect, point_in_rect};
