// Form modal library - exposes all core modules for testing

// Core modules at root level
pub mod config;

// Organized modules
pub mod form;
pub mod modal;
pub mod screen;
#[cfg(feature = "runtime")]
pub mod services;
pub mod view;

pub use form::{FieldId, FormErrors, FormInput, FormValues, PartialFormValues, Validator};
pub use modal::{ModalController, ModalOpener, OpenLock, OpenOptions, PendingResult};
pub use screen::{HostAdapter, Screen};
