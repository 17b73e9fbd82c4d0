//! Imperative entry point
//!
//! `ModalOpener::open` mounts a fresh [`FormModal`] into a host and hands
//! back a [`PendingResult`]. Only one dialog may be open per [`OpenLock`];
//! a call made while another dialog is pending settles to `None` at once.

use regex::Regex;

use super::controller::{ModalController, TriggerRef};
use super::host::{FormModal, ModalProps};
use super::lock::OpenLock;
use super::settle::{PendingResult, ResultCell};
use crate::config::ModalConfig;
use crate::form::{FormInput, FormValues, PartialFormValues, Validator};
use crate::screen::HostAdapter;

/// Per-call overrides of the configured defaults
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    pub title: Option<String>,
    pub description: Option<String>,
    pub initial_values: Option<PartialFormValues>,
    pub email_pattern: Option<Regex>,
    pub experience_options: Option<Vec<String>>,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn initial_values(mut self, values: PartialFormValues) -> Self {
        self.initial_values = Some(values);
        self
    }

    pub fn email_pattern(mut self, pattern: Regex) -> Self {
        self.email_pattern = Some(pattern);
        self
    }

    pub fn experience_options(mut self, options: Vec<String>) -> Self {
        self.experience_options = Some(options);
        self
    }
}

/// Opens form dialogs on a host
#[derive(Debug, Clone)]
pub struct ModalOpener {
    defaults: ModalConfig,
    email_pattern: Regex,
    lock: OpenLock,
}

impl ModalOpener {
    /// Build an opener over the configured defaults, sharing the global lock
    pub fn new(config: &ModalConfig) -> Result<Self, regex::Error> {
        Ok(Self {
            email_pattern: Regex::new(&config.email_pattern)?,
            defaults: config.clone(),
            lock: OpenLock::global().clone(),
        })
    }

    /// Use a separate lock instead of the process-wide one
    pub fn with_lock(mut self, lock: OpenLock) -> Self {
        self.lock = lock;
        self
    }

    pub fn lock(&self) -> &OpenLock {
        &self.lock
    }

    /// Open the form dialog on `host`
    ///
    /// Resolves to the validated values on submit and to `None` on any
    /// cancellation, or right away if a dialog is already open.
    pub fn open(&self, host: &mut dyn HostAdapter, options: OpenOptions) -> PendingResult<FormValues> {
        let Some(guard) = self.lock.try_acquire() else {
            tracing::warn!("form modal already open, rejecting");
            return PendingResult::ready(None);
        };

        let trigger = TriggerRef::new(host.active_element());
        let (cell, pending) = ResultCell::channel();
        let controller = ModalController::new(trigger, cell);

        let handle = host.mount(Box::new(FormModal::new(
            controller.clone(),
            self.props(options),
        )));

        let scheduler = host.scheduler();
        controller.on_settled(move || {
            guard.release();
            scheduler.defer(move |host| {
                host.unmount(handle);
            });
        });

        tracing::debug!(handle = handle.id(), ?trigger, "opened form modal");
        pending
    }

    fn props(&self, options: OpenOptions) -> ModalProps {
        let initial = options
            .initial_values
            .unwrap_or_else(|| self.defaults.initial_values.clone());
        ModalProps {
            title: options.title.unwrap_or_else(|| self.defaults.title.clone()),
            description: options
                .description
                .unwrap_or_else(|| self.defaults.description.clone()),
            validator: Validator::new(
                options
                    .email_pattern
                    .unwrap_or_else(|| self.email_pattern.clone()),
                options
                    .experience_options
                    .unwrap_or_else(|| self.defaults.experience_options.clone()),
            ),
            initial: FormInput::from_partial(&initial),
            max_width: self.defaults.max_width,
        }
    }
}
