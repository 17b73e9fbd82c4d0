//! Process-wide open lock
//!
//! Only one imperative form modal may be open at a time. The flag is an
//! explicit service rather than a hidden global so tests can inject their
//! own instance; [`OpenLock::global`] is the one the application shares.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock};

static GLOBAL: LazyLock<OpenLock> = LazyLock::new(OpenLock::new);

/// A shareable "a modal is open" flag
#[derive(Debug, Clone, Default)]
pub struct OpenLock {
    held: Arc<AtomicBool>,
}

impl OpenLock {
    /// Create an independent lock, initially free
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide lock
    pub fn global() -> &'static OpenLock {
        &GLOBAL
    }

    /// Take the lock if it is free
    pub fn try_acquire(&self) -> Option<OpenLockGuard> {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| OpenLockGuard {
                held: self.held.clone(),
                released: false,
            })
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }

    /// Force the lock free, e.g. between test cases
    pub fn reset(&self) {
        self.held.store(false, Ordering::Release);
    }
}

/// Proof of holding the open lock; releases it exactly once
#[derive(Debug)]
pub struct OpenLockGuard {
    held: Arc<AtomicBool>,
    released: bool,
}

impl OpenLockGuard {
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if !self.released {
            self.released = true;
            self.held.store(false, Ordering::Release);
        }
    }
}

impl Drop for OpenLockGuard {
    fn drop(&mut self) {
        self.release_once();
    }
}
