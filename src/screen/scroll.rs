//! Background scroll lock
//!
//! The page's overflow mode lives in a shared [`BodyStyle`]. A modal takes
//! a [`ScrollLock`] while it is open; the lock remembers the mode it
//! replaced and puts it back when dropped, whichever way the modal exits.

use std::cell::Cell;
use std::rc::Rc;

/// Whether the page body may scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Auto,
    Hidden,
}

/// Shared handle to the page body's style
#[derive(Debug, Clone, Default)]
pub struct BodyStyle {
    overflow: Rc<Cell<Overflow>>,
}

impl BodyStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow.get()
    }

    pub fn set_overflow(&self, overflow: Overflow) {
        self.overflow.set(overflow);
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.overflow() == Overflow::Hidden
    }

    /// Hide overflow until the returned guard is dropped
    pub fn lock(&self) -> ScrollLock {
        let previous = self.overflow.replace(Overflow::Hidden);
        tracing::trace!(?previous, "body scroll locked");
        ScrollLock {
            body: self.clone(),
            previous,
        }
    }
}

/// Scoped scroll lock; restores the previous overflow mode on drop
#[derive(Debug)]
pub struct ScrollLock {
    body: BodyStyle,
    previous: Overflow,
}

impl ScrollLock {
    /// The overflow mode that will be restored
    pub fn previous(&self) -> Overflow {
        self.previous
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.body.set_overflow(self.previous);
        tracing::trace!(restored = ?self.previous, "body scroll unlocked");
    }
}
