//! Modal controller
//!
//! The handle a dialog and its sub-renderers use to leave the dialog. It
//! carries the open flag, a back-reference to the page element that had
//! focus when the dialog opened, and the writing end of the result.

use std::cell::Cell;
use std::rc::Rc;

use super::settle::ResultCell;
use crate::screen::ElementId;

/// Back-reference to the element that opened the dialog
///
/// Only used to put focus back; the page owns the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerRef(Option<ElementId>);

impl TriggerRef {
    pub fn new(element: Option<ElementId>) -> Self {
        Self(element)
    }

    pub fn element(&self) -> Option<ElementId> {
        self.0
    }
}

/// Open flag, trigger and result exits of one dialog
pub struct ModalController<T> {
    open: Rc<Cell<bool>>,
    trigger: TriggerRef,
    cell: ResultCell<T>,
}

impl<T> Clone for ModalController<T> {
    fn clone(&self) -> Self {
        Self {
            open: self.open.clone(),
            trigger: self.trigger,
            cell: self.cell.clone(),
        }
    }
}

impl<T> std::fmt::Debug for ModalController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalController")
            .field("open", &self.open.get())
            .field("trigger", &self.trigger)
            .field("settled", &self.cell.is_settled())
            .finish()
    }
}

impl<T> ModalController<T> {
    /// A controller for an open dialog
    pub fn new(trigger: TriggerRef, cell: ResultCell<T>) -> Self {
        Self {
            open: Rc::new(Cell::new(true)),
            trigger,
            cell,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// `set_open(false)` cancels the dialog; `set_open(true)` on a closed
    /// dialog does nothing, since a settled dialog cannot reopen
    pub fn set_open(&self, open: bool) -> bool {
        if open {
            return false;
        }
        self.close()
    }

    pub fn trigger(&self) -> TriggerRef {
        self.trigger
    }

    /// Close with a value; false if the dialog already exited
    pub fn resolve(&self, value: T) -> bool {
        self.exit(Some(value))
    }

    /// Close without a value; false if the dialog already exited
    pub fn close(&self) -> bool {
        self.exit(None)
    }

    pub fn is_settled(&self) -> bool {
        self.cell.is_settled()
    }

    /// Run `hook` when the dialog exits, before the result is delivered
    pub fn on_settled(&self, hook: impl FnOnce() + 'static) {
        self.cell.on_settled(hook);
    }

    fn exit(&self, value: Option<T>) -> bool {
        if !self.open.get() {
            return false;
        }
        self.open.set(false);
        self.cell.settle(value)
    }
}
