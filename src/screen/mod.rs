//! Terminal host surface
//!
//! [`Screen`] plays the role a document plays in a browser: it owns the
//! background [`Page`], a stack of mounted layers, the focus owner, the
//! body scroll mode, the live region and the deferred-task scheduler.
//!
//! ## Architecture
//!
//! - `adapter.rs` - `HostAdapter` / `Component` contract used by the modal opener
//! - `page.rs` - Background page with focusable buttons
//! - `scheduler.rs` - Next-tick task queue
//! - `scroll.rs` - Body overflow mode and the scoped scroll lock
//!
//! An event loop drives the screen as: `dispatch` the input event, `tick`
//! to run deferred work, then `render`.

pub mod adapter;
pub mod page;
pub mod scheduler;
pub mod scroll;

pub use adapter::{Component, EventOutcome, HostAdapter, MountContext, MountHandle};
pub use page::{ElementId, Page, PageAction, PageElement};
pub use scheduler::{Scheduler, Task};
pub use scroll::{BodyStyle, Overflow, ScrollLock};

use crossterm::event::Event;
use ratatui::layout::{Position, Rect};
use ratatui::Frame;

use crate::view::a11y::{AccessNode, LiveRegion};

/// Who currently owns keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Nothing focused (the body)
    None,
    /// A page element
    Page(ElementId),
    /// A mounted modal layer
    Layer(MountHandle),
}

struct Layer {
    handle: MountHandle,
    component: Box<dyn Component>,
}

/// The terminal host: page, mounted layers and shared services
pub struct Screen {
    area: Rect,
    page: Page,
    focus: Focus,
    layers: Vec<Layer>,
    next_handle: u64,
    body: BodyStyle,
    scheduler: Scheduler,
    live_region: LiveRegion,
}

impl Screen {
    /// Create a screen with an empty page for the given terminal size
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_page(Page::default(), width, height)
    }

    pub fn with_page(page: Page, width: u16, height: u16) -> Self {
        Self {
            area: Rect::new(0, 0, width, height),
            page,
            focus: Focus::None,
            layers: Vec::new(),
            next_handle: 1,
            body: BodyStyle::new(),
            scheduler: Scheduler::new(),
            live_region: LiveRegion::new(),
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.area = Rect::new(0, 0, width, height);
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Focus a page element directly (as a click or script would)
    pub fn focus_element(&mut self, id: ElementId) -> bool {
        if self.page.contains(id) {
            self.focus = Focus::Page(id);
            true
        } else {
            false
        }
    }

    pub fn body(&self) -> &BodyStyle {
        &self.body
    }

    pub fn live_region(&self) -> &LiveRegion {
        &self.live_region
    }

    /// Number of mounted layers, active or not
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn has_active_layer(&self) -> bool {
        self.layers.iter().any(|l| l.component.is_active())
    }

    fn top_active_layer(&self) -> Option<usize> {
        self.layers.iter().rposition(|l| l.component.is_active())
    }

    /// Route an input event
    ///
    /// The topmost active layer gets the event first. Modal layers swallow
    /// everything; only events a non-modal layer ignores reach the page.
    pub fn dispatch(&mut self, event: &Event) -> Option<PageAction> {
        if let Event::Resize(width, height) = event {
            self.set_size(*width, *height);
            return None;
        }

        if let Some(idx) = self.top_active_layer() {
            let area = self.area;
            let layer = &mut self.layers[idx];
            let outcome = layer.component.handle_event(event, area);
            if outcome == EventOutcome::Consumed || layer.component.is_modal() {
                return None;
            }
        }

        let mut focused = match self.focus {
            Focus::Page(id) => Some(id),
            _ => None,
        };
        let action = self
            .page
            .handle_event(event, self.area, &mut focused, &self.body);
        if let Some(id) = focused {
            self.focus = Focus::Page(id);
        }
        action
    }

    /// Run the tasks queued before this call; returns how many ran
    pub fn tick(&mut self) -> usize {
        let tasks = self.scheduler.take_ready();
        let count = tasks.len();
        for task in tasks {
            task(self);
        }
        count
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = self.area.intersection(frame.area());
        let focused = match self.focus {
            Focus::Page(id) => Some(id),
            _ => None,
        };
        self.page.render(frame, area, focused);
        for layer in self.layers.iter_mut() {
            if layer.component.is_active() {
                layer.component.render(frame, area);
            }
        }
    }

    /// Cursor requested by the topmost active layer
    pub fn cursor_position(&self) -> Option<Position> {
        self.top_active_layer()
            .and_then(|idx| self.layers[idx].component.cursor_position())
    }

    /// Accessibility nodes of the active layers, bottom to top
    pub fn accessibility_tree(&self) -> Vec<AccessNode> {
        self.layers
            .iter()
            .filter(|l| l.component.is_active())
            .filter_map(|l| l.component.accessibility())
            .collect()
    }
}

impl HostAdapter for Screen {
    fn mount(&mut self, component: Box<dyn Component>) -> MountHandle {
        let handle = MountHandle(self.next_handle);
        self.next_handle += 1;

        self.layers.push(Layer { handle, component });
        let ctx = MountContext {
            handle,
            body: self.body.clone(),
            scheduler: self.scheduler.clone(),
            live_region: self.live_region.clone(),
        };
        if let Some(layer) = self.layers.last_mut() {
            layer.component.mounted(ctx);
            if layer.component.is_modal() && layer.component.is_active() {
                self.focus = Focus::Layer(handle);
            }
        }
        tracing::debug!(handle = handle.id(), "mounted layer");
        handle
    }

    fn unmount(&mut self, handle: MountHandle) -> bool {
        let Some(idx) = self.layers.iter().position(|l| l.handle == handle) else {
            return false;
        };
        let mut layer = self.layers.remove(idx);
        layer.component.unmounted();
        if self.focus == Focus::Layer(handle) {
            self.focus = Focus::None;
        }
        tracing::debug!(handle = handle.id(), "unmounted layer");
        true
    }

    fn is_mounted(&self, handle: MountHandle) -> bool {
        self.layers.iter().any(|l| l.handle == handle)
    }

    fn active_element(&self) -> Option<ElementId> {
        match self.focus {
            Focus::Page(id) => Some(id),
            _ => None,
        }
    }

    fn restore_focus(&mut self, element: ElementId) -> bool {
        let restored = self.focus_element(element);
        tracing::trace!(?element, restored, "restore focus");
        restored
    }

    fn scheduler(&self) -> Scheduler {
        self.scheduler.clone()
    }
}
