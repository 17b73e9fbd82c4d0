//! Host adapter contract
//!
//! A host renders mounted components on top of its own content. The modal
//! opener only talks to this trait: it mounts a component into a fresh
//! container, reads which element had focus, and later unmounts the
//! container and hands focus back.

use crossterm::event::Event;
use ratatui::layout::{Position, Rect};
use ratatui::Frame;

use super::page::ElementId;
use super::scheduler::Scheduler;
use super::scroll::BodyStyle;
use crate::view::a11y::{AccessNode, LiveRegion};

/// Identifies one mounted container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MountHandle(pub(crate) u64);

impl MountHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Host services handed to a component when it is mounted
#[derive(Debug, Clone)]
pub struct MountContext {
    pub handle: MountHandle,
    pub body: BodyStyle,
    pub scheduler: Scheduler,
    pub live_region: LiveRegion,
}

/// Whether a component used an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Consumed,
    Ignored,
}

/// Something a host can mount into a container
pub trait Component {
    /// Called once, right after the component is attached
    fn mounted(&mut self, ctx: MountContext);

    /// Handle an input event; `area` is the full host area
    fn handle_event(&mut self, event: &Event, area: Rect) -> EventOutcome;

    /// Draw into the full host area
    fn render(&mut self, frame: &mut Frame, area: Rect);

    /// Called once, right before the component is discarded
    fn unmounted(&mut self) {}

    /// Inactive components stay mounted but are neither drawn nor given input
    fn is_active(&self) -> bool {
        true
    }

    /// Modal components take focus on mount and swallow every event
    fn is_modal(&self) -> bool {
        true
    }

    /// Where the terminal cursor belongs while this component has focus
    fn cursor_position(&self) -> Option<Position> {
        None
    }

    fn accessibility(&self) -> Option<AccessNode> {
        None
    }
}

/// Imperative mounting capability of a UI host
pub trait HostAdapter {
    /// Attach a component in a new, isolated container
    fn mount(&mut self, component: Box<dyn Component>) -> MountHandle;

    /// Detach and discard a container; false if it was already gone
    fn unmount(&mut self, handle: MountHandle) -> bool;

    fn is_mounted(&self, handle: MountHandle) -> bool;

    /// The page element that currently has focus
    fn active_element(&self) -> Option<ElementId>;

    /// Move focus back to a page element; false if it no longer exists
    fn restore_focus(&mut self, element: ElementId) -> bool;

    fn scheduler(&self) -> Scheduler;
}
