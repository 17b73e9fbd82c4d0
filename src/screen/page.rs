//! Background page
//!
//! The page is the caller's own UI underneath any modal: a title, a column
//! of focusable buttons, a status line and a scrollable body. It exists so
//! that focus capture, focus restoration and the scroll lock have real
//! targets.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::scroll::BodyStyle;
use crate::view::ui::point_in_rect;

/// Identifies a focusable page element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

/// A focusable button on the page
#[derive(Debug, Clone)]
pub struct PageElement {
    pub id: ElementId,
    pub label: String,
}

/// What the page did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    /// A button was activated (Enter, Space or click)
    Activated(ElementId),
}

/// Rows above the first button: title and a blank line
const HEADER_ROWS: u16 = 2;

#[derive(Debug, Clone, Default)]
pub struct Page {
    title: String,
    elements: Vec<PageElement>,
    next_id: u32,
    body: Vec<String>,
    scroll: u16,
    status: Option<String>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Add a button and return its id
    pub fn add_button(&mut self, label: impl Into<String>) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.push(PageElement {
            id,
            label: label.into(),
        });
        id
    }

    /// Remove a button; returns false if it did not exist
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        self.elements.len() != before
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.iter().any(|e| e.id == id)
    }

    pub fn elements(&self) -> &[PageElement] {
        &self.elements
    }

    pub fn label(&self, id: ElementId) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.label.as_str())
    }

    pub fn set_body(&mut self, lines: Vec<String>) {
        self.body = lines;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn max_scroll(&self) -> u16 {
        self.body.len().saturating_sub(1).min(u16::MAX as usize) as u16
    }

    /// Scroll the body unless the scroll lock is held; returns true if it moved
    fn scroll_by(&mut self, delta: i32, body: &BodyStyle) -> bool {
        if body.is_scroll_locked() {
            return false;
        }
        let next = (self.scroll as i32 + delta).clamp(0, self.max_scroll() as i32) as u16;
        let moved = next != self.scroll;
        self.scroll = next;
        moved
    }

    /// Clickable area of the button at `index`
    fn button_rect(&self, area: Rect, index: usize) -> Rect {
        let width = self.elements[index].label.width() as u16 + 4;
        Rect::new(
            area.x + 2,
            area.y + HEADER_ROWS + index as u16,
            width.min(area.width.saturating_sub(2)),
            1,
        )
    }

    fn body_top(&self, area: Rect) -> u16 {
        // buttons, blank, status, blank
        area.y + HEADER_ROWS + self.elements.len() as u16 + 3
    }

    fn focus_step(&self, focused: Option<ElementId>, forward: bool) -> Option<ElementId> {
        if self.elements.is_empty() {
            return None;
        }
        let len = self.elements.len();
        let current = focused.and_then(|id| self.elements.iter().position(|e| e.id == id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(idx), true) => (idx + 1) % len,
            (Some(idx), false) => (idx + len - 1) % len,
        };
        Some(self.elements[next].id)
    }

    /// Handle an event aimed at the page
    ///
    /// `focused` is the page element with focus and is updated in place.
    pub fn handle_event(
        &mut self,
        event: &Event,
        area: Rect,
        focused: &mut Option<ElementId>,
        body: &BodyStyle,
    ) -> Option<PageAction> {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Tab | KeyCode::Down => {
                    *focused = self.focus_step(*focused, true);
                    None
                }
                KeyCode::BackTab | KeyCode::Up => {
                    *focused = self.focus_step(*focused, false);
                    None
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    focused.filter(|id| self.contains(*id)).map(PageAction::Activated)
                }
                KeyCode::PageDown => {
                    self.scroll_by(5, body);
                    None
                }
                KeyCode::PageUp => {
                    self.scroll_by(-5, body);
                    None
                }
                _ => None,
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => {
                    self.scroll_by(1, body);
                    None
                }
                MouseEventKind::ScrollUp => {
                    self.scroll_by(-1, body);
                    None
                }
                MouseEventKind::Down(MouseButton::Left) => {
                    let hit = (0..self.elements.len())
                        .find(|&idx| point_in_rect(self.button_rect(area, idx), mouse.column, mouse.row))?;
                    let id = self.elements[hit].id;
                    *focused = Some(id);
                    Some(PageAction::Activated(id))
                }
                _ => None,
            },
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: Option<ElementId>) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let title = Paragraph::new(Line::from(Span::styled(
            self.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(title, Rect::new(area.x, area.y, area.width, 1).intersection(area));

        for (idx, element) in self.elements.iter().enumerate() {
            let rect = self.button_rect(area, idx).intersection(area);
            if rect.height == 0 {
                continue;
            }
            let style = if focused == Some(element.id) {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            frame.render_widget(
                Paragraph::new(Span::styled(format!("[ {} ]", element.label), style)),
                rect,
            );
        }

        let status_y = area.y + HEADER_ROWS + self.elements.len() as u16 + 1;
        if let Some(status) = &self.status {
            let rect = Rect::new(area.x, status_y, area.width, 1).intersection(area);
            frame.render_widget(Paragraph::new(status.clone()), rect);
        }

        let top = self.body_top(area);
        let bottom = area.y + area.height;
        if top < bottom {
            let rect = Rect::new(area.x, top, area.width, bottom - top);
            let lines: Vec<Line> = self
                .body
                .iter()
                .skip(self.scroll as usize)
                .map(|l| Line::from(l.as_str()))
                .collect();
            frame.render_widget(Paragraph::new(lines), rect);
        }
    }
}
