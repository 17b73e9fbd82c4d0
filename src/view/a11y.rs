//! Accessibility tree
//!
//! Terminal widgets have no platform accessibility API, so components
//! describe themselves as a tree of [`AccessNode`]s: roles, accessible
//! names, label/description relationships and state flags. Screen readers
//! and tests read this tree instead of scraping the rendered cells.
//!
//! Messages that must be spoken right away (validation errors) go through
//! a [`LiveRegion`]. Each announcement is also emitted as a `tracing` event
//! with target `a11y`, which the announcement log layer captures.

use std::cell::RefCell;
use std::rc::Rc;

/// Semantic role of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Dialog,
    Heading { level: u8 },
    Paragraph,
    Form,
    TextBox,
    ComboBox,
    Option,
    Button,
    Alert,
}

/// One node of the accessibility tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessNode {
    pub id: String,
    pub role: Role,
    /// Accessible name (label text, button caption, heading text)
    pub name: String,
    /// Current value for inputs
    pub value: Option<String>,
    /// Modal flag; only meaningful for dialogs
    pub modal: bool,
    pub invalid: bool,
    pub focused: bool,
    pub selected: bool,
    /// Id of the node that labels this one
    pub labelled_by: Option<String>,
    /// Id of the node that describes this one
    pub described_by: Option<String>,
    pub children: Vec<AccessNode>,
}

impl AccessNode {
    pub fn new(id: impl Into<String>, role: Role, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            name: name.into(),
            value: None,
            modal: false,
            invalid: false,
            focused: false,
            selected: false,
            labelled_by: None,
            described_by: None,
            children: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn labelled_by(mut self, id: impl Into<String>) -> Self {
        self.labelled_by = Some(id.into());
        self
    }

    pub fn described_by(mut self, id: Option<impl Into<String>>) -> Self {
        self.described_by = id.map(Into::into);
        self
    }

    pub fn child(mut self, child: AccessNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = AccessNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Depth-first search by id
    pub fn find(&self, id: &str) -> Option<&AccessNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// All nodes with the given role, in document order
    pub fn find_all(&self, role: Role) -> Vec<&AccessNode> {
        let mut found = Vec::new();
        self.collect(&mut |node| node.role == role, &mut found);
        found
    }

    /// First node with the given role and accessible name
    pub fn find_by_name(&self, role: Role, name: &str) -> Option<&AccessNode> {
        self.find_all(role).into_iter().find(|node| node.name == name)
    }

    /// The focused node, if any
    pub fn focused_node(&self) -> Option<&AccessNode> {
        if self.focused {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.focused_node())
    }

    fn collect<'a>(
        &'a self,
        pred: &mut dyn FnMut(&AccessNode) -> bool,
        out: &mut Vec<&'a AccessNode>,
    ) {
        if pred(self) {
            out.push(self);
        }
        for child in &self.children {
            child.collect(pred, out);
        }
    }
}

/// How urgently an announcement interrupts the screen reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Politeness {
    /// Wait until the reader is idle
    Polite,
    /// Interrupt and speak immediately
    Assertive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub politeness: Politeness,
    pub text: String,
}

/// Shared queue of announcements for the current screen
#[derive(Debug, Clone, Default)]
pub struct LiveRegion {
    announcements: Rc<RefCell<Vec<Announcement>>>,
}

impl LiveRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn announce(&self, politeness: Politeness, text: impl Into<String>) {
        let text = text.into();
        match politeness {
            Politeness::Assertive => tracing::warn!(target: "a11y", "{}", text),
            Politeness::Polite => tracing::info!(target: "a11y", "{}", text),
        }
        self.announcements
            .borrow_mut()
            .push(Announcement { politeness, text });
    }

    pub fn announce_assertive(&self, text: impl Into<String>) {
        self.announce(Politeness::Assertive, text);
    }

    /// Everything announced so far, oldest first
    pub fn announcements(&self) -> Vec<Announcement> {
        self.announcements.borrow().clone()
    }

    /// Take and clear the pending announcements
    pub fn drain(&self) -> Vec<Announcement> {
        std::mem::take(&mut *self.announcements.borrow_mut())
    }
}
