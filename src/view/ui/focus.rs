//! Focus management utilities
//!
//! This module provides a focus ring for cycling through focusable
//! elements. The dialog uses it as its focus trap: Tab and Shift+Tab only
//! ever move between the ring's elements.

/// Manages focus cycling through a list of elements
///
/// Focus may also be *detached*: held by something outside the ring, such
/// as a heading that takes programmatic focus but is not part of the tab
/// order. From the detached state, `focus_next` enters the ring at its
/// first element and `focus_prev` at its last.
///
/// # Example
///
/// ```
/// use form_modal::view::ui::FocusManager;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Control { Name, Email, Submit }
///
/// let mut focus = FocusManager::new(vec![Control::Name, Control::Email, Control::Submit]);
///
/// assert_eq!(focus.current(), Some(Control::Name));
/// focus.focus_prev(); // wraps around
/// assert_eq!(focus.current(), Some(Control::Submit));
///
/// focus.detach();
/// assert_eq!(focus.current(), None);
/// focus.focus_next();
/// assert_eq!(focus.current(), Some(Control::Name));
/// ```
#[derive(Debug, Clone)]
pub struct FocusManager<T> {
    elements: Vec<T>,
    current: Option<usize>,
}

impl<T> Default for FocusManager<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            current: None,
        }
    }
}

impl<T: Copy + Eq> FocusManager<T> {
    /// Create a new focus manager with the given elements
    ///
    /// Focus starts at the first element (index 0), or detached if empty.
    pub fn new(elements: Vec<T>) -> Self {
        let current = if elements.is_empty() { None } else { Some(0) };
        Self { elements, current }
    }

    /// Create a focus manager whose focus starts outside the ring
    pub fn detached(elements: Vec<T>) -> Self {
        Self {
            elements,
            current: None,
        }
    }

    /// Get the currently focused element, `None` when detached
    pub fn current(&self) -> Option<T> {
        self.current.and_then(|idx| self.elements.get(idx).copied())
    }

    /// Get the current index, `None` when detached
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Move focus to the next element, wrapping at the end
    ///
    /// Returns the newly focused element.
    pub fn focus_next(&mut self) -> Option<T> {
        if self.elements.is_empty() {
            return None;
        }
        self.current = Some(match self.current {
            None => 0,
            Some(idx) => (idx + 1) % self.elements.len(),
        });
        self.current()
    }

    /// Move focus to the previous element, wrapping at the beginning
    ///
    /// Returns the newly focused element.
    pub fn focus_prev(&mut self) -> Option<T> {
        if self.elements.is_empty() {
            return None;
        }
        let len = self.elements.len();
        self.current = Some(match self.current {
            None => len - 1,
            Some(idx) => (idx + len - 1) % len,
        });
        self.current()
    }

    /// Set focus to a specific element
    ///
    /// Returns true if the element was found and focused, false otherwise.
    pub fn set(&mut self, element: T) -> bool {
        if let Some(idx) = self.elements.iter().position(|&e| e == element) {
            self.current = Some(idx);
            true
        } else {
            false
        }
    }

    /// Set focus by index
    ///
    /// Returns true if the index was valid, false otherwise.
    pub fn set_index(&mut self, index: usize) -> bool {
        if index < self.elements.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Release focus to something outside the ring
    pub fn detach(&mut self) {
        self.current = None;
    }

    /// Check if the given element is currently focused
    pub fn is_current(&self, element: T) -> bool {
        self.current() == Some(element)
    }

    pub fn is_detached(&self) -> bool {
        self.current.is_none()
    }

    /// Get the number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
