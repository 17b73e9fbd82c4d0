//! Closed-set select
//!
//! Mirrors a native `<select>` with a disabled placeholder: it starts
//! unselected (empty value) and arrow keys step through the options
//! without wrapping. Typing a character jumps to the next option that
//! starts with it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::input::EditResult;

/// Placeholder shown while nothing is selected
pub const SELECT_PLACEHOLDER: &str = "Select…";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    options: Vec<String>,
    selected: Option<usize>,
}

impl Select {
    /// Create a select over `options`, preselecting `initial` if it is one of them
    pub fn new(options: Vec<String>, initial: &str) -> Self {
        let selected = options.iter().position(|o| o == initial);
        Self { options, selected }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Selected option, or the empty string when nothing is selected
    pub fn value(&self) -> &str {
        self.selected
            .and_then(|idx| self.options.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Text to display: the selection or the placeholder
    pub fn display_text(&self) -> &str {
        match self.selected {
            Some(_) => self.value(),
            None => SELECT_PLACEHOLDER,
        }
    }

    /// Step to the next option; from unselected, picks the first
    pub fn select_next(&mut self) -> bool {
        if self.options.is_empty() {
            return false;
        }
        let next = match self.selected {
            None => 0,
            Some(idx) => (idx + 1).min(self.options.len() - 1),
        };
        self.set_selected(next)
    }

    /// Step to the previous option; from unselected, picks the last
    pub fn select_prev(&mut self) -> bool {
        if self.options.is_empty() {
            return false;
        }
        let prev = match self.selected {
            None => self.options.len() - 1,
            Some(idx) => idx.saturating_sub(1),
        };
        self.set_selected(prev)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditResult {
        let changed = match key.code {
            KeyCode::Down | KeyCode::Right => self.select_next(),
            KeyCode::Up | KeyCode::Left => self.select_prev(),
            KeyCode::Home if !self.options.is_empty() => self.set_selected(0),
            KeyCode::End if !self.options.is_empty() => self.set_selected(self.options.len() - 1),
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.jump_to_prefix(c)
            }
            _ => return EditResult::Ignored,
        };
        if changed {
            EditResult::Changed
        } else {
            EditResult::Consumed
        }
    }

    fn set_selected(&mut self, idx: usize) -> bool {
        let changed = self.selected != Some(idx);
        self.selected = Some(idx);
        changed
    }

    /// Type-ahead: cycle through options starting with `c`
    fn jump_to_prefix(&mut self, c: char) -> bool {
        let len = self.options.len();
        let start = self.selected.map(|idx| idx + 1).unwrap_or(0);
        let lower = c.to_lowercase().to_string();
        let found = (0..len).map(|offset| (start + offset) % len).find(|&idx| {
            self.options[idx].to_lowercase().starts_with(&lower)
        });
        match found {
            Some(idx) => self.set_selected(idx),
            None => false,
        }
    }
}
