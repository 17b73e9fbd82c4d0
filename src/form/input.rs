//! Single-line text input
//!
//! Holds the value and a cursor kept on grapheme boundaries. Only editing
//! keys are handled here; Tab, Enter and Escape belong to the dialog.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Outcome of feeding a key to an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditResult {
    /// The value changed
    Changed,
    /// The key was handled but the value is unchanged (cursor movement)
    Consumed,
    /// The key is not an editing key
    Ignored,
}

/// A single-line editable text value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Byte offset into `value`, always on a grapheme boundary
    cursor: usize,
}

impl TextInput {
    /// Create an input with the cursor at the end of `value`
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Byte offset of the cursor
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display column of the cursor, counting wide characters
    pub fn cursor_column(&self) -> usize {
        self.value[..self.cursor].width()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the grapheme before the cursor
    pub fn backspace(&mut self) -> bool {
        match self.prev_boundary() {
            Some(start) => {
                self.value.replace_range(start..self.cursor, "");
                self.cursor = start;
                true
            }
            None => false,
        }
    }

    /// Delete the grapheme under the cursor
    pub fn delete(&mut self) -> bool {
        match self.next_boundary() {
            Some(end) => {
                self.value.replace_range(self.cursor..end, "");
                true
            }
            None => false,
        }
    }

    pub fn move_left(&mut self) {
        if let Some(start) = self.prev_boundary() {
            self.cursor = start;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(end) = self.next_boundary() {
            self.cursor = end;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Apply an editing key
    pub fn handle_key(&mut self, key: KeyEvent) -> EditResult {
        let plain = key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT;
        match key.code {
            KeyCode::Char(c) if plain => {
                self.insert_char(c);
                EditResult::Changed
            }
            KeyCode::Char('u') if key.modifiers == KeyModifiers::CONTROL => {
                if self.value.is_empty() {
                    EditResult::Consumed
                } else {
                    self.set_value(String::new());
                    EditResult::Changed
                }
            }
            KeyCode::Backspace => changed_if(self.backspace()),
            KeyCode::Delete => changed_if(self.delete()),
            KeyCode::Left => {
                self.move_left();
                EditResult::Consumed
            }
            KeyCode::Right => {
                self.move_right();
                EditResult::Consumed
            }
            KeyCode::Home => {
                self.move_home();
                EditResult::Consumed
            }
            KeyCode::End => {
                self.move_end();
                EditResult::Consumed
            }
            _ => EditResult::Ignored,
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .grapheme_indices(true)
            .next_back()
            .map(|(idx, _)| idx)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.value[self.cursor..]
            .graphemes(true)
            .next()
            .map(|g| self.cursor + g.len())
    }
}

fn changed_if(changed: bool) -> EditResult {
    if changed {
        EditResult::Changed
    } else {
        EditResult::Consumed
    }
}
