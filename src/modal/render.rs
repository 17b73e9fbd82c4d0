//! Dialog layout and drawing
//!
//! [`DialogLayout`] is computed from the host area and the current error
//! set. Rendering and mouse hit testing both use it, so a click always
//! lands on what was drawn.

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::controller::ModalController;
use super::host::DialogFocus;
use crate::form::{FieldId, FormErrors, FormValues, Select, TextInput};
use crate::view::ui::{centered_rect, point_in_rect};

pub const CANCEL_LABEL: &str = "Cancel";
pub const SUBMIT_LABEL: &str = "Submit";

/// Narrowest dialog we will lay out
const MIN_WIDTH: u16 = 24;

fn button_text(label: &str) -> String {
    format!("[ {} ]", label)
}

/// Screen rectangles of one form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldRects {
    pub label: Rect,
    pub input: Rect,
    pub error: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogLayout {
    /// Bordered dialog box; everything outside it is overlay
    pub content: Rect,
    pub title: Rect,
    pub description: Rect,
    description_lines: Vec<String>,
    fields: [FieldRects; 4],
    pub cancel: Rect,
    pub submit: Rect,
}

impl DialogLayout {
    pub fn compute(area: Rect, description: &str, errors: &FormErrors, max_width: u16) -> Self {
        let width = max_width
            .min(area.width.saturating_sub(4))
            .max(MIN_WIDTH)
            .min(area.width);
        // border plus one column of padding on each side
        let inner_width = width.saturating_sub(4);
        let description_lines = wrap(description, inner_width as usize);

        let field_rows: u16 = FieldId::ALL
            .iter()
            .map(|field| if errors.contains(*field) { 4 } else { 3 })
            .sum();
        // title, blank, description, blank, fields, buttons
        let description_rows = u16::try_from(description_lines.len()).unwrap_or(u16::MAX);
        let rows = description_rows
            .saturating_add(field_rows)
            .saturating_add(4);
        let content = centered_rect(width, rows.saturating_add(2), area);

        let inner = Rect::new(
            content.x + 2,
            content.y + 1,
            inner_width,
            content.height.saturating_sub(2),
        );
        let row = |y: u16| Rect::new(inner.x, y, inner.width, 1).intersection(inner);

        let mut y = inner.y;
        let title = row(y);
        y = y.saturating_add(2);
        let description =
            Rect::new(inner.x, y, inner.width, description_rows).intersection(inner);
        y = y.saturating_add(description_rows).saturating_add(1);

        let mut fields = [FieldRects::default(); 4];
        for (slot, field) in fields.iter_mut().zip(FieldId::ALL) {
            slot.label = row(y);
            slot.input = row(y.saturating_add(1));
            y = y.saturating_add(2);
            if errors.contains(field) {
                slot.error = Some(row(y));
                y = y.saturating_add(1);
            }
            y = y.saturating_add(1);
        }

        let button_width = button_text(SUBMIT_LABEL).width() as u16;
        let submit_x = (inner.x + inner.width).saturating_sub(button_width);
        let submit = Rect::new(submit_x, y, button_width, 1).intersection(inner);
        let cancel_width = button_text(CANCEL_LABEL).width() as u16;
        let cancel = Rect::new(submit_x.saturating_sub(cancel_width + 1), y, cancel_width, 1)
            .intersection(inner);

        Self {
            content,
            title,
            description,
            description_lines,
            fields,
            cancel,
            submit,
        }
    }

    pub fn field(&self, field: FieldId) -> &FieldRects {
        &self.fields[field as usize]
    }

    pub fn description_lines(&self) -> &[String] {
        &self.description_lines
    }

    /// Whether a point is on the dialog rather than the overlay
    pub fn contains(&self, x: u16, y: u16) -> bool {
        point_in_rect(self.content, x, y)
    }

    /// The control under a point, if any
    pub fn hit(&self, x: u16, y: u16) -> Option<DialogFocus> {
        if point_in_rect(self.cancel, x, y) {
            return Some(DialogFocus::Cancel);
        }
        if point_in_rect(self.submit, x, y) {
            return Some(DialogFocus::Submit);
        }
        if point_in_rect(self.title, x, y) {
            return Some(DialogFocus::Title);
        }
        FieldId::ALL.into_iter().find_map(|field| {
            let rects = self.field(field);
            // clicking a label focuses its input
            (point_in_rect(rects.label, x, y) || point_in_rect(rects.input, x, y))
                .then_some(DialogFocus::Field(field))
        })
    }
}

/// Everything the dialog's sub-renderers may read
///
/// Borrowed from the dialog for the duration of one draw. The controller
/// rides along so the parts of the dialog share one view of whether it is
/// still open.
pub struct ModalScope<'a> {
    pub controller: &'a ModalController<FormValues>,
    pub title: &'a str,
    pub focus: DialogFocus,
    pub name: &'a TextInput,
    pub email: &'a TextInput,
    pub experience: &'a Select,
    pub github_url: &'a TextInput,
    pub errors: &'a FormErrors,
}

impl ModalScope<'_> {
    pub fn text_input(&self, field: FieldId) -> Option<&TextInput> {
        match field {
            FieldId::Name => Some(self.name),
            FieldId::Email => Some(self.email),
            FieldId::GithubUrl => Some(self.github_url),
            FieldId::ExperienceYears => None,
        }
    }
}

/// Draw the overlay and the dialog
pub fn render_dialog(frame: &mut Frame, area: Rect, layout: &DialogLayout, scope: &ModalScope) {
    frame
        .buffer_mut()
        .set_style(area, Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(Clear, layout.content);
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
        layout.content,
    );

    render_header(frame, layout, scope);
    render_body(frame, layout, scope);
    render_footer(frame, layout, scope);

    if let Some(position) = cursor_position(layout, scope) {
        frame.set_cursor_position(position);
    }
}

fn render_header(frame: &mut Frame, layout: &DialogLayout, scope: &ModalScope) {
    let mut style = Style::default().add_modifier(Modifier::BOLD);
    if scope.focus == DialogFocus::Title {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    frame.render_widget(
        Paragraph::new(Span::styled(scope.title.to_string(), style)),
        layout.title,
    );

    let lines: Vec<Line> = layout
        .description_lines
        .iter()
        .map(|l| Line::from(l.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines), layout.description);
}

fn render_body(frame: &mut Frame, layout: &DialogLayout, scope: &ModalScope) {
    for field in FieldId::ALL {
        let rects = layout.field(field);
        let focused = scope.focus == DialogFocus::Field(field);
        let invalid = scope.errors.contains(field);

        let label_style = if invalid {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(field.label(), label_style)),
            rects.label,
        );

        let mut input_style = Style::default().add_modifier(Modifier::UNDERLINED);
        if focused {
            input_style = input_style.add_modifier(Modifier::REVERSED);
        }
        let text = match scope.text_input(field) {
            Some(input) => visible_text(input, rects.input.width).to_string(),
            None => format!("{} ▾", scope.experience.display_text()),
        };
        // pad so the whole input row carries the style
        let padded = format!("{:<width$}", text, width = rects.input.width as usize);
        frame.render_widget(Paragraph::new(Span::styled(padded, input_style)), rects.input);

        if let (Some(rect), Some(error)) = (rects.error, scope.errors.get(field)) {
            frame.render_widget(
                Paragraph::new(Span::styled(error.message, Style::default().fg(Color::Red))),
                rect,
            );
        }
    }
}

fn render_footer(frame: &mut Frame, layout: &DialogLayout, scope: &ModalScope) {
    let enabled = scope.controller.is_open();
    for (rect, label, target) in [
        (layout.cancel, CANCEL_LABEL, DialogFocus::Cancel),
        (layout.submit, SUBMIT_LABEL, DialogFocus::Submit),
    ] {
        let mut style = Style::default();
        if !enabled {
            style = style.add_modifier(Modifier::DIM);
        } else if scope.focus == target {
            style = style.add_modifier(Modifier::REVERSED);
        }
        frame.render_widget(Paragraph::new(Span::styled(button_text(label), style)), rect);
    }
}

/// Terminal cursor for the focused text field
pub fn cursor_position(layout: &DialogLayout, scope: &ModalScope) -> Option<Position> {
    let DialogFocus::Field(field) = scope.focus else {
        return None;
    };
    let input = scope.text_input(field)?;
    let rect = layout.field(field).input;
    if rect.width == 0 || rect.height == 0 {
        return None;
    }
    let column = input.cursor_column();
    let offset = scroll_offset(column, rect.width);
    // always lands inside the input row
    let visible = (column - offset).min(usize::from(rect.width) - 1) as u16;
    Some(Position::new(rect.x.saturating_add(visible), rect.y))
}

/// Columns hidden on the left so the cursor stays inside `width`
fn scroll_offset(cursor_column: usize, width: u16) -> usize {
    if width == 0 {
        return 0;
    }
    cursor_column.saturating_add(1).saturating_sub(usize::from(width))
}

fn visible_text(input: &TextInput, width: u16) -> &str {
    let skip = scroll_offset(input.cursor_column(), width);
    if skip == 0 {
        return input.value();
    }
    let value = input.value();
    let mut skipped = 0;
    for (idx, grapheme) in value.grapheme_indices(true) {
        if skipped >= skip {
            return &value[idx..];
        }
        skipped += grapheme.width();
    }
    ""
}

/// Greedy word wrap on display width
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.width()
        } else {
            line.width() + 1 + word.width()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
