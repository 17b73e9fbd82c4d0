//! The form dialog component
//!
//! `FormModal` is what the opener mounts. It owns the draft, the field
//! editors and the focus trap, and leaves through its controller. The
//! lifecycle is one-shot: `Opening → Open → Closing → Closed`.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use ratatui::Frame;

use super::controller::ModalController;
use super::render::{self, DialogLayout, ModalScope, CANCEL_LABEL, SUBMIT_LABEL};
use crate::form::{
    EditResult, FieldId, FormErrors, FormInput, FormValues, Select, TextInput, Validator,
};
use crate::screen::{Component, EventOutcome, MountContext, ScrollLock};
use crate::view::a11y::{AccessNode, LiveRegion, Role};
use crate::view::ui::FocusManager;

pub const TITLE_ID: &str = "modal-title";
pub const DESCRIPTION_ID: &str = "modal-description";
pub const DIALOG_ID: &str = "form-modal";

/// Default dialog width in columns
pub const DEFAULT_MAX_WIDTH: u16 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

/// What has keyboard focus inside the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogFocus {
    /// The heading; focused on open, not reachable with Tab
    Title,
    Field(FieldId),
    Cancel,
    Submit,
}

/// Content of one dialog instance, fixed at mount
#[derive(Debug, Clone)]
pub struct ModalProps {
    pub title: String,
    pub description: String,
    pub validator: Validator,
    pub initial: FormInput,
    pub max_width: u16,
}

impl Default for ModalProps {
    fn default() -> Self {
        Self {
            title: "Application form".to_string(),
            description: String::new(),
            validator: Validator::default(),
            initial: FormInput::default(),
            max_width: DEFAULT_MAX_WIDTH,
        }
    }
}

fn tab_ring() -> Vec<DialogFocus> {
    FieldId::ALL
        .into_iter()
        .map(DialogFocus::Field)
        .chain([DialogFocus::Cancel, DialogFocus::Submit])
        .collect()
}

pub struct FormModal {
    title: String,
    description: String,
    validator: Validator,
    max_width: u16,
    controller: ModalController<FormValues>,
    phase: ModalPhase,

    name: TextInput,
    email: TextInput,
    experience: Select,
    github_url: TextInput,
    errors: FormErrors,
    /// Set by the first submit; afterwards edits revalidate their field
    submitted: bool,

    focus: FocusManager<DialogFocus>,
    scroll_lock: Rc<RefCell<Option<ScrollLock>>>,
    live_region: LiveRegion,
    area: Rect,
}

impl FormModal {
    pub fn new(controller: ModalController<FormValues>, props: ModalProps) -> Self {
        let experience = Select::new(
            props.validator.experience_options().to_vec(),
            &props.initial.experience_years,
        );
        Self {
            title: props.title,
            description: props.description,
            max_width: props.max_width,
            controller,
            phase: ModalPhase::Opening,
            name: TextInput::new(props.initial.name),
            email: TextInput::new(props.initial.email),
            experience,
            github_url: TextInput::new(props.initial.github_url),
            validator: props.validator,
            errors: FormErrors::new(),
            submitted: false,
            focus: FocusManager::detached(tab_ring()),
            scroll_lock: Rc::new(RefCell::new(None)),
            live_region: LiveRegion::new(),
            area: Rect::default(),
        }
    }

    /// Current phase; an exit through the controller shows up as `Closing`
    pub fn phase(&self) -> ModalPhase {
        match self.phase {
            ModalPhase::Opening | ModalPhase::Open if !self.controller.is_open() => {
                ModalPhase::Closing
            }
            phase => phase,
        }
    }

    pub fn focus(&self) -> DialogFocus {
        self.focus.current().unwrap_or(DialogFocus::Title)
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// The draft as currently typed
    pub fn input(&self) -> FormInput {
        FormInput {
            name: self.name.value().to_string(),
            email: self.email.value().to_string(),
            experience_years: self.experience.value().to_string(),
            github_url: self.github_url.value().to_string(),
        }
    }

    fn scope(&self) -> ModalScope<'_> {
        ModalScope {
            controller: &self.controller,
            title: &self.title,
            focus: self.focus(),
            name: &self.name,
            email: &self.email,
            experience: &self.experience,
            github_url: &self.github_url,
            errors: &self.errors,
        }
    }

    fn layout(&self) -> DialogLayout {
        DialogLayout::compute(self.area, &self.description, &self.errors, self.max_width)
    }

    fn text_input_mut(&mut self, field: FieldId) -> Option<&mut TextInput> {
        match field {
            FieldId::Name => Some(&mut self.name),
            FieldId::Email => Some(&mut self.email),
            FieldId::GithubUrl => Some(&mut self.github_url),
            FieldId::ExperienceYears => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let focus = self.focus();
        match key.code {
            KeyCode::Esc => self.cancel(),
            KeyCode::BackTab => {
                self.focus.focus_prev();
            }
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.focus.focus_prev();
            }
            KeyCode::Tab => {
                self.focus.focus_next();
            }
            KeyCode::Enter => match focus {
                DialogFocus::Cancel => self.cancel(),
                DialogFocus::Field(_) | DialogFocus::Submit => self.submit(),
                DialogFocus::Title => {}
            },
            KeyCode::Char(' ') if focus == DialogFocus::Cancel => self.cancel(),
            KeyCode::Char(' ') if focus == DialogFocus::Submit => self.submit(),
            _ => {
                if let DialogFocus::Field(field) = focus {
                    self.edit(field, key);
                }
            }
        }
    }

    fn edit(&mut self, field: FieldId, key: KeyEvent) {
        let result = match self.text_input_mut(field) {
            Some(input) => input.handle_key(key),
            None => self.experience.handle_key(key),
        };
        if result == EditResult::Changed && self.submitted {
            self.revalidate(field);
        }
    }

    fn revalidate(&mut self, field: FieldId) {
        match self.validator.validate_field(field, &self.input()) {
            Ok(()) => {
                self.errors.remove(field);
            }
            Err(error) => self.errors.insert(field, error),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let layout = self.layout();
        if !layout.contains(mouse.column, mouse.row) {
            tracing::debug!(column = mouse.column, row = mouse.row, "overlay pressed");
            self.cancel();
            return;
        }
        match layout.hit(mouse.column, mouse.row) {
            Some(DialogFocus::Cancel) => {
                self.focus.set(DialogFocus::Cancel);
                self.cancel();
            }
            Some(DialogFocus::Submit) => {
                self.focus.set(DialogFocus::Submit);
                self.submit();
            }
            Some(DialogFocus::Title) => self.focus.detach(),
            Some(target) => {
                self.focus.set(target);
            }
            None => {}
        }
    }

    fn submit(&mut self) {
        self.submitted = true;
        match self.validator.validate(&self.input()) {
            Ok(values) => {
                tracing::info!(name = %values.name, "form submitted");
                self.finish(Some(values));
            }
            Err(errors) => {
                tracing::debug!(invalid = errors.len(), "form rejected");
                for (_, error) in errors.iter() {
                    self.live_region.announce_assertive(error.message);
                }
                if let Some(first) = errors.first_field() {
                    self.focus.set(DialogFocus::Field(first));
                }
                self.errors = errors;
            }
        }
    }

    fn cancel(&mut self) {
        tracing::debug!("form cancelled");
        self.finish(None);
    }

    /// Leave through the controller
    ///
    /// The hooks installed in `mounted` release the scroll lock and queue
    /// focus restoration before the result reaches the caller.
    fn finish(&mut self, values: Option<FormValues>) {
        if self.phase() != ModalPhase::Open {
            return;
        }
        self.phase = ModalPhase::Closing;
        match values {
            Some(values) => self.controller.resolve(values),
            None => self.controller.close(),
        };
    }

    fn field_node(&self, field: FieldId) -> AccessNode {
        let error = self.errors.get(field);
        let focused = self.focus() == DialogFocus::Field(field);
        let node = match field {
            FieldId::ExperienceYears => AccessNode::new(field.key(), Role::ComboBox, field.label())
                .with_value(self.experience.value())
                .children(self.experience.options().iter().enumerate().map(|(idx, option)| {
                    AccessNode::new(format!("{}-{}", field.key(), idx), Role::Option, option.as_str())
                        .selected(self.experience.selected_index() == Some(idx))
                })),
            _ => {
                let value = self.text_input(field).map(TextInput::value).unwrap_or_default();
                AccessNode::new(field.key(), Role::TextBox, field.label()).with_value(value)
            }
        };
        node.focused(focused)
            .invalid(error.is_some())
            .described_by(error.map(|_| field.error_id()))
    }

    fn text_input(&self, field: FieldId) -> Option<&TextInput> {
        match field {
            FieldId::Name => Some(&self.name),
            FieldId::Email => Some(&self.email),
            FieldId::GithubUrl => Some(&self.github_url),
            FieldId::ExperienceYears => None,
        }
    }
}

impl Component for FormModal {
    fn mounted(&mut self, ctx: MountContext) {
        self.live_region = ctx.live_region;

        *self.scroll_lock.borrow_mut() = Some(ctx.body.lock());
        let scroll_lock = self.scroll_lock.clone();
        let scheduler = ctx.scheduler;
        let trigger = self.controller.trigger().element();
        self.controller.on_settled(move || {
            scroll_lock.borrow_mut().take();
            if let Some(element) = trigger {
                scheduler.defer(move |host| {
                    host.restore_focus(element);
                });
            }
        });

        self.focus.detach();
        if self.controller.is_open() {
            self.phase = ModalPhase::Open;
        }
        tracing::debug!(handle = ctx.handle.id(), title = %self.title, "form modal open");
    }

    fn handle_event(&mut self, event: &Event, area: Rect) -> EventOutcome {
        self.area = area;
        if self.phase() != ModalPhase::Open {
            return EventOutcome::Consumed;
        }
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            _ => {}
        }
        EventOutcome::Consumed
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.area = area;
        let layout = self.layout();
        render::render_dialog(frame, area, &layout, &self.scope());
    }

    fn unmounted(&mut self) {
        if self.controller.close() {
            tracing::debug!("form modal unmounted while open");
        }
        self.scroll_lock.borrow_mut().take();
        self.phase = ModalPhase::Closed;
    }

    fn is_active(&self) -> bool {
        matches!(self.phase(), ModalPhase::Opening | ModalPhase::Open)
    }

    fn cursor_position(&self) -> Option<Position> {
        if !self.is_active() {
            return None;
        }
        render::cursor_position(&self.layout(), &self.scope())
    }

    fn accessibility(&self) -> Option<AccessNode> {
        let focus = self.focus();
        let mut form = AccessNode::new("application-form", Role::Form, self.title.as_str());
        for field in FieldId::ALL {
            form = form.child(self.field_node(field));
            if let Some(error) = self.errors.get(field) {
                form = form.child(AccessNode::new(field.error_id(), Role::Alert, error.message));
            }
        }
        form = form
            .child(
                AccessNode::new("cancel", Role::Button, CANCEL_LABEL)
                    .focused(focus == DialogFocus::Cancel),
            )
            .child(
                AccessNode::new("submit", Role::Button, SUBMIT_LABEL)
                    .focused(focus == DialogFocus::Submit),
            );

        let dialog = AccessNode::new(DIALOG_ID, Role::Dialog, self.title.as_str())
            .modal(true)
            .labelled_by(TITLE_ID)
            .described_by(Some(DESCRIPTION_ID))
            .child(
                AccessNode::new(TITLE_ID, Role::Heading { level: 2 }, self.title.as_str())
                    .focused(focus == DialogFocus::Title),
            )
            .child(AccessNode::new(DESCRIPTION_ID, Role::Paragraph, self.description.as_str()))
            .child(form);
        Some(dialog)
    }
}
