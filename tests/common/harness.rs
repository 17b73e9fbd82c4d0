use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use form_modal::config::ModalConfig;
use form_modal::screen::{ElementId, Focus, Page, PageAction};
use form_modal::view::AccessNode;
use form_modal::{FormValues, HostAdapter, ModalOpener, OpenLock, OpenOptions, PendingResult, Screen};
use ratatui::{backend::TestBackend, Terminal};
use std::io;

/// Drives a `Screen` the way the demo's event loop does, rendering into a
/// `TestBackend`
///
/// The page has an "Apply now" button that opens the form and an "Other"
/// button. Each harness gets its own open lock so tests can run in
/// parallel.
pub struct ModalTestHarness {
    screen: Screen,
    terminal: Terminal<TestBackend>,
    opener: ModalOpener,
    options: OpenOptions,
    apply_button: ElementId,
    other_button: ElementId,
    pending: Option<PendingResult<FormValues>>,
}

impl ModalTestHarness {
    pub fn new(width: u16, height: u16) -> io::Result<Self> {
        Self::with_config(width, height, &ModalConfig::default())
    }

    pub fn with_config(width: u16, height: u16, config: &ModalConfig) -> io::Result<Self> {
        let opener = ModalOpener::new(config)
            .map_err(io::Error::other)?
            .with_lock(OpenLock::new());

        let mut page = Page::new("Careers");
        let apply_button = page.add_button("Apply now");
        let other_button = page.add_button("Other");
        page.set_body((1..=60).map(|i| format!("Opening #{}", i)).collect());

        let mut screen = Screen::with_page(page, width, height);
        screen.focus_element(apply_button);

        let terminal = Terminal::new(TestBackend::new(width, height))?;

        Ok(Self {
            screen,
            terminal,
            opener,
            options: OpenOptions::new(),
            apply_button,
            other_button,
            pending: None,
        })
    }

    /// Options used when "Apply now" is activated
    pub fn set_open_options(&mut self, options: OpenOptions) {
        self.options = options;
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn opener(&self) -> &ModalOpener {
        &self.opener
    }

    pub fn apply_button(&self) -> ElementId {
        self.apply_button
    }

    pub fn other_button(&self) -> ElementId {
        self.other_button
    }

    /// Focus "Apply now" and press Enter on it
    pub fn open_form(&mut self) -> io::Result<()> {
        self.screen.focus_element(self.apply_button);
        self.send_key(KeyCode::Enter, KeyModifiers::NONE)
    }

    /// Call the opener directly, bypassing the page
    pub fn open_direct(&mut self, options: OpenOptions) -> PendingResult<FormValues> {
        self.opener.open(&mut self.screen, options)
    }

    /// The result of the dialog opened through the page
    ///
    /// `None` while pending; `Some(None)` when cancelled.
    pub fn take_result(&mut self) -> Option<Option<FormValues>> {
        let outcome = self.pending.as_mut()?.try_take();
        if outcome.is_some() {
            self.pending = None;
        }
        outcome
    }

    pub fn is_result_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| p.is_pending())
    }

    /// Dispatch one event, act on page activations, then run one tick
    pub fn dispatch(&mut self, event: Event) -> io::Result<()> {
        if let Some(PageAction::Activated(id)) = self.screen.dispatch(&event) {
            if id == self.apply_button {
                let pending = self.opener.open(&mut self.screen, self.options.clone());
                self.pending = Some(pending);
            }
        }
        self.screen.tick();
        Ok(())
    }

    /// Route one key straight to the screen without running queued tasks
    pub fn send_key_untimed(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        self.screen.dispatch(&Event::Key(KeyEvent::new(code, modifiers)));
    }

    pub fn tick(&mut self) -> usize {
        self.screen.tick()
    }

    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> io::Result<()> {
        self.dispatch(Event::Key(KeyEvent::new(code, modifiers)))
    }

    pub fn type_text(&mut self, text: &str) -> io::Result<()> {
        for c in text.chars() {
            self.send_key(KeyCode::Char(c), KeyModifiers::NONE)?;
        }
        Ok(())
    }

    /// Press Tab `count` times
    pub fn tab(&mut self, count: usize) -> io::Result<()> {
        for _ in 0..count {
            self.send_key(KeyCode::Tab, KeyModifiers::NONE)?;
        }
        Ok(())
    }

    /// Left-button press at a screen cell
    pub fn click(&mut self, column: u16, row: u16) -> io::Result<()> {
        self.dispatch(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    /// Render, then click the first cell showing `text`
    pub fn click_text(&mut self, text: &str) -> io::Result<()> {
        self.render()?;
        let (column, row) = self
            .find_text(text)
            .ok_or_else(|| io::Error::other(format!("'{}' is not on screen", text)))?;
        self.click(column, row)
    }

    pub fn render(&mut self) -> io::Result<()> {
        let screen = &mut self.screen;
        self.terminal.draw(|frame| screen.render(frame))?;
        Ok(())
    }

    pub fn screen_to_string(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buffer.cell((x, y)) {
                    out.push_str(cell.symbol());
                }
            }
            out.push('\n');
        }
        out
    }

    /// Screen cell where `text` first appears
    pub fn find_text(&self, text: &str) -> Option<(u16, u16)> {
        self.screen_to_string()
            .lines()
            .enumerate()
            .find_map(|(row, line)| {
                line.find(text)
                    .map(|idx| (line[..idx].chars().count() as u16, row as u16))
            })
    }

    pub fn assert_screen_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(text),
            "Expected screen to contain '{}'\nScreen:\n{}",
            text,
            screen
        );
    }

    pub fn assert_screen_not_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(text),
            "Expected screen not to contain '{}'\nScreen:\n{}",
            text,
            screen
        );
    }

    /// Accessibility tree of the open dialog
    pub fn dialog(&self) -> Option<AccessNode> {
        self.screen.accessibility_tree().pop()
    }

    /// Id of the focused node inside the dialog
    pub fn focused_id(&self) -> Option<String> {
        self.dialog()?.focused_node().map(|node| node.id.clone())
    }

    /// The page element with focus, if focus is on the page
    pub fn focused_page_element(&self) -> Option<ElementId> {
        match self.screen.focus() {
            Focus::Page(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_dialog_open(&self) -> bool {
        self.screen.has_active_layer()
    }

    pub fn layer_count(&self) -> usize {
        self.screen.layer_count()
    }

    pub fn active_element(&self) -> Option<ElementId> {
        self.screen.active_element()
    }
}
