use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
};
use ratatui::DefaultTerminal;

use form_modal::config::Config;
use form_modal::screen::{ElementId, Page, PageAction};
use form_modal::services::tracing_setup;
use form_modal::{FormValues, ModalOpener, OpenOptions, PendingResult, Screen};

/// Terminal demo of the application form dialog
#[derive(Parser, Debug)]
#[command(name = "form-modal", version, about)]
struct Args {
    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write diagnostics here instead of the default log dir
    #[arg(long)]
    log_file: Option<PathBuf>,
}

struct State {
    screen: Screen,
    opener: ModalOpener,
    open_button: ElementId,
    quit_button: ElementId,
    pending: Option<PendingResult<FormValues>>,
    submissions: usize,
}

impl State {
    fn new(opener: ModalOpener, width: u16, height: u16) -> Self {
        let mut page = Page::new("Frontend team applications");
        let open_button = page.add_button("Open form");
        let quit_button = page.add_button("Quit");
        page.set_status("Tab to a button, Enter to activate. Ctrl+Q quits.");

        let mut screen = Screen::with_page(page, width, height);
        screen.focus_element(open_button);
        Self {
            screen,
            opener,
            open_button,
            quit_button,
            pending: None,
            submissions: 0,
        }
    }

    fn run(&mut self, mut terminal: DefaultTerminal) -> anyhow::Result<()> {
        loop {
            self.poll_result()?;
            terminal.draw(|frame| self.screen.render(frame))?;

            let event = event::read()?;
            if is_quit(&event) {
                break Ok(());
            }

            if let Some(PageAction::Activated(id)) = self.screen.dispatch(&event) {
                tracing::debug!(button = ?self.screen.page().label(id), "activated");
                if id == self.open_button {
                    self.open_form();
                } else if id == self.quit_button {
                    break Ok(());
                }
            }
            self.screen.tick();
        }
    }

    fn open_form(&mut self) {
        let pending = self.opener.open(&mut self.screen, OpenOptions::new());
        self.pending = Some(pending);
    }

    /// Pick up a settled dialog result, if any
    fn poll_result(&mut self) -> anyhow::Result<()> {
        let Some(outcome) = self.pending.as_mut().and_then(|p| p.try_take()) else {
            return Ok(());
        };
        self.pending = None;

        match outcome {
            Some(values) => {
                self.submissions += 1;
                tracing::info!(submissions = self.submissions, "application received");
                let json = serde_json::to_string_pretty(&values).context("serializing submission")?;
                let page = self.screen.page_mut();
                page.set_status(format!("Thanks, {}! We will write to {}.", values.name, values.email));
                page.set_body(json.lines().map(str::to_string).collect());
            }
            None => self.screen.page_mut().set_status("Form cancelled."),
        }
        Ok(())
    }
}

fn is_quit(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        })
    )
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logs = tracing_setup::init(args.log_file.clone()).context("initializing logging")?;

    let config = match args.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load_or_default(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    let opener = ModalOpener::new(&config.modal).context("invalid email pattern in config")?;

    let terminal = ratatui::init();

    let result = crossterm::execute!(std::io::stdout(), EnableMouseCapture)
        .context("enabling mouse capture")
        .and_then(|()| terminal.size().context("reading terminal size"))
        .and_then(|size| {
            let mut state = State::new(opener, size.width, size.height);
            state.run(terminal)
        });

    let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    tracing::info!(announcements = %logs.announcements.path.display(), "exiting");
    result
}
