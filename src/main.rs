//! Tasklist - Terminal Task List
//!
//! Add short items, mark them complete, delete them. The list is saved as a
//! JSON snapshot after every change and restored on the next start.

use std::io;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};

use tasklist::application::{App, ControllerOptions, TaskListController};
use tasklist::domain::{DateFormatter, SystemClock};
use tasklist::infrastructure::{init_logging, Cli, FileStore, Settings};
use tasklist::presentation::{
    render_ui, CrosstermEvents, EventSource, InputHandler, ScreenLayout, TerminalDialogs,
};

/// Entry point for the terminal task list.
///
/// Resolves settings before touching the terminal so configuration errors
/// print normally, then runs the event loop until the user quits.
///
/// # Errors
///
/// Returns an error for invalid settings or if terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli)?;
    init_logging(&settings);

    let dates = DateFormatter::new(&settings.date_format)
        .ok_or_else(|| format!("invalid date format `{}`", settings.date_format))?;
    let store = FileStore::new(&settings.data_dir);
    tracing::info!(
        dir = %store.dir().display(),
        key = %settings.storage_key,
        "opening snapshot store"
    );
    let controller = TaskListController::initialize(
        Box::new(store),
        Box::new(SystemClock),
        ControllerOptions {
            storage_key: settings.storage_key.clone(),
            dates,
        },
    );
    let mut app = App::new(controller);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal loop failed");
        println!("{err:?}");
    }

    Ok(())
}

/// Main event loop.
///
/// Each pass draws the screen, then hands one event to the input handler.
/// The drawn frame doubles as the backdrop for any dialog the event opens.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut events = CrosstermEvents;
    loop {
        let size = terminal.size()?;
        let layout = ScreenLayout::new(Rect::new(0, 0, size.width, size.height));
        app.update_viewport_rows(layout.list_capacity());

        let completed = terminal.draw(|f| render_ui(f, app))?;
        let area = completed.area;
        let backdrop = completed.buffer.clone();

        if app.should_quit {
            return Ok(());
        }

        let event = events.next_event()?;
        let mut dialogs = TerminalDialogs::new(terminal, &mut events, backdrop);
        InputHandler::handle_event(app, event, area, &mut dialogs);
    }
}
