//! trustdeed - Terminal Trust Fund Setup
//!
//! A terminal-based form for collecting trust-fund setup data (settlor,
//! trustee, beneficiaries, financial goals) and exporting it as a
//! formatted trust deed document.

use std::io;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

mod domain;
mod application;
mod infrastructure;
mod presentation;

use application::App;
use infrastructure::{AuthGate, FileSubmissionSink, NoopAuthGate, SubmissionSink};
use presentation::{render_ui, InputHandler};

/// Entry point for the trustdeed terminal form.
///
/// Runs the authentication gate, sets up the terminal interface,
/// initializes the application state, and runs the main event loop
/// until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues
/// with the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The gate accepts any credentials; a real deployment swaps this out.
    let gate = NoopAuthGate;
    if let Err(err) = gate.login("", "") {
        eprintln!("Login failed: {err}");
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::default();
    let sink = FileSubmissionSink::new("trust-application.json");
    let res = run_app(&mut terminal, &mut app, &sink);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Handles terminal rendering and keyboard input processing.
/// Continues running until the user presses 'q' in form mode.
///
/// # Arguments
///
/// * `terminal` - Terminal interface for rendering
/// * `app` - Mutable reference to application state
/// * `sink` - Submission backend for the final create action
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    sink: &dyn SubmissionSink,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, application::AppMode::Form) => {
                        return Ok(())
                    }
                    _ => InputHandler::handle_key_event(
                        app,
                        key.code,
                        key.modifiers,
                        Local::now().date_naive(),
                        sink,
                    ),
                }
            }
        }
    }
}
