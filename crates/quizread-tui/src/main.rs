//! QuizRead TUI - a terminal client for the QuizRead reading companion.
//!
//! Sign in, upload books, track reading progress, answer the comprehension
//! quizzes the backend schedules, and run a focus timer - all without
//! leaving the terminal.

mod app;
mod ui;
mod utils;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quizread_core::{ApiClient, Config, SessionStore, Storage};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file name in the data directory
const LOG_FILE: &str = "quizread.log";

/// Initialize the tracing subscriber for logging.
///
/// The TUI owns the terminal, so logs go to a file in the data directory.
/// Use RUST_LOG to control the level (e.g. RUST_LOG=debug).
fn init_tracing(log_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--login" {
        return login_cli().await;
    }

    let config = Config::load().unwrap_or_default();
    let log_dir = config.data_dir().unwrap_or_else(|_| PathBuf::from("."));
    std::fs::create_dir_all(&log_dir)?;
    let _guard = init_tracing(&log_dir);
    info!("QuizRead TUI starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new()?;

    // Restored sessions land on the library; everyone else signs in first
    if app.is_authenticated() {
        app.refresh_library_background();
    } else {
        app.start_sign_in();
    }

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("QuizRead TUI shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }

                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        // Fold in completed background refreshes and the timer countdown
        app.check_background_tasks();
        app.tick_timer().await;

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}

/// Headless sign-in: establish a persisted session without starting the TUI
async fn login_cli() -> Result<()> {
    let mut config = Config::load().unwrap_or_default();
    let data_dir = config
        .data_dir()
        .unwrap_or_else(|_| PathBuf::from("./quizread-data"));
    let storage = Storage::open(data_dir)?;
    let api = ApiClient::new(&config.api_url())?;
    let mut session = SessionStore::new(api, storage);

    let email = prompt_email(config.last_email.as_deref())?;
    let password = rpassword::prompt_password("Password: ")?;

    println!("\nSigning in...");
    session.login(&email, &password).await?;

    config.last_email = Some(email);
    if let Err(e) = config.save() {
        eprintln!("Warning: could not save config: {}", e);
    }

    println!("Signed in as {}.", session.user_email());
    Ok(())
}

fn prompt_email(last: Option<&str>) -> Result<String> {
    match last {
        Some(last) => print!("Email [{}]: ", last),
        None => print!("Email: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    Ok(match (input.is_empty(), last) {
        (true, Some(last)) => last.to_string(),
        _ => input.to_string(),
    })
}
