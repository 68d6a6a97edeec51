//! Terminal UI for the tic-tac-toe client

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tictactoe_client::{ClientConfig, GameClient, StatusLine};
use tracing::{error, info, instrument};

use app::App;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the TUI client
pub fn run_tui(config: ClientConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tictactoe_client=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(server_url = %config.server_url(), "Starting tic-tac-toe TUI");

    let status = StatusLine::new();
    let client = GameClient::new(&config)?.with_status_sink(status.clone());
    let mut app = App::new(client, status);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    res
}

/// Draw, then wait briefly for a key; every request blocks the loop until
/// the server answers.
#[instrument(skip_all)]
fn run_app(terminal: &mut Term, app: &mut App<GameClient>) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                info!("User interrupted");
                app.quit();
                continue;
            }
            app.on_key(key.code);
        }
    }

    info!("User quit");
    Ok(())
}
