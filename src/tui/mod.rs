//! Terminal UI for Strictly Wordle

mod app;
mod keyboard;
mod ui;

pub use app::{App, ServiceEvent};
pub use keyboard::{KEY_ROWS, KeyHit, hit_test, keyboard_rows, layout_keys};
pub use ui::{draw, status_style};

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use crate::client::{HttpScoringClient, ScoringService};
use crate::config::WordleConfig;
use crate::controller::GameController;

/// Sends logs to a file so they do not interfere with the TUI.
pub fn init_file_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Runs the TUI client until the user quits.
#[instrument(skip_all, fields(server_url = %config.server_url()))]
pub async fn run_tui(config: WordleConfig) -> Result<()> {
    info!("Starting Strictly Wordle TUI");

    let client = HttpScoringClient::new(config.server_url().clone(), config.request_timeout())?;
    let service: Arc<dyn ScoringService> = Arc::new(client);
    let controller = GameController::new(config.notice_lifetime(), config.request_timeout());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut app = App::new(
        controller,
        service,
        event_tx,
        *config.mode(),
        *config.suggestion_limit(),
    );
    app.start_game(*config.mode());

    let res = run_app(&mut terminal, &mut app, &mut event_rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    res
}

/// Event loop: draw, apply finished requests, read input.
async fn run_app<B>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<ServiceEvent>,
) -> Result<()>
where
    B: ratatui::backend::Backend,
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    loop {
        app.controller_mut().expire_notices(Instant::now());

        let mut hits = Vec::new();
        terminal.draw(|f| hits = ui::draw(f, app))?;
        app.set_keyboard(hits);

        while let Ok(event) = event_rx.try_recv() {
            app.handle_service_event(event);
        }

        if app.should_quit() {
            info!("Leaving TUI");
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        // Let spawned requests make progress on this worker too.
        tokio::task::yield_now().await;
    }
}
