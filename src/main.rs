mod api;
mod app;
mod config;
mod events;
mod logging;
mod models;
mod ui;
mod worker;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

use api::{GeminiClient, NameGenerator};
use app::App;
use events::AppEvent;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config()?;
    let log_dir = config::get_log_dir()?;
    if !logging::init_logging(&log_dir, &config.log_filter) {
        eprintln!(
            "Warning: a tracing subscriber was already installed; nothing will be logged to {}",
            log_dir.display()
        );
    }

    let client = GeminiClient::from_config(&config)?;
    if !client.has_api_key() {
        warn!(
            "{} is not set; generation requests will fail until it is",
            api::API_KEY_ENV
        );
    }
    info!(model = client.model(), "Starting petnames");
    let generator: Arc<dyn NameGenerator> = Arc::new(client);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.categories);

    // Generation results come back over this channel
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    let res = run_app(&mut terminal, &mut app, &generator, &tx, &mut rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

const fn handle_help_keys(app: &mut App, key: KeyCode, modifiers: event::KeyModifiers) -> bool {
    if !app.show_help {
        return false;
    }

    match key {
        KeyCode::Char('h') if modifiers.contains(event::KeyModifiers::CONTROL) => {
            app.toggle_help();
        }
        KeyCode::Esc => {
            app.show_help = false;
        }
        _ => {}
    }
    true
}

fn handle_keyboard_input(
    app: &mut App,
    key: KeyCode,
    modifiers: event::KeyModifiers,
    generator: &Arc<dyn NameGenerator>,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
) {
    match key {
        KeyCode::Char('c') if modifiers.contains(event::KeyModifiers::CONTROL) => {
            if app.exit_pending {
                app.quit();
            } else {
                app.exit_pending = true;
            }
            return;
        }
        KeyCode::Esc if app.exit_pending => {
            app.exit_pending = false;
            return;
        }
        _ if app.exit_pending => {
            // Any other key cancels pending exit
            app.exit_pending = false;
        }
        _ => {}
    }

    match key {
        KeyCode::Char('q') if modifiers.contains(event::KeyModifiers::CONTROL) => {
            app.quit();
        }
        KeyCode::Char('h') if modifiers.contains(event::KeyModifiers::CONTROL) => {
            app.toggle_help();
        }
        KeyCode::Left | KeyCode::Up => app.select_previous(),
        KeyCode::Right | KeyCode::Down => app.select_next(),
        KeyCode::Enter => {
            if let Some(category) = app.begin_generation() {
                worker::spawn_generation(Arc::clone(generator), category, event_tx.clone());
            }
        }
        _ => {}
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    generator: &Arc<dyn NameGenerator>,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
    event_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        while let Ok(app_event) = event_rx.try_recv() {
            app.handle_event(app_event);
        }

        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !handle_help_keys(app, key.code, key.modifiers)
                {
                    handle_keyboard_input(app, key.code, key.modifiers, generator, event_tx);
                }
            }
        }

        app.tick();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
