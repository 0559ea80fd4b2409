//! Noughts - terminal tic-tac-toe.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use noughts::{App, AiReply, AiWorker, Cli, Config, Flow, SaveStore, ui};
use noughts_core::{GameState, Mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(save) = cli.save.clone() {
        config = config.with_save_path(save);
    }

    init_logging(&config)?;
    info!("Starting noughts");

    let store = SaveStore::new(config.save_path().clone());
    let game = load_session(&cli, &config, &store);
    store.save_game(&game);

    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(err) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            return Err(err.context("Failed to set up terminal"));
        }
    };
    let res = run_app(&mut terminal, &config, &store, game).await;
    let restored = restore_terminal(&mut terminal);

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    if let Err(err) = &restored {
        error!(error = ?err, "Failed to restore terminal");
    }
    info!("Exiting");
    res.and(restored.context("Failed to restore terminal"))
}

/// Logs to a file; the terminal belongs to the UI.
fn init_logging(config: &Config) -> Result<()> {
    let log_file = std::fs::File::create(config.log_path())
        .with_context(|| format!("Failed to create log file {}", config.log_path().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Builds the starting session from the save file and CLI overrides.
#[instrument(skip_all)]
fn load_session(cli: &Cli, config: &Config, store: &SaveStore) -> GameState {
    let mut game = if cli.fresh {
        info!("Starting fresh session");
        GameState::new(*config.default_mode())
    } else {
        store.load_game(*config.default_mode())
    };

    if let Some(mode) = cli.mode.map(Mode::from)
        && mode != game.mode()
    {
        game.set_mode(mode);
    }
    if cli.reset_score {
        game.reset_score();
    }
    game
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// Undoes every terminal change even if an earlier step fails; reports the
/// first failure.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let cursor = terminal.show_cursor();
    raw?;
    screen?;
    cursor?;
    Ok(())
}

#[instrument(skip_all)]
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &Config,
    store: &SaveStore,
    game: GameState,
) -> Result<()> {
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<AiReply>();
    let worker = AiWorker::new(config.ai_delay(), reply_tx);
    let mut app = App::new(game, config.auto_reset());

    loop {
        while let Ok(reply) = reply_rx.try_recv() {
            app.handle_ai_reply(reply);
        }
        if let Some(request) = app.take_ai_request() {
            worker.spawn(request);
        }
        app.tick(Instant::now());
        if app.take_dirty() {
            store.save_game(app.game());
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key.code) == Flow::Quit
        {
            info!("User quit");
            store.save_game(app.game());
            return Ok(());
        }
    }
}
