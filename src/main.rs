use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event};
use grid_snake::config::{SessionConfig, default_config_path, load_session_config};
use grid_snake::game::{GameStatus, GridEngine};
use grid_snake::input::{GameInput, Heading, map_key_event};
use grid_snake::renderer::Renderer;
use grid_snake::terminal_runtime::{AppTerminal, TerminalSession, install_panic_hook};
use grid_snake::ui::menu::{render_outcome_menu, render_pause_menu};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

const DEFAULT_LOG_FILTER: &str = "grid_snake=info";

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Board height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Food to eat before the game is won.
    #[arg(long)]
    food: Option<u32>,

    /// Score to start from.
    #[arg(long)]
    score: Option<u32>,

    /// Seed for food placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds per turn.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// JSON session config; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (filtered by `RUST_LOG`).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

/// One engine plus its renderer and the host-side turn state.
struct Session {
    engine: GridEngine,
    renderer: Renderer,
    pending: Heading,
    paused: bool,
}

impl Session {
    fn start(config: &SessionConfig) -> io::Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let engine = GridEngine::new_with_seed(
            config.grid_size(),
            config.food_target,
            config.initial_score,
            seed,
        )
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

        let pending = engine.heading();
        let mut renderer = Renderer::new();
        renderer.render(&engine, true);
        renderer.render(&engine, false);
        info!(seed, "session started");

        Ok(Self {
            engine,
            renderer,
            pending,
            paused: false,
        })
    }

    fn is_over(&self) -> bool {
        self.engine.status() != GameStatus::Playing
    }

    fn turn(&mut self) {
        if self.paused || self.is_over() {
            return;
        }

        // BoardFull leaves the engine in a terminal status the popup shows.
        if let Err(error) = self.engine.advance(self.pending) {
            warn!(%error, "turn ended without free cells");
        }
        self.renderer.render(&self.engine, false);
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = resolve_config(&cli)?;
    // Validate before touching the terminal so errors print normally.
    let session = Session::start(&config)?;

    install_panic_hook();
    let mut terminal = TerminalSession::enter()?;
    run(terminal.terminal_mut(), &config, session)
}

fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn resolve_config(cli: &Cli) -> io::Result<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) if !path.exists() => {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("config file {} does not exist", path.display()),
            ));
        }
        Some(path) => load_session_config(path)?,
        None => load_session_config(&default_config_path())?,
    };

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(food) = cli.food {
        config.food_target = food;
    }
    if let Some(score) = cli.score {
        config.initial_score = score;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    Ok(config)
}

fn run(terminal: &mut AppTerminal, config: &SessionConfig, mut session: Session) -> io::Result<()> {
    let tick_interval = Duration::from_millis(config.tick_interval_ms());
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| draw(frame, &session))?;

        let timeout = tick_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match map_key_event(key) {
                    Some(GameInput::Quit) => break,
                    Some(GameInput::Pause) if !session.is_over() => {
                        session.paused = !session.paused;
                    }
                    Some(GameInput::Confirm) if session.is_over() => {
                        session = Session::start(config)?;
                        last_tick = Instant::now();
                    }
                    Some(GameInput::Heading(heading)) => session.pending = heading,
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_interval {
            session.turn();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, session: &Session) {
    let area = frame.area();
    let board = session.renderer.as_string();
    let board_width = board.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
    let board_height = board.lines().count();

    let [board_row, status_row] = Layout::vertical([
        Constraint::Length(u16::try_from(board_height).unwrap_or(u16::MAX)),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .areas(area);
    let [board_area] = Layout::horizontal([Constraint::Length(
        u16::try_from(board_width).unwrap_or(u16::MAX),
    )])
    .flex(Flex::Center)
    .areas(board_row);

    frame.render_widget(Paragraph::new(board), board_area);

    let engine = &session.engine;
    let status = Line::from(format!(
        "Score: {}   Food left: {}   [P] pause  [Q] quit",
        engine.score(),
        engine.remaining_food()
    ))
    .centered();
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        status_row,
    );

    if session.paused {
        render_pause_menu(frame, area);
    } else {
        render_outcome_menu(
            frame,
            area,
            engine.status(),
            engine.score(),
            engine.loss_reason(),
        );
    }
}
