//! Terminal memory game runner (default binary).
//!
//! Uses crossterm for input and a plain text view. The loop blocks on input
//! only until the session's next deadline, then polls the session so clock
//! ticks and mismatch rollbacks fire on time.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use tui_memory::cli::parse_args;
use tui_memory::core::{GameConfig, GameSnapshot, ScoreCard};
use tui_memory::engine::{GameSession, SessionEvent};
use tui_memory::input::{handle_key_event, should_quit, BoardCursor};
use tui_memory::report::Reporter;
use tui_memory::term::TextTerminal;
use tui_memory::types::{GameAction, BOARD_COLUMNS};
use tui_memory::view::GameView;

const ENV_LOG_PATH: &str = "MEMORY_LOG_PATH";

/// Input poll timeout when nothing is scheduled (idle or finished session).
const IDLE_POLL: Duration = Duration::from_millis(250);

const REPORT_FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;

    let mut config = GameConfig::from_env()?;
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    let mut session = GameSession::new(&config, rand::random::<u64>())?;

    let mut reporter = Reporter::start_from_env().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "reporter unavailable, submissions disabled");
        Reporter::disabled()
    });
    if let Some(user) = options.user {
        reporter.submit_lead(user);
    }

    let mut term = TextTerminal::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &mut reporter);

    // Always try to restore terminal state.
    let _ = term.exit();
    session.teardown();
    let summary = reporter.shutdown(REPORT_FLUSH_TIMEOUT);
    tracing::info!(
        delivered = summary.delivered,
        failed = summary.failed,
        "reporter stopped"
    );
    result
}

fn init_tracing() {
    let Some(path) = std::env::var(ENV_LOG_PATH)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        // No log file: stay silent rather than write over the board.
        return;
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();
        tracing::info!(path = %path, "Logging initialized");
    }
}

fn run(term: &mut TextTerminal, session: &mut GameSession, reporter: &mut Reporter) -> Result<()> {
    let view = GameView::default();
    let mut cursor = BoardCursor::new(session.rules().tile_count(), BOARD_COLUMNS);
    let mut snapshot = GameSnapshot::default();
    let mut last_card: Option<ScoreCard> = None;

    session.init_game(Instant::now());

    loop {
        session.poll(Instant::now());
        while let Some(event) = session.take_event() {
            match event {
                SessionEvent::Started { .. } => {
                    cursor.reset();
                    last_card = None;
                }
                SessionEvent::Ended(card) => {
                    reporter.submit_score(&card);
                    last_card = Some(card);
                }
            }
        }

        // Render.
        session.snapshot_into(&mut snapshot);
        term.draw(&view.render(&snapshot, cursor.index(), last_card.as_ref()))?;

        // Input with timeout until the next deadline.
        let timeout = session
            .next_wakeup()
            .map(|at| at.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL);

        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if should_quit(key) {
                    return Ok(());
                }
                match handle_key_event(key) {
                    Some(GameAction::Flip) => {
                        session.flip_tile(cursor.index(), Instant::now());
                    }
                    Some(GameAction::Restart) => {
                        session.init_game(Instant::now());
                    }
                    Some(action) => {
                        cursor.apply(action);
                    }
                    None => {}
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}
