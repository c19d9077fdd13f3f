//! Terminal runner (default binary).
//!
//! The engine runs on its own tokio runtime; this thread only reads keys,
//! forwards them as intents and redraws whenever a new snapshot is published.
//!
//! Logging goes to `TETRA_LOG_PATH` when set (the terminal belongs to the game),
//! filtered by `TETRA_LOG_LEVEL` (default `info`).

use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{info, Level};

use tetra_turns::engine::{EngineConfig, EngineRuntime};
use tetra_turns::input::{key_intent, KeyIntent};
use tetra_turns::term::{FrameBuffer, GameView, TerminalRenderer, TerminalSession, Viewport};

/// Upper bound on how long a new snapshot waits to be drawn.
const FRAME_POLL: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    init_logging()?;

    let config = EngineConfig::from_env();
    info!(seed = config.seed, "starting");
    let engine = EngineRuntime::start(config)?;

    let session = TerminalSession::enter()?;
    let result = run(&engine);
    let restored = session.restore();

    let stopped = engine.shutdown().map(|final_state| {
        info!(
            score = final_state.score(),
            level = final_state.level(),
            turns = final_state.grid_rotations(),
            "finished"
        );
    });
    result.and(restored).and(stopped)
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("TETRA_LOG_PATH") else {
        return Ok(());
    };
    let level = std::env::var("TETRA_LOG_LEVEL")
        .ok()
        .and_then(|s| s.trim().parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    let file = File::create(&path).with_context(|| format!("cannot open log file {path}"))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(engine: &EngineRuntime) -> Result<()> {
    let view = GameView::new();
    let mut renderer = TerminalRenderer::new();
    let mut frame = FrameBuffer::new(0, 0);
    let mut snapshots = engine.subscribe();
    let mut dirty = true;

    loop {
        if dirty || snapshots.has_changed().unwrap_or(false) {
            let snap = *snapshots.borrow_and_update();
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snap, Viewport::new(w, h), &mut frame);
            renderer.present(&frame)?;
            dirty = false;
        }

        if !event::poll(FRAME_POLL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => match key_intent(key) {
                KeyIntent::Quit => return Ok(()),
                KeyIntent::Action(action) => engine.send(action)?,
                KeyIntent::Ignore => {}
            },
            Event::Resize(..) => {
                renderer.invalidate();
                dirty = true;
            }
            _ => {}
        }
    }
}
