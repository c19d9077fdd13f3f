//! Engine task - the single owner of the game state
//!
//! Player intents arrive over a bounded channel; the gravity and grid-rotation
//! drivers live in the same task. Each event computes the next state from the
//! committed one and commits it, so there is exactly one writer. Committed
//! states are published as snapshots over a `watch` channel.

use anyhow::{anyhow, Context, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::clock::{GameClock, Tick};
use crate::config::EngineConfig;
use crate::core::{GameSnapshot, GameState, RandomSource};
use crate::snapshot_log::SnapshotLog;
use crate::types::GameAction;

/// Message delivered to the engine task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    Action(GameAction),
    Shutdown,
}

struct GameEngine<R> {
    state: GameState,
    rng: R,
    clock: GameClock,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    state_tx: watch::Sender<GameSnapshot>,
    log: Option<SnapshotLog>,
}

impl<R: RandomSource> GameEngine<R> {
    async fn run(mut self) -> GameState {
        self.clock.sync(&self.state);
        info!(
            gravity_ms = self.state.gravity_interval().as_millis() as u64,
            "engine started"
        );

        loop {
            tokio::select! {
                cmd = self.cmd_rx.recv() => match cmd {
                    Some(EngineCommand::Action(action)) => self.handle_action(action),
                    Some(EngineCommand::Shutdown) | None => break,
                },
                tick = self.clock.tick() => {
                    let next = match tick {
                        Tick::Gravity => self.state.gravity_tick(&mut self.rng),
                        Tick::Rotation => self.state.rotation_tick(),
                    };
                    self.commit(next);
                }
            }
        }

        self.clock.release();
        if let Some(log) = self.log.take() {
            log.close().await;
        }
        info!(score = self.state.score(), "engine stopped");
        self.state
    }

    fn handle_action(&mut self, action: GameAction) {
        debug!(action = action.as_str(), "input");
        if action == GameAction::Reset {
            // Fresh drivers for the fresh game.
            self.clock.release();
            info!(score = self.state.score(), "reset");
        }
        let next = self.state.apply_action(action);
        self.commit(next);
    }

    fn commit(&mut self, next: GameState) {
        if next != self.state {
            log_transition(&self.state, &next);
            self.state = next;
            let snapshot = self.state.snapshot();
            if let Some(log) = &self.log {
                log.record(snapshot);
            }
            self.state_tx.send_replace(snapshot);
        }
        self.clock.sync(&self.state);
    }
}

fn log_transition(prev: &GameState, next: &GameState) {
    if prev.current_piece().is_none() && next.current_piece().is_some() {
        debug!("piece spawned");
    }
    if let Some(lock) = next.last_lock().filter(|_| prev.last_lock() != next.last_lock()) {
        info!(
            lines = lock.lines_cleared,
            points = lock.points,
            score = next.score(),
            "piece locked"
        );
    }
    if next.level() != prev.level() {
        info!(
            level = next.level(),
            gravity_ms = next.gravity_interval().as_millis() as u64,
            "level changed"
        );
    }
    if next.grid_rotations() != prev.grid_rotations() {
        info!(
            turns = next.grid_rotations(),
            carried_piece = next.current_piece().is_some(),
            "grid rotated"
        );
    }
    if next.paused() != prev.paused() {
        info!(paused = next.paused(), "pause toggled");
    }
    if next.game_over() && !prev.game_over() {
        info!(score = next.score(), level = next.level(), "game over");
    }
}

/// Handle to a running engine task
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    state_rx: watch::Receiver<GameSnapshot>,
    task: JoinHandle<GameState>,
}

impl EngineHandle {
    /// Queue an intent, waiting for room in the channel
    pub async fn send(&self, action: GameAction) -> Result<()> {
        self.cmd_tx
            .send(EngineCommand::Action(action))
            .await
            .map_err(|_| anyhow!("engine stopped"))
    }

    /// Queue an intent without waiting; fails when the channel is full or closed
    pub fn try_send(&self, action: GameAction) -> Result<()> {
        self.cmd_tx
            .try_send(EngineCommand::Action(action))
            .context("engine did not accept input")
    }

    /// Queue an intent from synchronous code.
    ///
    /// Panics when called from within an async context (tokio restriction).
    pub fn blocking_send(&self, action: GameAction) -> Result<()> {
        self.cmd_tx
            .blocking_send(EngineCommand::Action(action))
            .map_err(|_| anyhow!("engine stopped"))
    }

    /// Receiver notified after every commit
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.state_rx.clone()
    }

    /// Most recently committed snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        *self.state_rx.borrow()
    }

    /// Stop the task and return the final state.
    ///
    /// Commands queued before the call are applied first.
    pub async fn shutdown(self) -> Result<GameState> {
        // A closed channel means the task is already on its way out.
        let _ = self.cmd_tx.send(EngineCommand::Shutdown).await;
        self.task.await.context("engine task failed")
    }
}

/// Start an engine on a fresh game. Must be called within a tokio runtime.
pub fn spawn_engine<R>(config: &EngineConfig, rng: R) -> EngineHandle
where
    R: RandomSource + Send + 'static,
{
    spawn_engine_from(GameState::new(), config, rng)
}

/// Start an engine on a prepared state. Must be called within a tokio runtime.
pub fn spawn_engine_from<R>(state: GameState, config: &EngineConfig, rng: R) -> EngineHandle
where
    R: RandomSource + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel(config.max_pending_commands.max(1));
    let (state_tx, state_rx) = watch::channel(state.snapshot());
    let log = config.snapshot_log_path.clone().map(SnapshotLog::spawn);

    let engine = GameEngine {
        state,
        rng,
        clock: GameClock::new(),
        cmd_rx,
        state_tx,
        log,
    };
    let task = tokio::spawn(engine.run());

    EngineHandle {
        cmd_tx,
        state_rx,
        task,
    }
}
