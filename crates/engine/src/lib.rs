//! Game clock and state owner.
//!
//! Runs the core rules in real time. One tokio task owns the [`GameState`]
//! and is the only place a new state is committed. Three producers feed it:
//!
//! - **Input**: player intents over a bounded `mpsc` channel
//! - **Gravity driver**: one step per period, `1000ms * 0.85^(level-1)`,
//!   re-armed whenever the level changes
//! - **Grid-rotation driver**: a quarter turn of the whole field every 15s
//!
//! Both drivers are released while paused and replaced on reset, so no timer
//! can touch a game it was not armed for. Every commit is published as a
//! [`GameSnapshot`] over a `watch` channel.
//!
//! # Environment Variables
//!
//! - `TETRA_SEED`: spawn seed (default: derived from the clock)
//! - `TETRA_MAX_PENDING`: command channel capacity (default: 32)
//! - `TETRA_SNAPSHOT_LOG`: append each published snapshot as JSONL to this path
//!
//! # Example
//!
//! ```no_run
//! use tetra_turns_engine::{spawn_engine, EngineConfig};
//! use tetra_turns_engine::core::SimpleRng;
//! use tetra_turns_engine::types::GameAction;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = EngineConfig::from_env();
//! let engine = spawn_engine(&config, SimpleRng::new(config.seed));
//! engine.send(GameAction::MoveLeft).await?;
//! let final_state = engine.shutdown().await?;
//! println!("score {}", final_state.score());
//! # Ok(())
//! # }
//! ```
//!
//! [`GameState`]: tetra_turns_core::GameState
//! [`GameSnapshot`]: tetra_turns_core::GameSnapshot

pub mod clock;
pub mod config;
pub mod engine;
pub mod runtime;
pub mod snapshot_log;

pub use tetra_turns_core as core;
pub use tetra_turns_types as types;

pub use clock::{GameClock, Tick};
pub use config::EngineConfig;
pub use engine::{spawn_engine, spawn_engine_from, EngineCommand, EngineHandle};
pub use runtime::EngineRuntime;
pub use snapshot_log::SnapshotLog;
