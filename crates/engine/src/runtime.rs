//! Engine runtime integration.
//!
//! Bridges a synchronous frontend loop with the async engine task.

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::watch;

use crate::config::EngineConfig;
use crate::core::{GameSnapshot, GameState, SimpleRng};
use crate::engine::{spawn_engine, EngineHandle};
use crate::types::GameAction;

/// Running engine with its own tokio runtime.
///
/// Dropping it tears the runtime down, which cancels both drivers.
pub struct EngineRuntime {
    rt: Runtime,
    handle: EngineHandle,
}

impl EngineRuntime {
    /// Start an engine seeded from `config.seed`.
    pub fn start(config: EngineConfig) -> Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let handle = {
            let _guard = rt.enter();
            spawn_engine(&config, SimpleRng::new(config.seed))
        };
        Ok(Self { rt, handle })
    }

    /// Forward an intent. Must not be called from async code.
    pub fn send(&self, action: GameAction) -> Result<()> {
        self.handle.blocking_send(action)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.handle.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.handle.subscribe()
    }

    /// Stop the engine and return the final state.
    pub fn shutdown(self) -> Result<GameState> {
        let Self { rt, handle } = self;
        rt.block_on(handle.shutdown())
    }
}
