//! Engine configuration
//!
//! Gameplay constants are fixed; only the seed, the command queue depth and
//! the optional snapshot log are configurable.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default capacity of the command channel
pub const DEFAULT_MAX_PENDING: usize = 32;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the spawn random source.
    pub seed: u32,
    /// Capacity of the command channel (at least 1).
    pub max_pending_commands: usize,
    /// Append every published snapshot as one JSON line to this file.
    pub snapshot_log_path: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            max_pending_commands: DEFAULT_MAX_PENDING,
            snapshot_log_path: None,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    ///
    /// - `TETRA_SEED`: u32 seed (default: derived from the clock)
    /// - `TETRA_MAX_PENDING`: command channel capacity (default: 32)
    /// - `TETRA_SNAPSHOT_LOG`: path of the JSONL snapshot log (default: off)
    pub fn from_env() -> Self {
        let seed = env::var("TETRA_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let max_pending_commands = env::var("TETRA_MAX_PENDING")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_PENDING);

        let snapshot_log_path = env::var("TETRA_SNAPSHOT_LOG")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            seed,
            max_pending_commands,
            snapshot_log_path,
        }
    }

    pub fn with_seed(self, seed: u32) -> Self {
        Self { seed, ..self }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
