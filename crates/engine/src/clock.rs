//! Game clock - the gravity and grid-rotation drivers
//!
//! Both drivers are plain `tokio::time::Interval`s owned by the engine task, so
//! a tick is only ever observed by the single owner of the game state. An
//! interval first fires one full period after it is armed. Releasing an
//! interval drops it; nothing scheduled by it can fire afterwards.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::core::GameState;
use crate::types::ROTATION_INTERVAL_MS;

/// Which driver fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Gravity,
    Rotation,
}

/// Period of the grid-rotation driver
pub fn rotation_period() -> Duration {
    Duration::from_millis(ROTATION_INTERVAL_MS)
}

#[derive(Debug, Default)]
pub struct GameClock {
    gravity: Option<Interval>,
    rotation: Option<Interval>,
    /// Period the gravity interval was armed with.
    gravity_period: Duration,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the drivers in line with a freshly committed state.
    ///
    /// Paused: both released. Otherwise both armed, and gravity re-armed when
    /// the level changed its period. Game over keeps the drivers; the state
    /// itself ignores their ticks.
    pub fn sync(&mut self, state: &GameState) {
        if state.paused() {
            self.release();
            return;
        }

        let period = state.gravity_interval();
        if self.gravity.is_none() || period != self.gravity_period {
            self.gravity = Some(arm(period));
            self.gravity_period = period;
        }
        if self.rotation.is_none() {
            self.rotation = Some(arm(rotation_period()));
        }
    }

    /// Drop both drivers
    pub fn release(&mut self) {
        self.gravity = None;
        self.rotation = None;
    }

    pub fn is_armed(&self) -> bool {
        self.gravity.is_some() || self.rotation.is_some()
    }

    pub fn gravity_period(&self) -> Option<Duration> {
        self.gravity.as_ref().map(|_| self.gravity_period)
    }

    /// Wait for whichever driver fires next. Never resolves while released.
    ///
    /// Cancel safe: dropping the future loses no tick.
    pub async fn tick(&mut self) -> Tick {
        tokio::select! {
            _ = tick_opt(&mut self.gravity) => Tick::Gravity,
            _ = tick_opt(&mut self.rotation) => Tick::Rotation,
        }
    }
}

fn arm(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn tick_opt(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
