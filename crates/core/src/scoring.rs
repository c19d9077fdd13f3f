//! Scoring module - line-clear points, levels and gravity speed
//!
//! Multi-line clears are rewarded super-linearly: each extra line multiplies
//! the per-line value by 1.5. The arithmetic is done on integers (3/2 per step,
//! rounded down) so scores stay exact.

use std::time::Duration;

use crate::types::{
    INITIAL_SPEED_MS, LEVEL_THRESHOLD, MIN_GRAVITY_MS, POINTS_MULTIPLIER_DENOMINATOR,
    POINTS_MULTIPLIER_NUMERATOR, POINTS_PER_LINE, SPEED_INCREASE,
};

/// Points for clearing `lines` rows in one lock.
///
/// `POINTS_PER_LINE * lines * 1.5^(lines-1)`, zero when nothing was cleared.
pub fn line_clear_points(lines: usize) -> u64 {
    if lines == 0 {
        return 0;
    }
    let exp = (lines - 1) as u32;
    let numerator = POINTS_PER_LINE
        .saturating_mul(lines as u64)
        .saturating_mul(POINTS_MULTIPLIER_NUMERATOR.saturating_pow(exp));
    numerator / POINTS_MULTIPLIER_DENOMINATOR.saturating_pow(exp)
}

/// Level for a cumulative score: `floor(score / 1000) + 1`
pub fn level_for_score(score: u64) -> u32 {
    u32::try_from(score / LEVEL_THRESHOLD)
        .unwrap_or(u32::MAX - 1)
        .saturating_add(1)
}

/// Gravity period for a level: `1000ms * 0.85^(level-1)`, never below 1ms
pub fn gravity_interval(level: u32) -> Duration {
    let exp = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    let ms = (INITIAL_SPEED_MS as f64 * SPEED_INCREASE.powi(exp)).max(MIN_GRAVITY_MS);
    Duration::from_nanos((ms * 1_000_000.0).round() as u64)
}
