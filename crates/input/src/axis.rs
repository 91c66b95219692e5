//! Three-bucket discretization of raw analog axis samples.

use crate::types::{Direction, GameConfig, DEFAULT_AXIS_HIGH, DEFAULT_AXIS_LOW};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMapper {
    low: i32,
    high: i32,
}

impl Default for AxisMapper {
    fn default() -> Self {
        Self::new(DEFAULT_AXIS_LOW, DEFAULT_AXIS_HIGH)
    }
}

impl AxisMapper {
    pub fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.axis_low_threshold, config.axis_high_threshold)
    }

    /// Below `low` is up, above `high` is down, anything in between
    /// (inclusive) is neutral.
    pub fn classify(&self, raw: i32) -> Direction {
        if raw < self.low {
            Direction::Up
        } else if raw > self.high {
            Direction::Down
        } else {
            Direction::Neutral
        }
    }
}
