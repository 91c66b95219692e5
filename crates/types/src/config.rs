//! Game tuning and startup configuration.

use std::time::Duration;

use thiserror::Error;

use crate::{
    DEFAULT_AXIS_CODE, DEFAULT_AXIS_HIGH, DEFAULT_AXIS_LOW, DEFAULT_BALL_SPEED_DIVISOR,
    DEFAULT_BRIGHTNESS, DEFAULT_DEFLECTION_PROBABILITY, DEFAULT_DISPLAY_HEIGHT,
    DEFAULT_DISPLAY_WIDTH, DEFAULT_FPS, DEFAULT_PADDLE_SIZE, DEFAULT_SPLASH_HOLD_MS,
};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("frames per second must be positive and finite, got {0}")]
    InvalidFps(f64),
    #[error("frames per second {0} gives a frame interval too long to represent")]
    FpsTooLow(f64),
    #[error("board must be at least 2x2, got {0}")]
    BoardTooSmall(usize),
    #[error("board size {board} does not fit a {width}x{height} display")]
    BoardLargerThanDisplay {
        board: usize,
        width: usize,
        height: usize,
    },
    #[error("paddle size must be between 1 and the board size {board}, got {paddle}")]
    InvalidPaddleSize { paddle: usize, board: usize },
    #[error("ball speed divisor must be at least 1")]
    ZeroSpeedDivisor,
    #[error("axis low threshold {low} is above high threshold {high}")]
    InvertedThresholds { low: i32, high: i32 },
    #[error("deflection probability must be within 0..=1, got {0}")]
    InvalidDeflection(f64),
    #[error("brightness must be within 0..=1, got {0}")]
    InvalidBrightness(f32),
}

/// Everything the game needs to know at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub frames_per_second: f64,
    /// Explicit board size; `None` derives it from the display shape.
    pub board_size: Option<usize>,
    pub paddle_size: usize,
    pub ball_speed_divisor: u32,
    pub axis_low_threshold: i32,
    pub axis_high_threshold: i32,
    pub deflection_probability: f64,
    pub axis_code: u16,
    pub splash_hold: Duration,
    pub brightness: f32,
    pub display_width: usize,
    pub display_height: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frames_per_second: DEFAULT_FPS,
            board_size: None,
            paddle_size: DEFAULT_PADDLE_SIZE,
            ball_speed_divisor: DEFAULT_BALL_SPEED_DIVISOR,
            axis_low_threshold: DEFAULT_AXIS_LOW,
            axis_high_threshold: DEFAULT_AXIS_HIGH,
            deflection_probability: DEFAULT_DEFLECTION_PROBABILITY,
            axis_code: DEFAULT_AXIS_CODE,
            splash_hold: Duration::from_millis(DEFAULT_SPLASH_HOLD_MS),
            brightness: DEFAULT_BRIGHTNESS,
            display_width: DEFAULT_DISPLAY_WIDTH,
            display_height: DEFAULT_DISPLAY_HEIGHT,
        }
    }
}

impl GameConfig {
    /// Create from environment variables.
    ///
    /// Unset or unparsable variables keep their default value.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an explicit variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            lookup(key).and_then(|s| s.trim().parse().ok())
        }

        let d = Self::default();
        Self {
            frames_per_second: parsed(&lookup, "PONG_FPS").unwrap_or(d.frames_per_second),
            board_size: parsed(&lookup, "PONG_BOARD_SIZE").or(d.board_size),
            paddle_size: parsed(&lookup, "PONG_PADDLE_SIZE").unwrap_or(d.paddle_size),
            ball_speed_divisor: parsed(&lookup, "PONG_SPEED_DIVISOR")
                .unwrap_or(d.ball_speed_divisor),
            axis_low_threshold: parsed(&lookup, "PONG_AXIS_LOW").unwrap_or(d.axis_low_threshold),
            axis_high_threshold: parsed(&lookup, "PONG_AXIS_HIGH")
                .unwrap_or(d.axis_high_threshold),
            deflection_probability: parsed(&lookup, "PONG_DEFLECTION")
                .unwrap_or(d.deflection_probability),
            axis_code: parsed(&lookup, "PONG_AXIS_CODE").unwrap_or(d.axis_code),
            splash_hold: parsed::<u64>(&lookup, "PONG_SPLASH_MS")
                .map(Duration::from_millis)
                .unwrap_or(d.splash_hold),
            brightness: parsed(&lookup, "PONG_BRIGHTNESS").unwrap_or(d.brightness),
            display_width: d.display_width,
            display_height: d.display_height,
        }
    }

    /// Duration of one tick.
    ///
    /// Saturates at `Duration::MAX` for rates [`GameConfig::validate`]
    /// rejects.
    pub fn frame_interval(&self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.frames_per_second).unwrap_or(Duration::MAX)
    }

    /// Pick the board size for a display of the given shape.
    ///
    /// The board is the largest square that fits, unless an explicit size was
    /// configured, in which case it must fit.
    pub fn resolve_board_size(&self, width: usize, height: usize) -> Result<usize, ConfigError> {
        let fits = width.min(height);
        match self.board_size {
            Some(board) if board > fits => Err(ConfigError::BoardLargerThanDisplay {
                board,
                width,
                height,
            }),
            Some(board) => Ok(board),
            None => Ok(fits),
        }
    }

    /// Check every tuning value against the resolved board size.
    pub fn validate(&self, board_size: usize) -> Result<(), ConfigError> {
        if !self.frames_per_second.is_finite() || self.frames_per_second <= 0.0 {
            return Err(ConfigError::InvalidFps(self.frames_per_second));
        }
        if Duration::try_from_secs_f64(1.0 / self.frames_per_second).is_err() {
            return Err(ConfigError::FpsTooLow(self.frames_per_second));
        }
        if board_size < 2 {
            return Err(ConfigError::BoardTooSmall(board_size));
        }
        if self.paddle_size == 0 || self.paddle_size > board_size {
            return Err(ConfigError::InvalidPaddleSize {
                paddle: self.paddle_size,
                board: board_size,
            });
        }
        if self.ball_speed_divisor == 0 {
            return Err(ConfigError::ZeroSpeedDivisor);
        }
        if self.axis_low_threshold > self.axis_high_threshold {
            return Err(ConfigError::InvertedThresholds {
                low: self.axis_low_threshold,
                high: self.axis_high_threshold,
            });
        }
        if !(0.0..=1.0).contains(&self.deflection_probability) {
            return Err(ConfigError::InvalidDeflection(self.deflection_probability));
        }
        if !(0.0..=1.0).contains(&self.brightness) {
            return Err(ConfigError::InvalidBrightness(self.brightness));
        }
        Ok(())
    }
}
