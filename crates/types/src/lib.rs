//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! Everything here is plain data with no I/O, so it can be shared by the
//! physics core, the input listeners and the display layer alike.
//!
//! # Board Geometry
//!
//! The board is a square grid of `board_size × board_size` pixels. Column `0`
//! holds the left paddle, column `board_size - 1` the right paddle. Row `0` is
//! the top edge.
//!
//! # Default Tuning
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FPS` | 14.0 | Simulation/render ticks per second |
//! | `DEFAULT_PADDLE_SIZE` | 2 | Paddle length in pixels |
//! | `DEFAULT_BALL_SPEED_DIVISOR` | 3 | Ticks per ball move |
//! | `DEFAULT_AXIS_LOW` | 107 | Raw samples below this read as "up" |
//! | `DEFAULT_AXIS_HIGH` | 147 | Raw samples above this read as "down" |
//! | `DEFAULT_DEFLECTION_PROBABILITY` | 0.2 | Chance a paddle hit flattens the ball |
//! | `DEFAULT_SPLASH_HOLD_MS` | 250 | Hold time for each splash colour |
//!
//! # Examples
//!
//! ```
//! use pixel_pong_types::{Direction, Side};
//!
//! assert_eq!(Direction::from_delta(-1), Direction::Up);
//! assert_eq!(Direction::Down.delta(), 1);
//! assert_eq!(Side::Left.opposite(), Side::Right);
//! ```

pub mod config;

pub use config::{ConfigError, GameConfig};

/// Ticks per second of the simulation loop.
pub const DEFAULT_FPS: f64 = 14.0;

/// Paddle length in pixels.
pub const DEFAULT_PADDLE_SIZE: usize = 2;

/// Number of ticks between two ball moves.
pub const DEFAULT_BALL_SPEED_DIVISOR: u32 = 3;

/// Lower bucket threshold on the 0-255 axis range.
pub const DEFAULT_AXIS_LOW: i32 = 107;

/// Upper bucket threshold on the 0-255 axis range.
pub const DEFAULT_AXIS_HIGH: i32 = 147;

/// Probability that a paddle hit zeroes a non-zero vertical velocity.
pub const DEFAULT_DEFLECTION_PROBABILITY: f64 = 0.2;

/// `ABS_Y`, the vertical axis of the first stick on most gamepads.
pub const DEFAULT_AXIS_CODE: u16 = 1;

/// How long each splash colour stays on screen.
pub const DEFAULT_SPLASH_HOLD_MS: u64 = 250;

/// Global display brightness (0.0-1.0).
pub const DEFAULT_BRIGHTNESS: f32 = 0.5;

/// Emulated matrix width (Unicorn HAT geometry).
pub const DEFAULT_DISPLAY_WIDTH: usize = 8;

/// Emulated matrix height (Unicorn HAT geometry).
pub const DEFAULT_DISPLAY_HEIGHT: usize = 8;

/// Raw axis value a keyboard press emits for "up".
pub const AXIS_RAW_MIN: i32 = 0;

/// Raw axis value at rest.
pub const AXIS_RAW_CENTER: i32 = 127;

/// Raw axis value a keyboard press emits for "down".
pub const AXIS_RAW_MAX: i32 = 255;

/// Discretized paddle input.
///
/// The numeric value (`-1`, `0`, `1`) is what gets applied to a paddle's
/// position every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    #[default]
    Neutral,
    Down,
}

impl Direction {
    /// Signed row offset for this direction.
    pub fn delta(self) -> i32 {
        match self {
            Direction::Up => -1,
            Direction::Neutral => 0,
            Direction::Down => 1,
        }
    }

    /// Inverse of [`Direction::delta`]; anything non-negative/non-positive
    /// collapses onto the nearest bucket.
    pub fn from_delta(delta: i32) -> Self {
        match delta.signum() {
            -1 => Direction::Up,
            1 => Direction::Down,
            _ => Direction::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Neutral => "neutral",
            Direction::Down => "down",
        }
    }
}

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `factor`, clamped to `0.0..=1.0`.
    pub fn scaled(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let scale = |c: u8| ((c as f32) * f).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}
