//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the paddle and ball physics plus the round state
//! machine. It has **zero dependencies** on input devices, threads or
//! displays, making it:
//!
//! - **Deterministic**: randomness comes from an injected RNG, so a seeded
//!   game always plays out the same way
//! - **Testable**: every rule can be exercised tick by tick
//! - **Fast**: the per-tick path does not allocate
//!
//! # Module Structure
//!
//! - [`paddle`]: clamped 1-D paddle on an edge column
//! - [`ball`]: throttled ball movement, edge bounce, paddle collision
//! - [`game_state`]: owns paddles and ball, runs ticks and round resets
//! - [`frame`]: on/off picture of the board rebuilt every tick
//!
//! # Game Rules
//!
//! - The ball moves one cell per axis every `ball_speed_divisor` ticks
//! - Top and bottom edges reflect the ball
//! - A paddle returns the ball when it covers the ball's row one column
//!   before the edge; straight shots get a random angle, angled shots
//!   flatten with probability `deflection_probability`
//! - A ball reaching an edge column is a point for the opposite player and
//!   the game goes back to the splash screen
//!
//! # Example
//!
//! ```
//! use pixel_pong_core::{GameState, Phase, Tuning};
//! use pixel_pong_types::{Direction, GameConfig};
//!
//! let tuning = Tuning::from_config(&GameConfig::default(), 8);
//! let mut game = GameState::seeded(tuning, 12345);
//! game.serve();
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! game.tick(Direction::Up, Direction::Neutral);
//! assert_eq!(game.left().position(), 2);
//! ```

pub mod ball;
pub mod frame;
pub mod game_state;
pub mod paddle;

pub use pixel_pong_types as types;

pub use ball::{Ball, BallStep};
pub use frame::BoardFrame;
pub use game_state::{GameState, Phase, TickOutcome, Tuning};
pub use paddle::Paddle;
