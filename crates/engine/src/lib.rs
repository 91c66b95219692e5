//! Engine module - the simulation/render loop.
//!
//! Ties the pieces together on a single thread: paddle input slots from
//! [`input`], physics from [`core`], rendering and the display sink from
//! [`term`]. See [`SimulationLoop`] for the per-tick order.

pub mod board;
pub mod game_loop;

pub use pixel_pong_core as core;
pub use pixel_pong_input as input;
pub use pixel_pong_term as term;
pub use pixel_pong_types as types;

pub use board::board_for_display;
pub use game_loop::{SimulationLoop, Sleeper};
