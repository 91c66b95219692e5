//! Display module: everything between a [`BoardFrame`](core::BoardFrame) and
//! the pixels on screen.
//!
//! - [`GameView`] turns a board frame into a [`PixelGrid`] (lit cells white,
//!   everything else black)
//! - [`DisplaySink`] is the seam to the physical display
//! - [`TerminalDisplay`] emulates a small LED matrix in a terminal, flushing
//!   only changed pixel runs
//! - [`Splash`] is the blocking colour sequence shown before every round
//!
//! All of it runs on the simulation thread; no display type is shared across
//! threads.

pub mod display;
pub mod game_view;
pub mod pixels;
pub mod renderer;
pub mod splash;

pub use pixel_pong_core as core;
pub use pixel_pong_types as types;

pub use display::{DisplayError, DisplaySink, MemoryDisplay};
pub use game_view::GameView;
pub use pixels::PixelGrid;
pub use renderer::{encode_diff_into, encode_full_into, TerminalDisplay, PIXEL_COLS};
pub use splash::{Splash, MAX_SPLASH_COLORS};
