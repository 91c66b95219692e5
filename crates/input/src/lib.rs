//! Paddle input module.
//!
//! Each paddle is driven by its own [`InputChannel`]: a long-running listener
//! thread that reads raw `(axis, value)` samples from an [`InputSource`],
//! buckets them into [`Direction`](crate::types::Direction)s with an
//! [`AxisMapper`] and overwrites the paddle's single [`InputState`] slot.
//!
//! The simulation loop only ever reads the slot. It never blocks on a
//! listener, and a listener whose device is missing simply leaves its paddle
//! neutral.
//!
//! # Sources
//!
//! - [`EvdevSource`](evdev::EvdevSource): Linux input event device
//! - [`ChannelSource`]: in-process channel, fed by the [`KeyboardRouter`]
//!   for terminal play and by tests
//!
//! # Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | `w` / `s` | left paddle up / down |
//! | `↑` / `↓` (or `k` / `j`) | right paddle up / down |
//! | `q`, `Esc`, `Ctrl-C` | quit |

pub mod axis;
pub mod cancel;
pub mod channel;
pub mod error;
#[cfg(target_os = "linux")]
pub mod evdev;
pub mod map;
pub mod router;
pub mod source;
pub mod state;

pub use pixel_pong_types as types;

pub use axis::AxisMapper;
pub use cancel::CancelToken;
pub use channel::{InputChannel, ListenerConfig, DEFAULT_POLL_INTERVAL};
pub use error::InputError;
pub use map::{map_key, should_quit};
pub use router::{HeldKeys, KeyboardRouter, DEFAULT_KEY_RELEASE_TIMEOUT};
pub use source::{channel_source, AxisEvent, ChannelSource, InputSource, SourceSpec};
pub use state::{input_slot, InputPublisher, InputState};
