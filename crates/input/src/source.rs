//! Input sources: anything that yields `(axis, raw value)` samples.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::mpsc;
use std::time::Duration;

use crate::error::InputError;

/// One raw sample from an input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisEvent {
    pub axis: u16,
    pub value: i32,
}

impl AxisEvent {
    pub fn new(axis: u16, value: i32) -> Self {
        Self { axis, value }
    }
}

/// A blocking stream of axis samples.
///
/// Implementations must return within roughly `timeout` so the listener can
/// observe cancellation.
pub trait InputSource: Send {
    /// Wait up to `timeout` for the next sample. `Ok(None)` means nothing
    /// arrived in time.
    fn next_event(&mut self, timeout: Duration) -> Result<Option<AxisEvent>, InputError>;
}

/// Source fed through an in-process channel.
///
/// Used by the keyboard router and by tests.
#[derive(Debug)]
pub struct ChannelSource {
    rx: mpsc::Receiver<AxisEvent>,
}

/// Create a sender and the source it feeds.
pub fn channel_source() -> (mpsc::Sender<AxisEvent>, ChannelSource) {
    let (tx, rx) = mpsc::channel();
    (tx, ChannelSource { rx })
}

impl InputSource for ChannelSource {
    fn next_event(&mut self, timeout: Duration) -> Result<Option<AxisEvent>, InputError> {
        match self.rx.recv_timeout(timeout) {
            Ok(ev) => Ok(Some(ev)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(InputError::Disconnected),
        }
    }
}

/// Where a paddle's input comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// Terminal keyboard via the keyboard router.
    Keys,
    /// Linux input event device, e.g. `/dev/input/event0`.
    Evdev(PathBuf),
    /// No input; the paddle never moves.
    None,
}

impl FromStr for SourceSpec {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "keys" | "keyboard" => return Ok(SourceSpec::Keys),
            "none" | "off" => return Ok(SourceSpec::None),
            _ => {}
        }
        match s.split_once(':') {
            Some((scheme, path)) if scheme.eq_ignore_ascii_case("evdev") && !path.is_empty() => {
                Ok(SourceSpec::Evdev(PathBuf::from(path)))
            }
            _ => Err(InputError::InvalidSpec(s.to_string())),
        }
    }
}

impl std::fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceSpec::Keys => f.write_str("keys"),
            SourceSpec::Evdev(path) => write!(f, "evdev:{}", path.display()),
            SourceSpec::None => f.write_str("none"),
        }
    }
}
