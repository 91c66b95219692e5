//! InputChannel - one long-lived listener thread per paddle.
//!
//! The listener owns its [`InputSource`] and the paddle's [`InputPublisher`].
//! It never talks to the simulation loop directly: the loop reads the
//! matching [`InputState`] whenever it likes and never waits.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::axis::AxisMapper;
use crate::cancel::CancelToken;
use crate::error::InputError;
use crate::source::InputSource;
use crate::state::{input_slot, InputPublisher, InputState};
use crate::types::{GameConfig, Side, DEFAULT_AXIS_CODE};

/// How long a listener blocks in a single read before re-checking the
/// cancel token.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerConfig {
    pub axis_code: u16,
    pub mapper: AxisMapper,
    pub poll_interval: Duration,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            axis_code: DEFAULT_AXIS_CODE,
            mapper: AxisMapper::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl ListenerConfig {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            axis_code: config.axis_code,
            mapper: AxisMapper::from_config(config),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Handle to a paddle's listener.
///
/// A channel whose source failed to open is still a valid channel: its state
/// stays neutral for the whole session and [`InputChannel::startup_error`]
/// says why.
#[derive(Debug)]
pub struct InputChannel {
    side: Side,
    state: InputState,
    handle: Option<JoinHandle<()>>,
    startup_error: Option<InputError>,
}

impl InputChannel {
    /// Open a source and start listening on it.
    ///
    /// `open` runs on the calling thread so failures are reported here, not
    /// lost inside the listener.
    pub fn spawn<S, F>(side: Side, config: ListenerConfig, cancel: CancelToken, open: F) -> Self
    where
        S: InputSource + 'static,
        F: FnOnce() -> Result<S, InputError>,
    {
        let (publisher, state) = input_slot();

        let source = match open() {
            Ok(source) => source,
            Err(err) => return Self::degraded(side, state, err),
        };

        let spawned = thread::Builder::new()
            .name(format!("input-{}", side.as_str()))
            .spawn(move || listen(side, source, config, publisher, cancel));

        match spawned {
            Ok(handle) => Self {
                side,
                state,
                handle: Some(handle),
                startup_error: None,
            },
            Err(e) => Self::degraded(side, state, InputError::Spawn(e)),
        }
    }

    /// A channel with no source at all.
    pub fn disabled(side: Side) -> Self {
        info!(side = side.as_str(), "input disabled; paddle stays neutral");
        Self {
            side,
            state: InputState::neutral(),
            handle: None,
            startup_error: None,
        }
    }

    fn degraded(side: Side, state: InputState, err: InputError) -> Self {
        warn!(side = side.as_str(), error = %err, "input source unavailable; paddle stays neutral");
        Self {
            side,
            state,
            handle: None,
            startup_error: Some(err),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Reader for the paddle's latest direction.
    pub fn state(&self) -> InputState {
        self.state.clone()
    }

    pub fn startup_error(&self) -> Option<&InputError> {
        self.startup_error.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the listener to exit. Cancel first or this may block.
    ///
    /// Returns `false` if the listener thread panicked.
    pub fn join(mut self) -> bool {
        match self.handle.take() {
            Some(handle) => handle.join().is_ok(),
            None => true,
        }
    }
}

fn listen<S: InputSource>(
    side: Side,
    mut source: S,
    config: ListenerConfig,
    publisher: InputPublisher,
    cancel: CancelToken,
) {
    info!(side = side.as_str(), axis = config.axis_code, "input listener started");

    while !cancel.is_cancelled() {
        match source.next_event(config.poll_interval) {
            Ok(Some(ev)) if ev.axis == config.axis_code => {
                publisher.publish(config.mapper.classify(ev.value));
            }
            Ok(_) => {}
            Err(err) => {
                warn!(side = side.as_str(), error = %err, "input listener stopped; paddle stays neutral");
                publisher.reset();
                return;
            }
        }
    }

    publisher.reset();
    debug!(side = side.as_str(), "input listener cancelled");
}
