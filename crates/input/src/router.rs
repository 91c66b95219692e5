//! Keyboard router: terminal keys as two synthetic analog sticks.
//!
//! A single thread reads crossterm events and turns paddle keys into raw
//! axis samples on two [`ChannelSource`]s, one per paddle, so keyboard play
//! goes through exactly the same listener path as a real device.
//!
//! Many terminals never send key-release events, so a paddle whose key has
//! not been seen for `release_timeout` is sent back to neutral.

use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::error::InputError;
use crate::map::{map_key, raw_sample, should_quit};
use crate::source::{channel_source, AxisEvent, ChannelSource};
use crate::types::{Direction, Side};

/// Must exceed the terminal auto-repeat delay (typically 250-500 ms).
pub const DEFAULT_KEY_RELEASE_TIMEOUT: Duration = Duration::from_millis(500);

const EVENT_POLL: Duration = Duration::from_millis(20);

/// Per-paddle held-key bookkeeping.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    held: [Option<(Direction, Instant)>; 2],
    release_timeout: Duration,
}

fn slot(side: Side) -> usize {
    match side {
        Side::Left => 0,
        Side::Right => 1,
    }
}

impl HeldKeys {
    pub fn new(release_timeout: Duration) -> Self {
        Self {
            held: [None, None],
            release_timeout,
        }
    }

    /// Record a press or repeat. Returns the direction to emit.
    pub fn press(&mut self, side: Side, direction: Direction, now: Instant) -> Direction {
        self.held[slot(side)] = Some((direction, now));
        direction
    }

    /// Record a release. Returns `true` if the paddle was held.
    pub fn release(&mut self, side: Side) -> bool {
        self.held[slot(side)].take().is_some()
    }

    /// Sides whose key timed out since the last press; they are no longer
    /// considered held.
    pub fn expire(&mut self, now: Instant) -> impl Iterator<Item = Side> {
        let timeout = self.release_timeout;
        let mut expired = [None, None];
        for (i, side) in [Side::Left, Side::Right].into_iter().enumerate() {
            if let Some((_, at)) = self.held[i] {
                if now.saturating_duration_since(at) >= timeout {
                    self.held[i] = None;
                    expired[i] = Some(side);
                }
            }
        }
        expired.into_iter().flatten()
    }

    pub fn held(&self, side: Side) -> Option<Direction> {
        self.held[slot(side)].map(|(d, _)| d)
    }
}

/// Running keyboard router.
#[derive(Debug)]
pub struct KeyboardRouter {
    handle: JoinHandle<()>,
}

impl KeyboardRouter {
    /// Start routing. Returns the router plus the left and right sources.
    ///
    /// Quit keys fire `cancel`. The router exits once `cancel` is set.
    pub fn spawn(
        cancel: CancelToken,
        axis_code: u16,
        release_timeout: Duration,
    ) -> Result<(Self, ChannelSource, ChannelSource), InputError> {
        let (left_tx, left) = channel_source();
        let (right_tx, right) = channel_source();

        let handle = thread::Builder::new()
            .name("keyboard-router".to_string())
            .spawn(move || {
                let outputs = [left_tx, right_tx];
                route(&outputs, axis_code, HeldKeys::new(release_timeout), cancel)
            })
            .map_err(InputError::Spawn)?;

        Ok((Self { handle }, left, right))
    }

    pub fn join(self) -> bool {
        self.handle.join().is_ok()
    }
}

fn emit(outputs: &[Sender<AxisEvent>; 2], side: Side, axis: u16, direction: Direction) {
    // A paddle driven by another source has dropped its receiver.
    let _ = outputs[slot(side)].send(AxisEvent::new(axis, raw_sample(direction)));
}

fn handle_key(
    key: KeyEvent,
    outputs: &[Sender<AxisEvent>; 2],
    axis: u16,
    keys: &mut HeldKeys,
    cancel: &CancelToken,
) {
    if key.kind == KeyEventKind::Press && should_quit(key) {
        info!("quit requested from keyboard");
        cancel.cancel();
        return;
    }

    let Some((side, direction)) = map_key(key) else {
        return;
    };

    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {
            let d = keys.press(side, direction, Instant::now());
            emit(outputs, side, axis, d);
        }
        KeyEventKind::Release => {
            if keys.held(side) == Some(direction) && keys.release(side) {
                emit(outputs, side, axis, Direction::Neutral);
            }
        }
    }
}

fn route(outputs: &[Sender<AxisEvent>; 2], axis: u16, mut keys: HeldKeys, cancel: CancelToken) {
    debug!("keyboard router started");

    while !cancel.is_cancelled() {
        match event::poll(EVENT_POLL) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => handle_key(key, outputs, axis, &mut keys, &cancel),
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "keyboard read failed; router stopped");
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                warn!(error = %e, "keyboard poll failed; router stopped");
                break;
            }
        }

        for side in keys.expire(Instant::now()) {
            emit(outputs, side, axis, Direction::Neutral);
        }
    }

    debug!("keyboard router stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InputSource;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn held_keys_expire_after_timeout() {
        let t0 = Instant::now();
        let mut keys = HeldKeys::new(Duration::from_millis(150));
        keys.press(Side::Left, Direction::Up, t0);

        assert_eq!(keys.expire(t0 + Duration::from_millis(100)).count(), 0);
        assert_eq!(keys.held(Side::Left), Some(Direction::Up));

        let expired: Vec<_> = keys.expire(t0 + Duration::from_millis(150)).collect();
        assert_eq!(expired, vec![Side::Left]);
        assert_eq!(keys.held(Side::Left), None);
    }

    #[test]
    fn repeat_press_extends_hold() {
        let t0 = Instant::now();
        let mut keys = HeldKeys::new(Duration::from_millis(150));
        keys.press(Side::Right, Direction::Down, t0);
        keys.press(Side::Right, Direction::Down, t0 + Duration::from_millis(100));
        assert_eq!(keys.expire(t0 + Duration::from_millis(200)).count(), 0);
    }

    #[test]
    fn default_timeout_bridges_auto_repeat_delay() {
        let t0 = Instant::now();
        let mut keys = HeldKeys::new(DEFAULT_KEY_RELEASE_TIMEOUT);
        keys.press(Side::Left, Direction::Down, t0);

        // First auto-repeat typically arrives 250-500 ms after the press.
        assert_eq!(keys.expire(t0 + Duration::from_millis(450)).count(), 0);
        keys.press(Side::Left, Direction::Down, t0 + Duration::from_millis(450));
        assert_eq!(keys.expire(t0 + Duration::from_millis(900)).count(), 0);
        assert_eq!(keys.held(Side::Left), Some(Direction::Down));

        let expired: Vec<_> = keys.expire(t0 + Duration::from_millis(950)).collect();
        assert_eq!(expired, vec![Side::Left]);
    }

    #[test]
    fn key_press_and_release_route_to_the_right_paddle() {
        let (ltx, mut left) = channel_source();
        let (rtx, mut right) = channel_source();
        let outputs = [ltx, rtx];
        let mut keys = HeldKeys::new(DEFAULT_KEY_RELEASE_TIMEOUT);
        let cancel = CancelToken::new();

        handle_key(key(KeyCode::Up, KeyEventKind::Press), &outputs, 1, &mut keys, &cancel);
        handle_key(key(KeyCode::Up, KeyEventKind::Release), &outputs, 1, &mut keys, &cancel);

        let wait = Duration::from_millis(10);
        assert_eq!(right.next_event(wait).unwrap(), Some(AxisEvent::new(1, 0)));
        assert_eq!(right.next_event(wait).unwrap(), Some(AxisEvent::new(1, 127)));
        assert_eq!(left.next_event(Duration::from_millis(1)).unwrap(), None);
    }

    #[test]
    fn quit_key_cancels() {
        let (ltx, _l) = channel_source();
        let (rtx, _r) = channel_source();
        let outputs = [ltx, rtx];
        let mut keys = HeldKeys::new(DEFAULT_KEY_RELEASE_TIMEOUT);
        let cancel = CancelToken::new();

        handle_key(
            key(KeyCode::Char('q'), KeyEventKind::Press),
            &outputs,
            1,
            &mut keys,
            &cancel,
        );
        assert!(cancel.is_cancelled());
    }
}
