//! Single-slot, overwrite-on-write paddle input.
//!
//! Each paddle gets exactly one [`InputPublisher`] (held by its listener
//! thread) and any number of [`InputState`] readers. There is no queue: the
//! reader always sees the most recent value, and a value that was overwritten
//! before it was read is simply lost.

use std::sync::atomic::{AtomicI8, Ordering};
use std::sync::Arc;

use crate::types::Direction;

/// Create a connected publisher/reader pair, initially neutral.
pub fn input_slot() -> (InputPublisher, InputState) {
    let slot = Arc::new(AtomicI8::new(0));
    (
        InputPublisher {
            slot: Arc::clone(&slot),
        },
        InputState { slot },
    )
}

/// Write half. Deliberately not `Clone`: one writer per slot.
#[derive(Debug)]
pub struct InputPublisher {
    slot: Arc<AtomicI8>,
}

impl InputPublisher {
    pub fn publish(&self, direction: Direction) {
        self.slot.store(direction.delta() as i8, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.publish(Direction::Neutral);
    }
}

/// Read half.
#[derive(Debug, Clone)]
pub struct InputState {
    slot: Arc<AtomicI8>,
}

impl InputState {
    /// A reader with no publisher; always neutral.
    pub fn neutral() -> Self {
        input_slot().1
    }

    pub fn latest(&self) -> Direction {
        Direction::from_delta(self.slot.load(Ordering::Relaxed) as i32)
    }
}
