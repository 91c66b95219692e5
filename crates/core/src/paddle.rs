//! Paddle - a bounded vertical segment on one edge column.

use std::ops::Range;

/// A paddle occupying `size` consecutive rows starting at `position`.
///
/// Invariant: `position + size <= board_size` at all times. Moves that would
/// break it are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paddle {
    size: usize,
    position: usize,
    board_size: usize,
}

impl Paddle {
    /// Create a paddle vertically centered on the board.
    pub fn new(size: usize, board_size: usize) -> Self {
        let size = size.min(board_size);
        Self {
            size,
            position: (board_size - size) / 2,
            board_size,
        }
    }

    /// Create a paddle at an explicit offset, clamped into range.
    pub fn at(size: usize, board_size: usize, position: usize) -> Self {
        let size = size.min(board_size);
        Self {
            size,
            position: position.min(board_size - size),
            board_size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Shift the paddle by `delta` rows.
    ///
    /// Returns `false` (and leaves the paddle untouched) if the shifted
    /// paddle would leave the board.
    pub fn move_by(&mut self, delta: i32) -> bool {
        let next = self.position as i64 + delta as i64;
        if next < 0 || next as usize + self.size > self.board_size {
            return false;
        }
        self.position = next as usize;
        true
    }

    /// Rows covered by the paddle, top to bottom.
    pub fn occupied_cells(&self) -> Range<usize> {
        self.position..self.position + self.size
    }

    pub fn covers(&self, row: i32) -> bool {
        row >= 0 && self.occupied_cells().contains(&(row as usize))
    }
}
