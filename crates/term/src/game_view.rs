//! GameView: maps a [`BoardFrame`] into a pixel grid.
//!
//! This module is pure (no I/O) apart from [`GameView::present`], which hands
//! the finished grid to a [`DisplaySink`]. It keeps no state between frames.

use crate::core::BoardFrame;
use crate::display::{DisplayError, DisplaySink};
use crate::pixels::PixelGrid;
use crate::types::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    on: Rgb,
    off: Rgb,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            on: Rgb::WHITE,
            off: Rgb::BLACK,
        }
    }
}

impl GameView {
    pub fn new(on: Rgb, off: Rgb) -> Self {
        Self { on, off }
    }

    /// Render the frame into an existing grid.
    ///
    /// This is the allocation-free hot path: the grid is only resized when
    /// the board size changes.
    pub fn render_into(&self, frame: &BoardFrame, grid: &mut PixelGrid) {
        let size = frame.size();
        if grid.width() != size || grid.height() != size {
            grid.resize(size, size);
        }
        for y in 0..size {
            for x in 0..size {
                let color = if frame.is_on(x, y) { self.on } else { self.off };
                grid.set(x, y, color);
            }
        }
    }

    pub fn render(&self, frame: &BoardFrame) -> PixelGrid {
        let mut grid = PixelGrid::square(frame.size());
        self.render_into(frame, &mut grid);
        grid
    }

    /// Render, stage and show in one go.
    pub fn present<D: DisplaySink + ?Sized>(
        &self,
        frame: &BoardFrame,
        grid: &mut PixelGrid,
        sink: &mut D,
    ) -> Result<(), DisplayError> {
        self.render_into(frame, grid);
        sink.set_pixels(grid)?;
        sink.show()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::MemoryDisplay;

    #[test]
    fn lit_cells_are_white_rest_black() {
        let mut frame = BoardFrame::new(3);
        frame.light(0, 1);
        frame.light(2, 2);
        let grid = GameView::default().render(&frame);

        assert_eq!(grid.get(0, 1), Some(Rgb::WHITE));
        assert_eq!(grid.get(2, 2), Some(Rgb::WHITE));
        let white = grid.pixels().iter().filter(|p| **p == Rgb::WHITE).count();
        assert_eq!(white, 2);
        assert_eq!(grid.get(1, 1), Some(Rgb::BLACK));
    }

    #[test]
    fn render_into_overwrites_previous_frame() {
        let view = GameView::default();
        let mut grid = PixelGrid::square(3);
        grid.fill(Rgb::RED);

        let frame = BoardFrame::new(3);
        view.render_into(&frame, &mut grid);
        assert!(grid.pixels().iter().all(|p| *p == Rgb::BLACK));
    }

    #[test]
    fn present_shows_once() {
        let mut frame = BoardFrame::new(4);
        frame.light(1, 1);
        let mut sink = MemoryDisplay::new(4, 4);
        let mut grid = PixelGrid::square(4);
        GameView::default()
            .present(&frame, &mut grid, &mut sink)
            .unwrap();
        assert_eq!(sink.shown().len(), 1);
        assert_eq!(sink.last_shown().unwrap().get(1, 1), Some(Rgb::WHITE));
    }
}
