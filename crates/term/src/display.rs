//! The display sink seam.
//!
//! The game only needs a handful of operations from a display: its shape, a
//! way to stage a pixel grid, a present call, global brightness and power
//! off. [`TerminalDisplay`](crate::renderer::TerminalDisplay) implements it
//! for a terminal; [`MemoryDisplay`] records frames for tests and headless
//! runs.

use std::io;

use thiserror::Error;

use crate::pixels::PixelGrid;

#[derive(Debug, Error)]
pub enum DisplayError {
    /// The display could not be acquired at startup. Fatal.
    #[error("display unavailable: {0}")]
    Unavailable(#[source] io::Error),
    #[error("terminal is {cols}x{rows}, need at least {need_cols}x{need_rows} for the matrix")]
    TooSmall {
        cols: u16,
        rows: u16,
        need_cols: u16,
        need_rows: u16,
    },
    #[error("grid {grid_w}x{grid_h} does not fit display {width}x{height}")]
    ShapeMismatch {
        grid_w: usize,
        grid_h: usize,
        width: usize,
        height: usize,
    },
    #[error("display write failed: {0}")]
    Io(#[from] io::Error),
}

/// A pixel display driven from the simulation thread only.
pub trait DisplaySink {
    /// `(width, height)` in pixels.
    fn shape(&self) -> (usize, usize);

    /// Stage a grid for the next [`DisplaySink::show`]. Grids smaller than
    /// the display are drawn from the top-left corner.
    fn set_pixels(&mut self, grid: &PixelGrid) -> Result<(), DisplayError>;

    /// Push the staged grid to the hardware.
    fn show(&mut self) -> Result<(), DisplayError>;

    /// Global brightness, `0.0..=1.0`.
    fn set_brightness(&mut self, brightness: f32);

    /// Blank the display.
    fn off(&mut self) -> Result<(), DisplayError>;
}

pub(crate) fn check_fits(grid: &PixelGrid, width: usize, height: usize) -> Result<(), DisplayError> {
    if grid.width() > width || grid.height() > height {
        return Err(DisplayError::ShapeMismatch {
            grid_w: grid.width(),
            grid_h: grid.height(),
            width,
            height,
        });
    }
    Ok(())
}

/// In-memory display that keeps every presented frame.
#[derive(Debug, Clone)]
pub struct MemoryDisplay {
    staged: PixelGrid,
    shown: Vec<PixelGrid>,
    brightness: f32,
    off_count: usize,
}

impl MemoryDisplay {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            staged: PixelGrid::new(width, height),
            shown: Vec::new(),
            brightness: 1.0,
            off_count: 0,
        }
    }

    /// Every grid passed through [`DisplaySink::show`], oldest first.
    pub fn shown(&self) -> &[PixelGrid] {
        &self.shown
    }

    pub fn last_shown(&self) -> Option<&PixelGrid> {
        self.shown.last()
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn off_count(&self) -> usize {
        self.off_count
    }
}

impl DisplaySink for MemoryDisplay {
    fn shape(&self) -> (usize, usize) {
        (self.staged.width(), self.staged.height())
    }

    fn set_pixels(&mut self, grid: &PixelGrid) -> Result<(), DisplayError> {
        check_fits(grid, self.staged.width(), self.staged.height())?;
        self.staged.fill(crate::types::Rgb::BLACK);
        self.staged.blit(grid);
        Ok(())
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        self.shown.push(self.staged.clone());
        Ok(())
    }

    fn set_brightness(&mut self, brightness: f32) {
        self.brightness = brightness.clamp(0.0, 1.0);
    }

    fn off(&mut self) -> Result<(), DisplayError> {
        self.off_count += 1;
        self.staged.fill(crate::types::Rgb::BLACK);
        self.show()
    }
}
