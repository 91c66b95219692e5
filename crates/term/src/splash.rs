//! Round-start splash: a few full-board colour fills, then black.

use std::time::Duration;

use arrayvec::ArrayVec;

use crate::display::{DisplayError, DisplaySink};
use crate::pixels::PixelGrid;
use crate::types::{Rgb, DEFAULT_SPLASH_HOLD_MS};

pub const MAX_SPLASH_COLORS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splash {
    colors: ArrayVec<Rgb, MAX_SPLASH_COLORS>,
    hold: Duration,
}

impl Default for Splash {
    fn default() -> Self {
        Self::new(
            &[Rgb::RED, Rgb::GREEN, Rgb::BLUE, Rgb::WHITE],
            Duration::from_millis(DEFAULT_SPLASH_HOLD_MS),
        )
    }
}

impl Splash {
    /// Colours beyond [`MAX_SPLASH_COLORS`] are dropped.
    pub fn new(colors: &[Rgb], hold: Duration) -> Self {
        Self {
            colors: colors.iter().copied().take(MAX_SPLASH_COLORS).collect(),
            hold,
        }
    }

    pub fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }

    /// Play the sequence on `sink`, blocking the caller.
    ///
    /// `wait` is called after each colour with the hold time; returning
    /// `false` cuts the sequence short. The display is blanked either way.
    pub fn play<D, F>(&self, sink: &mut D, grid: &mut PixelGrid, mut wait: F) -> Result<(), DisplayError>
    where
        D: DisplaySink + ?Sized,
        F: FnMut(Duration) -> bool,
    {
        for color in &self.colors {
            grid.fill(*color);
            sink.set_pixels(grid)?;
            sink.show()?;
            if !wait(self.hold) {
                break;
            }
        }

        grid.fill(Rgb::BLACK);
        sink.set_pixels(grid)?;
        sink.show()
    }
}
