//! PixelGrid - the RGB picture handed to a display.

use crate::types::Rgb;

/// 2D grid of RGB pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Resize the grid, clearing it to black.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, Rgb::BLACK);
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    #[inline(always)]
    fn idx(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Copy `src` in with its top-left corner at the origin, clipping
    /// anything that does not fit.
    pub fn blit(&mut self, src: &PixelGrid) {
        for y in 0..src.height.min(self.height) {
            for x in 0..src.width.min(self.width) {
                self.pixels[y * self.width + x] = src.pixels[y * src.width + x];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_access_is_ignored() {
        let mut g = PixelGrid::new(2, 3);
        g.set(5, 5, Rgb::WHITE);
        assert_eq!(g.get(5, 5), None);
        assert_eq!(g.get(1, 2), Some(Rgb::BLACK));
    }

    #[test]
    fn blit_clips_to_destination() {
        let mut big = PixelGrid::square(3);
        big.fill(Rgb::RED);
        let mut small = PixelGrid::square(2);
        small.blit(&big);
        assert!(small.pixels().iter().all(|p| *p == Rgb::RED));

        let mut dst = PixelGrid::square(4);
        dst.blit(&small);
        assert_eq!(dst.get(1, 1), Some(Rgb::RED));
        assert_eq!(dst.get(2, 2), Some(Rgb::BLACK));
    }
}
