//! BoardFrame - the per-tick on/off picture of the board.

/// Square grid of lit/unlit cells, rebuilt from game state every tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardFrame {
    size: usize,
    cells: Vec<bool>,
}

impl BoardFrame {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    fn idx(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(y * self.size + x)
    }

    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.idx(x, y).map(|i| self.cells[i]).unwrap_or(false)
    }

    /// Light a cell. Out-of-range coordinates are ignored.
    pub fn light(&mut self, x: usize, y: usize) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = true;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Resize, keeping the allocation when possible. Cells are cleared.
    pub fn reset(&mut self, size: usize) {
        self.size = size;
        self.cells.clear();
        self.cells.resize(size * size, false);
    }

    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Lit cells in row-major order as `(x, y)`.
    pub fn lit_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(move |(i, _)| (i % size, i / size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_and_query() {
        let mut f = BoardFrame::new(4);
        f.light(1, 2);
        f.light(9, 9);
        assert!(f.is_on(1, 2));
        assert!(!f.is_on(2, 1));
        assert!(!f.is_on(9, 9));
        assert_eq!(f.lit_cells().collect::<Vec<_>>(), vec![(1, 2)]);
    }

    #[test]
    fn reset_clears_and_resizes() {
        let mut f = BoardFrame::new(4);
        f.light(0, 0);
        f.reset(6);
        assert_eq!(f.size(), 6);
        assert_eq!(f.lit_count(), 0);
    }
}
