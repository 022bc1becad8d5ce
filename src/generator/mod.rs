use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Source of mine layouts usable as [`Board`] constructor input.
///
/// Implementations return the raw `rows x cols` grid of `0`/`1` values, not
/// a validated [`MineLayout`], so they stay independent of the board layer.
pub trait MineArrayGenerator {
    fn generate(self, config: MineArrayConfig) -> Vec<Vec<u8>>;
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineArrayConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl MineArrayConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let mines = mines.min(rows * cols);
        Self::new_unchecked(rows, cols, mines)
    }

    /// Square board with the stock mine density.
    pub fn square(rows: Coord) -> Self {
        let rows = rows.max(1);
        Self::new(rows, rows, default_mine_count(rows, rows))
    }

    pub const fn total_cells(&self) -> CellCount {
        self.rows * self.cols
    }
}

impl Default for MineArrayConfig {
    fn default() -> Self {
        Self::square(10)
    }
}

/// Stock density of 15%, used when the caller does not pick a mine count.
pub fn default_mine_count(rows: Coord, cols: Coord) -> CellCount {
    rows * cols * 15 / 100
}
