#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

/// Validated mine placement: a boolean mask with a precomputed mine count.
///
/// This is the only way a raw caller-supplied layout enters the crate, so
/// everything downstream can assume a non-empty rectangular grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Validates a caller-supplied grid of `0`/`1` values, `1` marking a mine.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }

        let num_cols = rows[0].len();
        if num_cols == 0 {
            return Err(LayoutError::EmptyRow);
        }

        let mut mine_mask: Array2<bool> = Array2::default((rows.len(), num_cols));
        let mut mine_count = 0;

        for (y, row) in rows.iter().enumerate() {
            if row.len() != num_cols {
                return Err(LayoutError::Jagged);
            }
            for (x, &value) in row.iter().enumerate() {
                match value {
                    0 => {}
                    1 => {
                        mine_mask[(y, x)] = true;
                        mine_count += 1;
                    }
                    _ => return Err(LayoutError::InvalidValue),
                }
            }
        }

        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn num_rows(&self) -> Coord {
        self.mine_mask.nrows()
    }

    pub fn num_cols(&self) -> Coord {
        self.mine_mask.ncols()
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Mines in the clipped 8-neighborhood of `coords`, the cell itself excluded.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count()
            .try_into()
            .unwrap()
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Outcome of cycling a cell flag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Cycled,
    Won,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Cycled => true,
            Self::Won => true,
        }
    }
}

/// Outcome of opening a cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OpenOutcome {
    NoChange,
    Opened,
    Exploded,
    Won,
}

impl OpenOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        use OpenOutcome::*;
        match self {
            NoChange => false,
            Opened => true,
            Exploded => true,
            Won => true,
        }
    }
}
