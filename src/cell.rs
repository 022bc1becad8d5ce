use serde::{Deserialize, Serialize};

use crate::types::Coord;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellState {
    Closed,
    Open,
}

impl CellState {
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Closed
    }
}

/// Player-set marker on a closed cell, independent of actual mine status.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellFlag {
    None,
    Exclamation,
    Question,
}

impl CellFlag {
    /// Next marker in the `None -> Exclamation -> Question -> None` cycle.
    pub const fn cycled(self) -> Self {
        match self {
            Self::None => Self::Exclamation,
            Self::Exclamation => Self::Question,
            Self::Question => Self::None,
        }
    }

    pub const fn is_set(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl Default for CellFlag {
    fn default() -> Self {
        Self::None
    }
}

/// One grid position: fixed identity and mine facts plus mutable player state.
///
/// `num_adjacent_mines` counts mines in the clipped 8-neighborhood of the
/// full original layout and is never recomputed after board construction.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub x: Coord,
    pub y: Coord,
    pub is_mine: bool,
    pub num_adjacent_mines: u8,
    pub state: CellState,
    pub flag: CellFlag,
}

impl Cell {
    pub const fn new(x: Coord, y: Coord, is_mine: bool, num_adjacent_mines: u8) -> Self {
        Self {
            x,
            y,
            is_mine,
            num_adjacent_mines,
            state: CellState::Closed,
            flag: CellFlag::None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(0, 0, false, 0)
    }
}
