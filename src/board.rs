use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BoardState {
    /// No action accepted yet
    Pristine,
    /// At least one flag cycle or open accepted
    InProgress,
    /// Terminal: every safe cell open, every mine flagged
    Won,
    /// Terminal: a mine was opened
    Lost,
}

impl BoardState {
    pub const fn is_pristine(self) -> bool {
        matches!(self, Self::Pristine)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::Pristine
    }
}

/// Board state machine over an owned grid of [`Cell`]s.
///
/// Both player actions are total: out-of-range coordinates and disallowed
/// actions are absorbed as `NoChange` rather than surfaced as errors, so a
/// host can forward arbitrary pointer coordinates without pre-validating.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid: Array2<Cell>,
    num_mines: CellCount,
    state: BoardState,
}

impl Board {
    pub fn new(layout: MineLayout) -> Self {
        let shape = (layout.num_rows(), layout.num_cols());
        let grid = Array2::from_shape_fn(shape, |(y, x)| {
            Cell::new(
                x,
                y,
                layout.contains_mine((x, y)),
                layout.adjacent_mine_count((x, y)),
            )
        });

        Self {
            grid,
            num_mines: layout.mine_count(),
            state: Default::default(),
        }
    }

    /// Validates `rows` and builds the board in one step.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        MineLayout::from_rows(rows).map(Self::new)
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_final(&self) -> bool {
        self.state.is_final()
    }

    pub fn num_rows(&self) -> Coord {
        self.grid.nrows()
    }

    pub fn num_cols(&self) -> Coord {
        self.grid.ncols()
    }

    pub fn num_mines(&self) -> CellCount {
        self.num_mines
    }

    pub fn grid(&self) -> &Array2<Cell> {
        &self.grid
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.grid.get(coords.to_nd_index())
    }

    /// Cycles the flag on a closed cell through `None -> Exclamation ->
    /// Question -> None`. Flagging every mine with `Exclamation` while all
    /// safe cells are open wins the board.
    pub fn cycle_cell_flag(&mut self, coords: Coord2) -> FlagOutcome {
        use FlagOutcome::*;

        if self.state.is_final() {
            return NoChange;
        }
        let Some(cell) = self.grid.get_mut(coords.to_nd_index()) else {
            return NoChange;
        };
        if cell.state.is_open() {
            return NoChange;
        }

        cell.flag = cell.flag.cycled();

        self.mark_started();
        self.refresh_state();

        if matches!(self.state, BoardState::Won) {
            Won
        } else {
            Cycled
        }
    }

    /// Opens a closed, unflagged cell. Safe cells seed a four-way flood-fill;
    /// opening a mine loses the board without touching any other cell.
    pub fn open_cell(&mut self, coords: Coord2) -> OpenOutcome {
        use OpenOutcome::*;

        if self.state.is_final() {
            return NoChange;
        }
        let Some(&cell) = self.cell(coords) else {
            return NoChange;
        };
        if cell.state.is_open() || cell.flag.is_set() {
            return NoChange;
        }

        self.grid[coords.to_nd_index()].state = CellState::Open;
        log::debug!("open cell at {:?}, mine: {}", coords, cell.is_mine);

        if !cell.is_mine {
            self.flood_fill(coords);
        }

        self.mark_started();
        self.refresh_state();

        match self.state {
            BoardState::Lost => Exploded,
            BoardState::Won => Won,
            _ => Opened,
        }
    }

    /// Four-way flood-fill seeded from the cardinal neighbors of an opened
    /// safe cell. A visited cell is opened only while closed and unflagged,
    /// and expansion continues only through zero-count cells; cells are
    /// marked open before their neighbors are enqueued, so none is opened
    /// twice and the work list drains.
    fn flood_fill(&mut self, start: Coord2) {
        let mut to_visit: VecDeque<Coord2> = self.grid.iter_cardinal_neighbors(start).collect();

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = &mut self.grid[visit_coords.to_nd_index()];
            if cell.is_mine || cell.state.is_open() || cell.flag.is_set() {
                continue;
            }

            cell.state = CellState::Open;
            log::trace!(
                "flood opened cell at {:?}, mine count: {}",
                visit_coords,
                cell.num_adjacent_mines
            );

            if cell.num_adjacent_mines == 0 {
                to_visit.extend(self.grid.iter_cardinal_neighbors(visit_coords));
            }
        }
    }

    fn mark_started(&mut self) {
        if matches!(self.state, BoardState::Pristine) {
            self.state = BoardState::InProgress;
        }
    }

    /// Re-derives win/loss from a full row-major scan after an accepted
    /// action. Any opened mine loses immediately; winning requires every
    /// safe cell open and every mine closed with an `Exclamation` flag
    /// exactly (a `Question` mark or bare closed mine is not enough).
    fn refresh_state(&mut self) {
        let mut won = true;

        for cell in self.grid.iter() {
            match cell.state {
                CellState::Open if cell.is_mine => {
                    self.state = BoardState::Lost;
                    return;
                }
                CellState::Open => {}
                CellState::Closed => {
                    if !cell.is_mine || cell.flag != CellFlag::Exclamation {
                        won = false;
                    }
                }
            }
        }

        if won {
            self.state = BoardState::Won;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn board(rows: &[&[u8]]) -> Board {
        let rows: Vec<Vec<u8>> = rows.iter().map(|row| row.to_vec()).collect();
        Board::from_rows(&rows).unwrap()
    }

    #[test]
    fn fresh_board_is_pristine() {
        let board = board(&[&[0, 1], &[1, 0]]);

        assert_eq!(board.state(), BoardState::Pristine);
        assert_eq!(board.num_rows(), 2);
        assert_eq!(board.num_cols(), 2);
        assert_eq!(board.num_mines(), 2);
        assert!(!board.is_final());
    }

    #[test]
    fn cells_carry_layout_facts() {
        let board = board(&[&[0, 1, 0], &[0, 0, 1], &[0, 0, 0]]);
        let expected = [[1, 1, 2], [1, 2, 1], [0, 1, 1]];

        for (y, row) in expected.iter().enumerate() {
            for (x, &count) in row.iter().enumerate() {
                let cell = board.cell((x, y)).unwrap();
                assert_eq!((cell.x, cell.y), (x, y));
                assert_eq!(cell.num_adjacent_mines, count, "at ({x}, {y})");
                assert_eq!(cell.state, CellState::Closed);
            }
        }
        assert!(board.cell((1, 0)).unwrap().is_mine);
        assert!(board.cell((3, 0)).is_none());
        assert!(board.cell((0, 3)).is_none());
    }

    #[test]
    fn construction_rejects_invalid_layouts() {
        assert_eq!(Board::from_rows(&[]).unwrap_err(), LayoutError::Empty);
        assert_eq!(
            Board::from_rows(&[vec![]]).unwrap_err(),
            LayoutError::EmptyRow
        );
        assert!(Board::from_rows(&[vec![0]]).is_ok());
    }

    #[test]
    fn flag_cycle_marks_progress_and_wraps() {
        let mut board = board(&[&[0, 0], &[0, 0]]);

        assert_eq!(board.cycle_cell_flag((0, 0)), FlagOutcome::Cycled);
        assert_eq!(board.state(), BoardState::InProgress);
        assert_eq!(board.cell((0, 0)).unwrap().flag, CellFlag::Exclamation);

        assert_eq!(board.cycle_cell_flag((0, 0)), FlagOutcome::Cycled);
        assert_eq!(board.cell((0, 0)).unwrap().flag, CellFlag::Question);

        assert_eq!(board.cycle_cell_flag((0, 0)), FlagOutcome::Cycled);
        assert_eq!(board.cell((0, 0)).unwrap().flag, CellFlag::None);
    }

    #[test]
    fn flag_cycle_ignores_open_and_out_of_range_cells() {
        let mut board = board(&[&[0, 1]]);

        board.open_cell((0, 0));
        assert_eq!(board.cycle_cell_flag((0, 0)), FlagOutcome::NoChange);
        assert_eq!(board.cell((0, 0)).unwrap().flag, CellFlag::None);
        assert_eq!(board.cycle_cell_flag((5, 5)), FlagOutcome::NoChange);
    }

    #[test]
    fn opening_a_mine_loses_without_flood_fill() {
        let mut board = board(&[&[1, 0], &[0, 0]]);

        assert_eq!(board.open_cell((0, 0)), OpenOutcome::Exploded);
        assert_eq!(board.state(), BoardState::Lost);

        // only the mine itself changed
        assert_eq!(board.cell((1, 0)).unwrap().state, CellState::Closed);
        assert_eq!(board.cell((0, 1)).unwrap().state, CellState::Closed);
        assert_eq!(board.cell((1, 1)).unwrap().state, CellState::Closed);
    }

    #[test]
    fn opening_a_flagged_cell_is_a_no_op() {
        let mut board = board(&[&[0, 1]]);

        board.cycle_cell_flag((0, 0));
        assert_eq!(board.open_cell((0, 0)), OpenOutcome::NoChange);
        assert_eq!(board.cell((0, 0)).unwrap().state, CellState::Closed);
    }

    #[test]
    fn flag_then_open_wins_two_cell_board() {
        let mut board = board(&[&[0, 1]]);

        assert_eq!(board.cycle_cell_flag((1, 0)), FlagOutcome::Cycled);
        assert_eq!(board.state(), BoardState::InProgress);
        assert_eq!(board.open_cell((0, 0)), OpenOutcome::Won);
        assert_eq!(board.state(), BoardState::Won);
    }

    #[test]
    fn flood_fill_opens_zero_region_and_numbered_border() {
        let mut board = board(&[&[0, 0, 0], &[0, 0, 0], &[0, 0, 1]]);

        assert_eq!(board.open_cell((0, 0)), OpenOutcome::Opened);
        assert_eq!(board.state(), BoardState::InProgress);

        for y in 0..3 {
            for x in 0..3 {
                let expected = if (x, y) == (2, 2) {
                    CellState::Closed
                } else {
                    CellState::Open
                };
                assert_eq!(board.cell((x, y)).unwrap().state, expected, "at ({x}, {y})");
            }
        }

        // flagging the last closed mine ends the game
        assert_eq!(board.cycle_cell_flag((2, 2)), FlagOutcome::Won);
        assert_eq!(board.state(), BoardState::Won);
    }

    #[test]
    fn flood_fill_does_not_cross_flags() {
        let mut board = board(&[&[0, 0, 0, 0, 1]]);

        board.cycle_cell_flag((1, 0));
        assert_eq!(board.open_cell((3, 0)), OpenOutcome::Opened);

        assert_eq!(board.cell((3, 0)).unwrap().state, CellState::Open);
        assert_eq!(board.cell((2, 0)).unwrap().state, CellState::Open);
        // the flag blocks propagation, leaving the cells behind it closed
        assert_eq!(board.cell((1, 0)).unwrap().state, CellState::Closed);
        assert_eq!(board.cell((0, 0)).unwrap().state, CellState::Closed);
        assert_eq!(board.cell((4, 0)).unwrap().state, CellState::Closed);
    }

    #[test]
    fn question_flagged_mine_does_not_win() {
        let mut board = board(&[&[0, 1]]);

        board.cycle_cell_flag((1, 0));
        board.cycle_cell_flag((1, 0));
        assert_eq!(board.cell((1, 0)).unwrap().flag, CellFlag::Question);

        assert_eq!(board.open_cell((0, 0)), OpenOutcome::Opened);
        assert_eq!(board.state(), BoardState::InProgress);
    }

    #[test]
    fn terminal_board_absorbs_all_actions() {
        let mut board = board(&[&[1, 0], &[0, 0]]);

        board.open_cell((0, 0));
        assert_eq!(board.state(), BoardState::Lost);

        assert_eq!(board.open_cell((1, 1)), OpenOutcome::NoChange);
        assert_eq!(board.cell((1, 1)).unwrap().state, CellState::Closed);
        assert_eq!(board.cycle_cell_flag((1, 1)), FlagOutcome::NoChange);
        assert_eq!(board.cell((1, 1)).unwrap().flag, CellFlag::None);
    }

    #[test]
    fn won_board_absorbs_all_actions() {
        let mut board = board(&[&[0, 1]]);

        board.cycle_cell_flag((1, 0));
        board.open_cell((0, 0));
        assert_eq!(board.state(), BoardState::Won);

        assert_eq!(board.cycle_cell_flag((1, 0)), FlagOutcome::NoChange);
        assert_eq!(board.cell((1, 0)).unwrap().flag, CellFlag::Exclamation);
    }

    #[test]
    fn open_cell_is_idempotent() {
        let mut board = board(&[&[0, 1]]);

        assert_eq!(board.open_cell((0, 0)), OpenOutcome::Opened);
        assert_eq!(board.open_cell((0, 0)), OpenOutcome::NoChange);
        assert_eq!(board.open_cell((7, 0)), OpenOutcome::NoChange);
    }

    #[test]
    fn single_cell_boards_resolve_immediately() {
        let mut safe = board(&[&[0]]);
        assert_eq!(safe.open_cell((0, 0)), OpenOutcome::Won);
        assert_eq!(safe.state(), BoardState::Won);

        let mut mined = board(&[&[1]]);
        assert_eq!(mined.cycle_cell_flag((0, 0)), FlagOutcome::Won);
        assert_eq!(mined.state(), BoardState::Won);
    }

    #[test]
    fn board_round_trips_through_serde() {
        let mut board = board(&[&[0, 1], &[0, 0]]);
        board.cycle_cell_flag((1, 0));
        board.open_cell((0, 1));

        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, board);
    }
}
