//! Board module - the shared playfield both subsystems compete over
//!
//! Wraps a `Grid<Cell>` and owns every board mutation: piece locking, full
//! row detection and compaction, and cell damage. Occupancy queries merge
//! the locked grid with an injected predicate so the still-falling piece
//! can read as solid to the character without the board knowing anything
//! about piece state.
//!
//! Rows are indexed bottom-up: row 0 is the floor, pieces fall by
//! decreasing y, and a piece may poke above `height` at spawn.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use blockduel_types::BoardEvent;

use crate::grid::Grid;
use crate::piece::ActivePiece;

/// One board cell
///
/// `kind` 0 means empty, 1-7 the identity of the piece type that produced
/// the block. `hp > 0` marks a weak (damageable) block; armored blocks
/// carry `hp == 0` and cannot be damaged. Invariant: `kind == 0` implies
/// `hp == 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub kind: u8,
    pub hp: u8,
}

impl Cell {
    /// The empty cell
    pub const EMPTY: Cell = Cell { kind: 0, hp: 0 };

    /// A block cell with the given identity and hit points
    pub fn block(kind: u8, hp: u8) -> Self {
        Self { kind, hp }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == 0
    }

    /// Whether the block can be damaged
    pub fn is_weak(&self) -> bool {
        self.hp > 0
    }
}

/// Injected extra-occupancy strategy (typically the active falling piece)
pub type OccupancyProbe = Box<dyn Fn(i32, i32) -> bool>;

/// The playfield: a grid of cells plus the board-level rules
pub struct Board {
    grid: Grid<Cell>,
    extra_occupied: Option<OccupancyProbe>,
    events: Vec<BoardEvent>,
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("grid", &self.grid)
            .field("extra_occupied", &self.extra_occupied.is_some())
            .field("events", &self.events)
            .finish()
    }
}

impl Board {
    /// Create an empty board
    ///
    /// `origin` is the world position of the bottom-left corner of cell
    /// (0, 0).
    pub fn new(width: i32, height: i32, cell_size: f32, origin: Vec2) -> Self {
        Self {
            grid: Grid::new(width, height, cell_size, origin),
            extra_occupied: None,
            events: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    /// The underlying grid (coordinate mapping, change queue)
    pub fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    /// Mutable grid access for collaborators (level prefill, tests)
    pub fn grid_mut(&mut self) -> &mut Grid<Cell> {
        &mut self.grid
    }

    /// Read cell (x, y); out-of-range reads are empty
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        self.grid.get(x, y)
    }

    /// Whether every cell of the piece sits at an allowed position
    ///
    /// Columns must be inside `[0, width)` and rows at or above the floor;
    /// rows at or above `height` are allowed (a piece may poke over the top
    /// of the visible board at spawn) and are not checked for occupancy.
    pub fn is_valid_placement(&self, piece: &ActivePiece) -> bool {
        for cell in piece.cells() {
            if cell.x < 0 || cell.x >= self.width() {
                return false;
            }
            if cell.y < 0 {
                return false;
            }
            if cell.y >= self.height() {
                continue;
            }
            if !self.grid.get(cell.x, cell.y).is_empty() {
                return false;
            }
        }
        true
    }

    /// Whether the piece can spawn here (same rules as placement)
    pub fn can_spawn(&self, piece: &ActivePiece) -> bool {
        self.is_valid_placement(piece)
    }

    /// Commit the piece's cells onto the board
    ///
    /// Cells above the visible board are silently skipped. Fires
    /// `PiecePlaced` after all writes complete, so listeners observe a
    /// consistent grid.
    pub fn place(&mut self, piece: &ActivePiece) {
        let block = Cell::block(piece.kind.cell_id(), piece.hp);
        for cell in piece.cells() {
            self.grid.set(cell.x, cell.y, block);
        }
        debug!(kind = piece.kind.as_str(), x = piece.pos.x, y = piece.pos.y, "piece placed");
        self.events.push(BoardEvent::PiecePlaced);
    }

    /// Clear every full row and compact the stack downward
    ///
    /// Scans from the top row down; after clearing a row the same index is
    /// re-examined because it now holds what was one row higher, so a stack
    /// of N consecutive full rows collapses in one pass. Returns the number
    /// of rows cleared and fires `LinesCleared` when that is non-zero.
    pub fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = self.height() - 1;
        while y >= 0 {
            if self.is_row_full(y) {
                self.clear_row(y);
                self.drop_rows_above(y);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        if cleared > 0 {
            debug!(cleared, "lines cleared");
            self.events.push(BoardEvent::LinesCleared(cleared));
        }
        cleared
    }

    /// Damage the block at (x, y)
    ///
    /// Returns `true` when the block is destroyed (hit points exhausted).
    /// Empty and armored (non-weak) cells are untouched and return `false`.
    pub fn damage_cell(&mut self, x: i32, y: i32, amount: u8) -> bool {
        let cell = self.grid.get(x, y);
        if cell.is_empty() || !cell.is_weak() {
            return false;
        }

        let hp = cell.hp.saturating_sub(amount);
        if hp == 0 {
            self.grid.set(x, y, Cell::EMPTY);
            debug!(x, y, "block destroyed");
            return true;
        }
        self.grid.set(x, y, Cell::block(cell.kind, hp));
        false
    }

    /// Whether (x, y) reads as solid: an on-grid non-empty cell, or a cell
    /// the injected predicate claims (the still-falling piece)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        if !self.grid.is_valid(x, y) {
            return false;
        }
        if !self.grid.get(x, y).is_empty() {
            return true;
        }
        match &self.extra_occupied {
            Some(probe) => probe(x, y),
            None => false,
        }
    }

    /// Install the extra-occupancy strategy (wired by the orchestrator at
    /// composition time; the board never owns piece state)
    pub fn set_extra_occupied(&mut self, probe: OccupancyProbe) {
        self.extra_occupied = Some(probe);
    }

    /// Drain board notifications since the last call
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    fn is_row_full(&self, y: i32) -> bool {
        (0..self.width()).all(|x| !self.grid.get(x, y).is_empty())
    }

    fn clear_row(&mut self, y: i32) {
        for x in 0..self.width() {
            self.grid.set(x, y, Cell::EMPTY);
        }
    }

    /// Shift every row above `cleared_y` down by one; the top row empties
    fn drop_rows_above(&mut self, cleared_y: i32) {
        for y in cleared_y..self.height() - 1 {
            for x in 0..self.width() {
                let above = self.grid.get(x, y + 1);
                self.grid.set(x, y, above);
            }
        }
        self.clear_row(self.height() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockduel_types::PieceKind;
    use glam::IVec2;

    fn board() -> Board {
        Board::new(10, 20, 1.0, Vec2::ZERO)
    }

    fn fill_row(board: &mut Board, y: i32) {
        for x in 0..board.width() {
            board.grid_mut().set(x, y, Cell::block(1, 1));
        }
    }

    #[test]
    fn test_placement_rejects_side_and_floor_violations() {
        let b = board();

        // I piece north occupies (pos.x .. pos.x+3, pos.y+1)
        let mut piece = ActivePiece::new(PieceKind::I, IVec2::new(-1, 5), 1);
        assert!(!b.is_valid_placement(&piece));

        piece.pos = IVec2::new(7, 5);
        assert!(!b.is_valid_placement(&piece));

        piece.pos = IVec2::new(3, -2);
        assert!(!b.is_valid_placement(&piece));

        piece.pos = IVec2::new(3, 5);
        assert!(b.is_valid_placement(&piece));
    }

    #[test]
    fn test_placement_allows_poking_above_the_board() {
        let b = board();
        // Anchor near the top: all cells at y >= height
        let piece = ActivePiece::new(PieceKind::O, IVec2::new(4, 20), 1);
        assert!(b.is_valid_placement(&piece));
        assert!(b.can_spawn(&piece));
    }

    #[test]
    fn test_placement_rejects_overlap() {
        let mut b = board();
        b.grid_mut().set(4, 6, Cell::block(2, 1));

        let piece = ActivePiece::new(PieceKind::I, IVec2::new(3, 5), 1);
        assert!(!b.is_valid_placement(&piece));
    }

    #[test]
    fn test_place_writes_cell_identity_and_skips_off_grid_rows() {
        let mut b = board();
        let piece = ActivePiece::new(PieceKind::T, IVec2::new(4, 18), 3);
        b.place(&piece);

        // T north occupies (4,19),(5,19),(6,19),(5,20); the last is off-grid
        assert_eq!(b.cell(4, 19), Cell::block(PieceKind::T.cell_id(), 3));
        assert_eq!(b.cell(5, 19).kind, PieceKind::T.cell_id());
        assert_eq!(b.cell(6, 19).kind, PieceKind::T.cell_id());

        assert_eq!(b.take_events(), vec![BoardEvent::PiecePlaced]);
    }

    #[test]
    fn test_clear_lines_full_full_empty_full_compacts() {
        let mut b = board();
        // Bottom to top: full, full, empty, full
        fill_row(&mut b, 0);
        fill_row(&mut b, 1);
        fill_row(&mut b, 3);
        // A marker sitting on the sparse row 2
        b.grid_mut().set(4, 2, Cell::block(3, 2));

        assert_eq!(b.clear_lines(), 3);
        assert_eq!(b.take_events(), vec![BoardEvent::LinesCleared(3)]);

        // Only the marker survives, compacted to the floor
        assert_eq!(b.cell(4, 0), Cell::block(3, 2));
        for y in 0..b.height() {
            for x in 0..b.width() {
                if (x, y) != (4, 0) {
                    assert!(b.cell(x, y).is_empty(), "({}, {}) not empty", x, y);
                }
            }
        }

        // Nothing left to clear
        assert_eq!(b.clear_lines(), 0);
        assert!(b.take_events().is_empty());
    }

    #[test]
    fn test_clear_lines_collapses_stacked_full_rows() {
        let mut b = board();
        for y in 0..4 {
            fill_row(&mut b, y);
        }
        b.grid_mut().set(0, 4, Cell::block(5, 1));

        assert_eq!(b.clear_lines(), 4);
        assert_eq!(b.cell(0, 0), Cell::block(5, 1));
        assert!(b.cell(0, 4).is_empty());
    }

    #[test]
    fn test_partial_row_never_clears() {
        let mut b = board();
        for x in 0..9 {
            b.grid_mut().set(x, 0, Cell::block(1, 1));
        }
        assert_eq!(b.clear_lines(), 0);
        assert!(!b.cell(0, 0).is_empty());
    }

    #[test]
    fn test_damage_cell_semantics() {
        let mut b = board();

        // Empty cell: no-op
        assert!(!b.damage_cell(3, 3, 1));
        assert!(b.cell(3, 3).is_empty());

        // Armored cell: no-op
        b.grid_mut().set(4, 4, Cell::block(2, 0));
        assert!(!b.damage_cell(4, 4, 1));
        assert_eq!(b.cell(4, 4), Cell::block(2, 0));

        // Weak cell with 2 hp: survives one hit, dies on the second
        b.grid_mut().set(5, 5, Cell::block(3, 2));
        assert!(!b.damage_cell(5, 5, 1));
        assert_eq!(b.cell(5, 5), Cell::block(3, 1));
        assert!(b.damage_cell(5, 5, 1));
        assert!(b.cell(5, 5).is_empty());
    }

    #[test]
    fn test_damage_cell_overkill_destroys() {
        let mut b = board();
        b.grid_mut().set(1, 1, Cell::block(1, 2));
        assert!(b.damage_cell(1, 1, 5));
        assert!(b.cell(1, 1).is_empty());
    }

    #[test]
    fn test_is_occupied_merges_extra_predicate() {
        let mut b = board();
        b.grid_mut().set(2, 2, Cell::block(1, 1));

        assert!(b.is_occupied(2, 2));
        assert!(!b.is_occupied(6, 6));
        // Off-grid never reads occupied
        assert!(!b.is_occupied(-1, 0));

        b.set_extra_occupied(Box::new(|x, y| x == 6 && y == 6));
        assert!(b.is_occupied(6, 6));
        assert!(!b.is_occupied(6, 7));
        assert!(b.is_occupied(2, 2));
    }
}
