//! Spatial grid module - generic fixed-size 2D cell storage
//!
//! The grid is a dense `width x height` array of cell values with a
//! world-space anchor, used by both the board and the character collision
//! code. Coordinates are y-up: cell (0, 0) sits at the bottom-left, and
//! `origin` is the world position of that cell's lower-left corner.
//!
//! Out-of-range reads return the default value and out-of-range writes are
//! no-ops; nothing here errors. Mutations are recorded in a change queue
//! drained by collaborators (renderers) after each tick.

use glam::{IVec2, Vec2};

/// A single recorded cell mutation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridChange<T> {
    pub x: i32,
    pub y: i32,
    pub value: T,
}

/// Fixed-size 2D grid with world/cell coordinate mapping
///
/// Storage is a flat row-major `Vec` (index `y * width + x`) for cache
/// locality. Dimensions are immutable after construction.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    width: i32,
    height: i32,
    cell_size: f32,
    origin: Vec2,
    cells: Vec<T>,
    changes: Vec<GridChange<T>>,
}

impl<T: Copy + Default> Grid<T> {
    /// Create a grid filled with the default value
    pub fn new(width: i32, height: i32, cell_size: f32, origin: Vec2) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            width,
            height,
            cell_size,
            origin,
            cells: vec![T::default(); (width * height) as usize],
            changes: Vec::new(),
        }
    }

    /// Grid width in cells
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Edge length of one cell in world units
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World position of cell (0, 0)'s lower-left corner
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Flat index for (x, y), `None` when out of range
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// Bounds check
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Read cell (x, y); out-of-range reads yield the default value
    pub fn get(&self, x: i32, y: i32) -> T {
        match self.index(x, y) {
            Some(idx) => self.cells[idx],
            None => T::default(),
        }
    }

    /// Write cell (x, y) and record the change
    ///
    /// Out-of-range writes are silently dropped.
    pub fn set(&mut self, x: i32, y: i32, value: T) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        self.cells[idx] = value;
        self.changes.push(GridChange { x, y, value });
    }

    /// Drain recorded cell changes since the last call
    pub fn take_changes(&mut self) -> Vec<GridChange<T>> {
        std::mem::take(&mut self.changes)
    }

    /// Cell containing a world position
    ///
    /// Floors toward negative infinity per axis, so world points left of or
    /// below the origin map to negative cell indices rather than clustering
    /// at zero. Collision resolution at the board's left edge depends on
    /// this.
    pub fn world_to_cell(&self, world: Vec2) -> IVec2 {
        IVec2::new(
            ((world.x - self.origin.x) / self.cell_size).floor() as i32,
            ((world.y - self.origin.y) / self.cell_size).floor() as i32,
        )
    }

    /// World position of cell (x, y)'s lower-left corner
    ///
    /// Pure arithmetic: no bounds check, so collision code may ask for the
    /// boundary one past the last column/row when snapping.
    pub fn cell_origin(&self, x: i32, y: i32) -> Vec2 {
        self.origin + Vec2::new(x as f32 * self.cell_size, y as f32 * self.cell_size)
    }

    /// World position of cell (x, y)'s center
    pub fn cell_center(&self, x: i32, y: i32) -> Vec2 {
        self.cell_origin(x, y) + Vec2::splat(self.cell_size * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid<u8> {
        Grid::new(10, 20, 1.0, Vec2::ZERO)
    }

    #[test]
    fn test_get_out_of_range_is_default() {
        let g = grid();
        assert_eq!(g.get(-1, 0), 0);
        assert_eq!(g.get(0, -1), 0);
        assert_eq!(g.get(10, 0), 0);
        assert_eq!(g.get(0, 20), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut g = grid();
        g.set(3, 7, 5);
        assert_eq!(g.get(3, 7), 5);

        // Out-of-range writes are dropped
        g.set(-1, 0, 9);
        g.set(10, 0, 9);
        assert_eq!(g.get(0, 0), 0);
    }

    #[test]
    fn test_change_queue_records_valid_writes_only() {
        let mut g = grid();
        g.set(1, 2, 3);
        g.set(-1, 0, 9);
        g.set(4, 5, 6);

        let changes = g.take_changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0], GridChange { x: 1, y: 2, value: 3 });
        assert_eq!(changes[1], GridChange { x: 4, y: 5, value: 6 });

        // Drained
        assert!(g.take_changes().is_empty());
    }

    #[test]
    fn test_world_cell_roundtrip() {
        let g = Grid::<u8>::new(10, 20, 0.5, Vec2::new(-2.0, 1.0));
        for y in 0..20 {
            for x in 0..10 {
                assert_eq!(g.world_to_cell(g.cell_center(x, y)), IVec2::new(x, y));
            }
        }
    }

    #[test]
    fn test_world_to_cell_floors_toward_negative_infinity() {
        let g = grid();
        assert_eq!(g.world_to_cell(Vec2::new(-0.001, 0.5)), IVec2::new(-1, 0));
        assert_eq!(g.world_to_cell(Vec2::new(0.5, -0.001)), IVec2::new(0, -1));
        assert_eq!(g.world_to_cell(Vec2::new(-1.5, -1.5)), IVec2::new(-2, -2));
    }

    #[test]
    fn test_cell_origin_allows_one_past_edge() {
        let g = grid();
        assert_eq!(g.cell_origin(10, 0).x, 10.0);
        assert_eq!(g.cell_origin(0, 20).y, 20.0);
    }
}
