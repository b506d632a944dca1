//! Active piece module - the mutable falling-piece state
//!
//! An `ActivePiece` lives from spawn to lock; the ghost projection is a
//! throwaway copy recomputed every tick, never persisted.

use glam::IVec2;

use blockduel_types::{PieceKind, Rotation};

use crate::pieces::shape;

/// The currently falling piece: kind, rotation state, anchor cell, and
/// remaining hit points for the weak (damageable) variant
///
/// `hp == 0` marks an armored piece whose locked blocks cannot be damaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub pos: IVec2,
    pub hp: u8,
}

impl ActivePiece {
    /// Create a piece at its spawn anchor
    pub fn new(kind: PieceKind, pos: IVec2, hp: u8) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            pos,
            hp,
        }
    }

    /// Whether locked blocks of this piece will be damageable
    pub fn is_weak(&self) -> bool {
        self.hp > 0
    }

    /// Absolute board cells occupied by the piece (always exactly 4)
    pub fn cells(&self) -> [IVec2; 4] {
        let offsets = shape(self.kind, self.rotation);
        offsets.map(|(dx, dy)| self.pos + IVec2::new(dx, dy))
    }

    /// Whether the piece occupies the given board cell
    pub fn occupies(&self, x: i32, y: i32) -> bool {
        self.cells().contains(&IVec2::new(x, y))
    }

    /// Translate the anchor by a cell delta
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.pos += IVec2::new(dx, dy);
    }

    /// Step the rotation state; `clockwise = false` rotates the other way
    pub fn rotate(&mut self, clockwise: bool) {
        self.rotation = if clockwise {
            self.rotation.rotate_cw()
        } else {
            self.rotation.rotate_ccw()
        };
    }
}
