//! Pieces module - tetromino shape geometry
//!
//! Static offset tables for the 7 piece kinds x 4 rotation states x 4
//! occupied cells. Offsets are relative to the piece anchor with y growing
//! upward, matching the board's bottom-up row order. There is no kick
//! search here: a rotation either fits at the anchor or is reverted by the
//! controller.

use blockduel_types::{PieceKind, Rotation};

/// Offset of a single cell relative to the piece anchor
pub type CellOffset = (i32, i32);

/// Shape of a piece - 4 cell offsets from the anchor
pub type PieceShape = [CellOffset; 4];

/// Get the shape for a piece kind and rotation state
pub fn shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => i_shape(rotation),
        PieceKind::O => o_shape(rotation),
        PieceKind::T => t_shape(rotation),
        PieceKind::S => s_shape(rotation),
        PieceKind::Z => z_shape(rotation),
        PieceKind::J => j_shape(rotation),
        PieceKind::L => l_shape(rotation),
    }
}

/// I piece shapes
fn i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 1), (1, 1), (2, 1), (3, 1)],
        Rotation::East => [(2, 0), (2, 1), (2, 2), (2, 3)],
        Rotation::South => [(0, 2), (1, 2), (2, 2), (3, 2)],
        Rotation::West => [(1, 0), (1, 1), (1, 2), (1, 3)],
    }
}

/// O piece shapes (all four states are the same square)
fn o_shape(_rotation: Rotation) -> PieceShape {
    [(1, 0), (2, 0), (1, 1), (2, 1)]
}

/// T piece shapes
fn t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 1), (1, 1), (2, 1), (1, 2)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 1)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 0)],
        Rotation::West => [(1, 0), (1, 1), (1, 2), (0, 1)],
    }
}

/// S piece shapes (two distinct silhouettes)
fn s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North | Rotation::South => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::East | Rotation::West => [(1, 1), (1, 2), (2, 0), (2, 1)],
    }
}

/// Z piece shapes (two distinct silhouettes)
fn z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North | Rotation::South => [(0, 1), (1, 0), (1, 1), (2, 0)],
        Rotation::East | Rotation::West => [(1, 0), (1, 1), (2, 1), (2, 2)],
    }
}

/// J piece shapes
fn j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 1), (0, 2), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 0), (2, 1)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// L piece shapes
fn l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 0)],
        Rotation::South => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::West => [(0, 2), (1, 0), (1, 1), (1, 2)],
    }
}
