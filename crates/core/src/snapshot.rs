//! Snapshot module - read-only state captures for collaborators
//!
//! Renderers and UI read the simulation through these serializable
//! captures instead of reaching into live components mid-tick.

use serde::{Deserialize, Serialize};

use blockduel_types::{PieceKind, PieceState, Rotation};

use crate::board::Board;
use crate::character::CharacterKinematics;
use crate::controller::PieceController;
use crate::piece::ActivePiece;

/// Snapshot of one piece (active or ghost)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
    pub hp: u8,
}

impl From<ActivePiece> for PieceSnapshot {
    fn from(piece: ActivePiece) -> Self {
        Self {
            kind: piece.kind,
            rotation: piece.rotation,
            x: piece.pos.x,
            y: piece.pos.y,
            hp: piece.hp,
        }
    }
}

/// Snapshot of the board and piece-controller side of the simulation
///
/// `board` holds cell identities (0 = empty, 1-7 = piece kind), rows
/// bottom to top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: i32,
    pub height: i32,
    pub board: Vec<Vec<u8>>,
    pub active: Option<PieceSnapshot>,
    pub ghost: Option<PieceSnapshot>,
    pub state: PieceState,
}

impl GameSnapshot {
    /// Capture the board and controller as one consistent view
    pub fn capture(board: &Board, controller: &PieceController) -> Self {
        let rows = (0..board.height())
            .map(|y| (0..board.width()).map(|x| board.cell(x, y).kind).collect())
            .collect();

        Self {
            width: board.width(),
            height: board.height(),
            board: rows,
            active: controller.active().map(PieceSnapshot::from),
            ghost: controller.ghost().map(PieceSnapshot::from),
            state: controller.state(),
        }
    }
}

/// Snapshot of the character for the animation/rendering boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub grounded: bool,
    pub wall_sliding: bool,
    pub facing: i32,
}

impl CharacterSnapshot {
    pub fn capture(character: &CharacterKinematics) -> Self {
        Self {
            x: character.position().x,
            y: character.position().y,
            vx: character.velocity().x,
            vy: character.velocity().y,
            grounded: character.is_grounded(),
            wall_sliding: character.is_wall_sliding(),
            facing: character.facing(),
        }
    }
}
