//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the simulation.
//! All types are pure data structures (plus serde derives for the snapshot
//! and event transport boundary), usable in any context: core logic,
//! rendering, headless tests.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (boards are sized at construction time):
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, **bottom to top** — y grows upward)
//! - **Spawn anchor**: `(width / 2 - 2, height - 4)`
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `FALL_INTERVAL_MS` | 1000 | Gravity: one row per second |
//! | `SOFT_DROP_DIVISOR` | 10 | Soft drop shortens the interval 10x |
//!
//! # Examples
//!
//! ```
//! use blockduel_types::{PieceKind, Rotation, PieceAction};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//! assert_eq!(piece.cell_id(), 3);
//!
//! let rotation = Rotation::North.rotate_cw();
//! assert_eq!(rotation, Rotation::East);
//!
//! let action = PieceAction::from_str("moveLeft").unwrap();
//! assert_eq!(action, PieceAction::MoveLeft);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const DEFAULT_BOARD_WIDTH: i32 = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_BOARD_HEIGHT: i32 = 20;

/// Default cell size in world units
pub const DEFAULT_CELL_SIZE: f32 = 1.0;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval: time until the active piece steps down one row
pub const FALL_INTERVAL_MS: u32 = 1000;

/// Soft drop divisor: holding soft drop divides the fall interval by this
pub const SOFT_DROP_DIVISOR: u32 = 10;

/// Hit points a freshly locked block starts with
pub const DEFAULT_BLOCK_HP: u8 = 3;

/// The seven tetromino piece kinds
///
/// Each kind has a distinct shape and a distinct cell identity (1-7):
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds, in cell-identity order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Number of distinct piece kinds
    pub const COUNT: u32 = 7;

    /// Kind from a zero-based index (0=I .. 6=L)
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Zero-based index of this kind (0=I .. 6=L)
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Identity written into board cells this kind produces (1-7; 0 is empty)
    pub fn cell_id(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Kind from a cell identity (1-7)
    pub fn from_cell_id(id: u8) -> Option<Self> {
        if id == 0 {
            return None;
        }
        Self::from_index(id as usize - 1)
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states (North = spawn orientation)
///
/// Every kind carries four states; the O piece's four states are
/// geometrically identical, so rotating it is a visual no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise
    pub fn rotate_ccw(self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Zero-based state index (North=0, East=1, South=2, West=3)
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// State from an index, wrapping modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Piece controller lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceState {
    Playing,
    Paused,
    GameOver,
}

/// Discrete piece actions (edge-triggered)
///
/// `SoftDrop` here is the immediate one-row nudge; the *held* soft-drop
/// modifier that shortens the gravity interval travels on
/// [`PieceInput::soft_drop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceAction {
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
    SoftDrop,
    HardDrop,
}

impl PieceAction {
    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(PieceAction::MoveLeft),
            "moveright" => Some(PieceAction::MoveRight),
            "rotatecw" => Some(PieceAction::RotateCw),
            "rotateccw" => Some(PieceAction::RotateCcw),
            "softdrop" => Some(PieceAction::SoftDrop),
            "harddrop" => Some(PieceAction::HardDrop),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceAction::MoveLeft => "moveLeft",
            PieceAction::MoveRight => "moveRight",
            PieceAction::RotateCw => "rotateCw",
            PieceAction::RotateCcw => "rotateCcw",
            PieceAction::SoftDrop => "softDrop",
            PieceAction::HardDrop => "hardDrop",
        }
    }
}

/// Per-tick input sample for the piece controller
///
/// Every field except `soft_drop` is an edge (true on the tick the key went
/// down); `soft_drop` is level-triggered (true while held).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceInput {
    pub move_left: bool,
    pub move_right: bool,
    pub rotate_cw: bool,
    pub rotate_ccw: bool,
    pub hard_drop: bool,
    pub soft_drop: bool,
}

/// Per-tick input sample for the character
///
/// `left`/`right` are level-triggered; `jump_pressed`/`jump_released` and
/// the attack fields are edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterInput {
    pub left: bool,
    pub right: bool,
    pub jump_pressed: bool,
    pub jump_released: bool,
    pub attack_left: bool,
    pub attack_right: bool,
}

impl CharacterInput {
    /// Horizontal input axis: -1.0, 0.0 or 1.0
    pub fn move_axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.left {
            axis -= 1.0;
        }
        if self.right {
            axis += 1.0;
        }
        axis
    }

    /// Attack direction edge: -1, 0 or +1
    pub fn attack_dir(&self) -> i32 {
        if self.attack_left {
            -1
        } else if self.attack_right {
            1
        } else {
            0
        }
    }
}

/// Notifications emitted by the board, drained by collaborators after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEvent {
    /// A piece was committed onto the board
    PiecePlaced,
    /// Full rows were cleared and the stack compacted
    LinesCleared(u32),
}

/// Notifications emitted by the piece controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerEvent {
    StateChanged(PieceState),
}

/// Notifications emitted by the character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterEvent {
    /// Melee strike aimed at a board cell; `dir` is -1 (left) or +1 (right)
    Attack { x: i32, y: i32, dir: i32 },
}
