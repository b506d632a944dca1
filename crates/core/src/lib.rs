//! Core simulation logic - pure, deterministic, and testable
//!
//! Two subsystems compete over one shared grid: a falling-block puzzle
//! (board + piece controller) and a kinematic platformer character. This
//! crate holds the whole simulation and nothing else - no rendering, no
//! input devices, no I/O - so it runs identically in a game loop, a
//! headless test, or a bench.
//!
//! # Module Structure
//!
//! - [`grid`]: generic fixed-size 2D grid with world/cell mapping
//! - [`board`]: the playfield - placement rules, line clears, cell damage
//! - [`pieces`]: tetromino shape geometry (7 kinds x 4 rotation states)
//! - [`piece`]: the mutable falling-piece state
//! - [`controller`]: spawn/fall/lock state machine and ghost projection
//! - [`character`]: AABB-vs-grid kinematics (coyote time, wall jumps)
//! - [`rng`]: deterministic LCG piece randomization
//! - [`snapshot`]: serializable captures for renderers and UI
//!
//! # Tick Order
//!
//! The simulation is single-threaded and cooperative; an external driver
//! advances it in discrete steps. Per tick, the order is fixed:
//!
//! 1. `controller.tick(&mut board, elapsed_ms, &piece_input)` - board
//!    mutations (lock, line clears) complete here;
//! 2. refresh the board's extra-occupancy source from
//!    `controller.active_cells()` (the predicate installed via
//!    [`board::Board::set_extra_occupied`]);
//! 3. `character.tick(&board, dt, &character_input)` - collision sampling
//!    reads the fully settled board;
//! 4. drain events (`take_events` on each component, `take_changes` on the
//!    grid) and hand them to collaborators.
//!
//! The board is the only shared state: the controller is its sole writer,
//! the character a read-only observer, and neither calls the other.
//!
//! # Example
//!
//! ```
//! use blockduel_core::{Board, PieceController, PieceControllerConfig};
//! use blockduel_types::{PieceAction, PieceInput};
//! use glam::Vec2;
//!
//! let mut board = Board::new(10, 20, 1.0, Vec2::ZERO);
//! let mut controller = PieceController::new(PieceControllerConfig::default(), 12345);
//! controller.start(&board);
//!
//! controller.apply_action(&mut board, PieceAction::MoveRight);
//! controller.apply_action(&mut board, PieceAction::HardDrop);
//! controller.tick(&mut board, 16, &PieceInput::default());
//!
//! assert!(controller.active().is_some());
//! ```

pub use glam;

pub mod board;
pub mod character;
pub mod controller;
pub mod grid;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use board::{Board, Cell, OccupancyProbe};
pub use character::{CharacterKinematics, CharacterTuning};
pub use controller::{PieceController, PieceControllerConfig};
pub use grid::{Grid, GridChange};
pub use piece::ActivePiece;
pub use pieces::{shape, CellOffset, PieceShape};
pub use rng::SimpleRng;
pub use snapshot::{CharacterSnapshot, GameSnapshot, PieceSnapshot};
