//! Piece controller module - the falling-piece state machine
//!
//! Drives spawn, gravity timing, input resolution, locking and the ghost
//! projection over a borrowed [`Board`]. The controller never owns the
//! board: the driver passes it in each call so the character (and the
//! injected occupancy predicate) can read the very same board between
//! controller ticks.
//!
//! States are `Playing`, `Paused` and `GameOver`. The only transition the
//! controller takes on its own is `Playing -> GameOver` when a freshly
//! spawned piece has no room; pause/resume/game-over are otherwise explicit
//! external calls. Everything per-tick is a no-op outside `Playing`.
//!
//! Every rejected action (blocked move, impossible rotation) resolves to
//! "no state change" by applying the exact inverse delta - illegal moves
//! are normal gameplay here, not errors.

use glam::IVec2;
use tracing::debug;

use blockduel_types::{
    ControllerEvent, PieceAction, PieceInput, PieceState, DEFAULT_BLOCK_HP, FALL_INTERVAL_MS,
    SOFT_DROP_DIVISOR,
};

use crate::board::Board;
use crate::piece::ActivePiece;
use crate::rng::SimpleRng;

/// Controller tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceControllerConfig {
    /// Time between gravity steps
    pub fall_interval_ms: u32,
    /// Holding soft drop divides the fall interval by this
    pub soft_drop_divisor: u32,
    /// Hit points of blocks locked from spawned pieces (0 = armored)
    pub block_hp: u8,
}

impl Default for PieceControllerConfig {
    fn default() -> Self {
        Self {
            fall_interval_ms: FALL_INTERVAL_MS,
            soft_drop_divisor: SOFT_DROP_DIVISOR,
            block_hp: DEFAULT_BLOCK_HP,
        }
    }
}

/// The falling-piece state machine
#[derive(Debug, Clone)]
pub struct PieceController {
    config: PieceControllerConfig,
    state: PieceState,
    active: Option<ActivePiece>,
    ghost: Option<ActivePiece>,
    rng: SimpleRng,
    fall_timer_ms: u32,
    events: Vec<ControllerEvent>,
}

impl PieceController {
    /// Create a controller; call [`start`](Self::start) to spawn the first
    /// piece
    pub fn new(config: PieceControllerConfig, seed: u32) -> Self {
        Self {
            config,
            state: PieceState::Playing,
            active: None,
            ghost: None,
            rng: SimpleRng::new(seed),
            fall_timer_ms: 0,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> PieceState {
        self.state
    }

    /// The falling piece, if one is current
    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Where the falling piece would land (recomputed every tick)
    pub fn ghost(&self) -> Option<ActivePiece> {
        self.ghost
    }

    pub fn config(&self) -> PieceControllerConfig {
        self.config
    }

    /// Drain controller notifications since the last call
    pub fn take_events(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn the first piece
    pub fn start(&mut self, board: &Board) {
        if self.active.is_none() && self.state == PieceState::Playing {
            self.spawn(board);
            self.update_ghost(board);
        }
    }

    /// Advance the controller by `elapsed_ms`
    ///
    /// Discrete input edges are resolved immediately, then the fall timer
    /// accumulates against the (possibly soft-drop shortened) interval; an
    /// expiry steps the piece down one row, locking it when the step is
    /// blocked.
    pub fn tick(&mut self, board: &mut Board, elapsed_ms: u32, input: &PieceInput) {
        if self.state != PieceState::Playing {
            return;
        }

        if input.move_left {
            self.try_move(board, -1, 0);
        }
        if input.move_right {
            self.try_move(board, 1, 0);
        }
        if input.rotate_cw {
            self.try_rotate(board, true);
        }
        if input.rotate_ccw {
            self.try_rotate(board, false);
        }
        if input.hard_drop {
            self.hard_drop(board);
        }

        let interval = if input.soft_drop {
            (self.config.fall_interval_ms / self.config.soft_drop_divisor).max(1)
        } else {
            self.config.fall_interval_ms
        };

        self.fall_timer_ms += elapsed_ms;
        if self.fall_timer_ms >= interval {
            self.fall_timer_ms = 0;
            self.step_down(board);
        }

        self.update_ghost(board);
    }

    /// Apply a single discrete action (scripted control, tests)
    ///
    /// Returns whether the action changed anything.
    pub fn apply_action(&mut self, board: &mut Board, action: PieceAction) -> bool {
        if self.state != PieceState::Playing {
            return false;
        }
        let applied = match action {
            PieceAction::MoveLeft => self.try_move(board, -1, 0),
            PieceAction::MoveRight => self.try_move(board, 1, 0),
            PieceAction::RotateCw => self.try_rotate(board, true),
            PieceAction::RotateCcw => self.try_rotate(board, false),
            PieceAction::SoftDrop => self.try_move(board, 0, -1),
            PieceAction::HardDrop => {
                if self.active.is_some() {
                    self.hard_drop(board);
                    true
                } else {
                    false
                }
            }
        };
        self.update_ghost(board);
        applied
    }

    /// Pause gameplay (explicit external transition)
    pub fn pause(&mut self) {
        if self.state == PieceState::Playing {
            self.set_state(PieceState::Paused);
        }
    }

    /// Resume from pause
    pub fn resume(&mut self) {
        if self.state == PieceState::Paused {
            self.set_state(PieceState::Playing);
        }
    }

    /// Force the terminal state (used by the orchestrator on win/lose)
    pub fn set_game_over(&mut self) {
        self.set_state(PieceState::GameOver);
    }

    /// Whether the still-falling piece occupies (x, y)
    ///
    /// This is what the orchestrator feeds the board's extra-occupancy
    /// predicate with.
    pub fn is_cell_of_active_piece(&self, x: i32, y: i32) -> bool {
        match &self.active {
            Some(piece) => piece.occupies(x, y),
            None => false,
        }
    }

    /// Cells of the falling piece, if one is current
    pub fn active_cells(&self) -> Option<[IVec2; 4]> {
        self.active.map(|piece| piece.cells())
    }

    /// Translate the piece, reverting on an invalid result
    fn try_move(&mut self, board: &Board, dx: i32, dy: i32) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        piece.translate(dx, dy);
        if board.is_valid_placement(piece) {
            return true;
        }
        piece.translate(-dx, -dy);
        false
    }

    /// Rotate the piece, reverting on an invalid result
    ///
    /// No kick search: a rotation that only fits displaced is rejected.
    fn try_rotate(&mut self, board: &Board, clockwise: bool) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        piece.rotate(clockwise);
        if board.is_valid_placement(piece) {
            return true;
        }
        piece.rotate(!clockwise);
        false
    }

    /// One gravity step; a blocked step locks the piece
    fn step_down(&mut self, board: &mut Board) {
        if self.active.is_none() {
            return;
        }
        if !self.try_move(board, 0, -1) {
            self.lock(board);
        }
    }

    /// Drop the piece onto the stack and lock immediately
    ///
    /// Returns the number of rows dropped. The landing row matches what
    /// repeated soft drops would reach: the same descent simulation the
    /// ghost uses runs on the real piece.
    pub fn hard_drop(&mut self, board: &mut Board) -> u32 {
        let Some(piece) = self.active.as_mut() else {
            return 0;
        };

        let mut distance = 0;
        loop {
            piece.translate(0, -1);
            if board.is_valid_placement(piece) {
                distance += 1;
            } else {
                piece.translate(0, 1);
                break;
            }
        }
        self.lock(board);
        distance
    }

    /// Commit the piece: place, clear lines, spawn the next
    fn lock(&mut self, board: &mut Board) {
        let Some(piece) = self.active.take() else {
            return;
        };

        board.place(&piece);
        board.clear_lines();
        self.spawn(board);
    }

    /// Spawn a uniformly random piece at the fixed spawn anchor
    ///
    /// A spawn with no room is the terminal condition: the state flips to
    /// `GameOver` and no piece is made current.
    fn spawn(&mut self, board: &Board) {
        let kind = self.rng.next_piece_kind();
        let anchor = IVec2::new(board.width() / 2 - 2, board.height() - 4);
        let piece = ActivePiece::new(kind, anchor, self.config.block_hp);

        if !board.can_spawn(&piece) {
            debug!(kind = kind.as_str(), "spawn blocked, game over");
            self.active = None;
            self.set_state(PieceState::GameOver);
            return;
        }

        debug!(kind = kind.as_str(), x = anchor.x, y = anchor.y, "piece spawned");
        self.active = Some(piece);
        self.fall_timer_ms = 0;
    }

    /// Recompute the ghost: copy the piece, run the descent simulation,
    /// step back up one row
    fn update_ghost(&mut self, board: &Board) {
        self.ghost = self.active.map(|piece| {
            let mut ghost = piece;
            while board.is_valid_placement(&ghost) {
                ghost.translate(0, -1);
            }
            ghost.translate(0, 1);
            ghost
        });
    }

    fn set_state(&mut self, next: PieceState) {
        if self.state != next {
            debug!(?next, "piece state changed");
            self.state = next;
            self.events.push(ControllerEvent::StateChanged(next));
        }
    }
}
