//! Character module - kinematic platformer actor on the board grid
//!
//! A single actor with custom AABB-vs-grid physics: no rigid body, no
//! restitution, just per-tick integration against board occupancy. The
//! board is read-only here; the only thing the character emits is its
//! melee-attack target, drained as events.
//!
//! Per-tick stage order is fixed, each stage feeding the next:
//! attack resolution, horizontal velocity easing, jump resolution (coyote
//! time, jump buffer, variable height, wall jump), gravity, then position
//! integration with axis-separated collision (horizontal first, vertical
//! second) snapping onto cell boundaries.
//!
//! The actor's position is the bottom-center of its collider, in world
//! units.

use glam::Vec2;
use tracing::debug;

use blockduel_types::{CharacterEvent, CharacterInput};

use crate::board::Board;

/// Gap kept between the collider and a snapped surface, in world units.
/// Keeps the resolved edge out of the cell it just collided with.
const SKIN: f32 = 0.002;

/// Heights along the collider (as fractions) sampled for wall contact
const WALL_SAMPLES: [f32; 2] = [0.25, 0.75];

/// Inward pull on the outer floor/ceiling samples, avoiding false contacts
/// while straddling a cell edge
const EDGE_SAMPLE_INSET: f32 = 0.9;

/// Movement and feel tuning; defaults give a tight, Celeste-style handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterTuning {
    /// Top horizontal speed, world units/s
    pub max_speed: f32,
    /// Acceleration toward the input direction, world units/s^2
    pub acceleration: f32,
    /// Deceleration toward rest with no input, world units/s^2
    pub deceleration: f32,
    /// Initial upward velocity of a jump
    pub jump_force: f32,
    /// Gravity, negative is down
    pub gravity: f32,
    /// Grace window after leaving the ground during which a jump still fires
    pub coyote_time: f32,
    /// Grace window during which an early jump press stays buffered
    pub jump_buffer_time: f32,
    /// Factor applied to upward velocity when the jump key is released early
    pub variable_jump_mult: f32,
    /// Gravity factor while wall-sliding and falling
    pub wall_slide_gravity_mult: f32,
    /// Wall jump impulse; x pushes away from the wall
    pub wall_jump_force: Vec2,
    /// Horizontal control lockout after a wall jump
    pub wall_jump_lock_time: f32,
    /// Minimum time between melee attacks
    pub attack_cooldown: f32,
    /// Collider width, in cells
    pub collider_width_cells: f32,
    /// Collider height, in cells
    pub collider_height_cells: f32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            max_speed: 6.0,
            acceleration: 40.0,
            deceleration: 50.0,
            jump_force: 12.0,
            gravity: -30.0,
            coyote_time: 0.12,
            jump_buffer_time: 0.12,
            variable_jump_mult: 0.45,
            wall_slide_gravity_mult: 0.3,
            wall_jump_force: Vec2::new(8.0, 12.0),
            wall_jump_lock_time: 0.15,
            attack_cooldown: 0.3,
            collider_width_cells: 0.8,
            collider_height_cells: 1.8,
        }
    }
}

/// Kinematic state of the platformer actor
#[derive(Debug, Clone)]
pub struct CharacterKinematics {
    tuning: CharacterTuning,
    pos: Vec2,
    vel: Vec2,
    grounded: bool,
    wall_sliding: bool,
    wall_dir: i32,
    facing: i32,
    coyote_timer: f32,
    jump_buffer_timer: f32,
    wall_jump_lock_timer: f32,
    attack_cooldown_timer: f32,
    events: Vec<CharacterEvent>,
}

impl CharacterKinematics {
    /// Create an actor at a world position (bottom-center of the collider)
    pub fn new(tuning: CharacterTuning, pos: Vec2) -> Self {
        Self {
            tuning,
            pos,
            vel: Vec2::ZERO,
            grounded: false,
            wall_sliding: false,
            wall_dir: 0,
            facing: 1,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.0,
            wall_jump_lock_timer: 0.0,
            attack_cooldown_timer: 0.0,
            events: Vec::new(),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    /// Teleport the actor (spawn placement by the orchestrator)
    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_wall_sliding(&self) -> bool {
        self.wall_sliding
    }

    /// Wall contact direction while sliding: +1 wall on the right, -1 left
    pub fn wall_dir(&self) -> i32 {
        self.wall_dir
    }

    /// Facing direction, +1 right / -1 left (animation output)
    pub fn facing(&self) -> i32 {
        self.facing
    }

    pub fn tuning(&self) -> CharacterTuning {
        self.tuning
    }

    /// Drain character notifications since the last call
    pub fn take_events(&mut self) -> Vec<CharacterEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the actor by `dt` seconds against the live board
    pub fn tick(&mut self, board: &Board, dt: f32, input: &CharacterInput) {
        self.attack_cooldown_timer -= dt;
        self.wall_jump_lock_timer -= dt;

        self.handle_attack(board, input);
        self.handle_horizontal(dt, input);
        self.handle_jump(dt, input);
        self.apply_gravity(dt);
        self.move_and_collide(board, dt);

        if self.vel.x > 0.0 {
            self.facing = 1;
        } else if self.vel.x < 0.0 {
            self.facing = -1;
        }
    }

    /// Resolve an attack press into a target-cell event, cooldown permitting
    ///
    /// Presses during the cooldown are dropped, not queued.
    fn handle_attack(&mut self, board: &Board, input: &CharacterInput) {
        if self.attack_cooldown_timer > 0.0 {
            return;
        }
        let dir = input.attack_dir();
        if dir == 0 {
            return;
        }

        self.attack_cooldown_timer = self.tuning.attack_cooldown;
        let cell = board.grid().world_to_cell(self.pos);
        debug!(x = cell.x + dir, y = cell.y, dir, "attack");
        self.events.push(CharacterEvent::Attack {
            x: cell.x + dir,
            y: cell.y,
            dir,
        });
    }

    /// Ease horizontal velocity toward the input direction
    ///
    /// Locked out right after a wall jump so the impulse away from the wall
    /// is not immediately steered back.
    fn handle_horizontal(&mut self, dt: f32, input: &CharacterInput) {
        if self.wall_jump_lock_timer > 0.0 {
            return;
        }

        let axis = input.move_axis();
        if axis != 0.0 {
            self.vel.x = move_towards(
                self.vel.x,
                axis * self.tuning.max_speed,
                self.tuning.acceleration * dt,
            );
        } else {
            self.vel.x = move_towards(self.vel.x, 0.0, self.tuning.deceleration * dt);
        }
    }

    /// Coyote time, jump buffering, variable height, wall jump
    fn handle_jump(&mut self, dt: f32, input: &CharacterInput) {
        if self.grounded {
            self.coyote_timer = self.tuning.coyote_time;
        } else {
            self.coyote_timer -= dt;
        }

        if input.jump_pressed {
            self.jump_buffer_timer = self.tuning.jump_buffer_time;
        } else {
            self.jump_buffer_timer -= dt;
        }

        // Variable jump: releasing early trims the ascent
        if input.jump_released && self.vel.y > 0.0 {
            self.vel.y *= self.tuning.variable_jump_mult;
        }

        if self.jump_buffer_timer > 0.0 {
            if self.wall_sliding {
                // Push away from the wall and briefly lock steering
                self.vel.x = -self.wall_dir as f32 * self.tuning.wall_jump_force.x;
                self.vel.y = self.tuning.wall_jump_force.y;
                self.wall_jump_lock_timer = self.tuning.wall_jump_lock_time;
                self.coyote_timer = 0.0;
                self.jump_buffer_timer = 0.0;
                self.grounded = false;
                self.wall_sliding = false;
                debug!(dir = -self.wall_dir, "wall jump");
            } else if self.coyote_timer > 0.0 {
                self.vel.y = self.tuning.jump_force;
                self.coyote_timer = 0.0;
                self.jump_buffer_timer = 0.0;
                self.grounded = false;
            }
            // Neither condition: the request stays buffered until it expires
        }
    }

    fn apply_gravity(&mut self, dt: f32) {
        let mut gravity = self.tuning.gravity;
        if self.wall_sliding && self.vel.y < 0.0 {
            gravity *= self.tuning.wall_slide_gravity_mult;
        }
        self.vel.y += gravity * dt;
    }

    /// Integrate position with axis-separated collision resolution
    ///
    /// Horizontal displacement resolves first (two samples along the
    /// leading edge, snap to the cell boundary, wall-slide detection), then
    /// vertical (three samples along the bottom or top edge, floor clamp at
    /// the board's bottom), then the position is clamped inside the board's
    /// side walls.
    fn move_and_collide(&mut self, board: &Board, dt: f32) {
        let grid = board.grid();
        let cell_size = grid.cell_size();
        let half_w = self.tuning.collider_width_cells * cell_size * 0.5;
        let height = self.tuning.collider_height_cells * cell_size;
        let mut pos = self.pos;

        pos.x += self.vel.x * dt;
        self.wall_sliding = false;
        self.wall_dir = 0;

        if self.vel.x > 0.0 {
            if let Some(cell_x) = self.sample_wall(board, pos.x + half_w, pos.y, height) {
                pos.x = grid.cell_origin(cell_x, 0).x - half_w - SKIN;
                self.vel.x = 0.0;
                if !self.grounded && self.vel.y < 0.0 {
                    self.wall_sliding = true;
                    self.wall_dir = 1;
                }
            }
        } else if self.vel.x < 0.0 {
            if let Some(cell_x) = self.sample_wall(board, pos.x - half_w, pos.y, height) {
                pos.x = grid.cell_origin(cell_x + 1, 0).x + half_w + SKIN;
                self.vel.x = 0.0;
                if !self.grounded && self.vel.y < 0.0 {
                    self.wall_sliding = true;
                    self.wall_dir = -1;
                }
            }
        }

        pos.y += self.vel.y * dt;
        self.grounded = false;

        if self.vel.y <= 0.0 {
            let floor_y = grid.origin().y;
            if pos.y <= floor_y {
                // The board's bottom edge is always solid
                pos.y = floor_y;
                self.vel.y = 0.0;
                self.grounded = true;
            } else if let Some(cell_y) = self.sample_floor(board, pos.x, pos.y, half_w) {
                pos.y = grid.cell_origin(0, cell_y + 1).y;
                self.vel.y = 0.0;
                self.grounded = true;
            }
        } else if let Some(cell_y) = self.sample_ceiling(board, pos.x, pos.y + height, half_w) {
            pos.y = grid.cell_origin(0, cell_y).y - height - SKIN;
            self.vel.y = 0.0;
        }

        // The board's side walls cap horizontal travel no matter what the
        // cell samples said
        let left = grid.cell_origin(0, 0).x + half_w;
        let right = grid.cell_origin(grid.width(), 0).x - half_w;
        pos.x = pos.x.clamp(left, right);

        self.pos = pos;
    }

    /// Probe a vertical edge at `edge_x` for solid cells; returns the cell
    /// column hit
    fn sample_wall(&self, board: &Board, edge_x: f32, bottom_y: f32, height: f32) -> Option<i32> {
        let grid = board.grid();
        for t in WALL_SAMPLES {
            let probe = Vec2::new(edge_x, bottom_y + height * t);
            let cell = grid.world_to_cell(probe);
            if grid.is_valid(cell.x, cell.y) && board.is_occupied(cell.x, cell.y) {
                return Some(cell.x);
            }
        }
        None
    }

    /// Probe under the bottom edge for solid cells; returns the cell row hit
    fn sample_floor(&self, board: &Board, center_x: f32, bottom_y: f32, half_w: f32) -> Option<i32> {
        let grid = board.grid();
        let probe_y = bottom_y - SKIN;
        for probe_x in [
            center_x - half_w * EDGE_SAMPLE_INSET,
            center_x,
            center_x + half_w * EDGE_SAMPLE_INSET,
        ] {
            let cell = grid.world_to_cell(Vec2::new(probe_x, probe_y));
            if grid.is_valid(cell.x, cell.y) && board.is_occupied(cell.x, cell.y) {
                return Some(cell.y);
            }
        }
        None
    }

    /// Probe above the top edge for solid cells; returns the cell row hit
    fn sample_ceiling(&self, board: &Board, center_x: f32, top_y: f32, half_w: f32) -> Option<i32> {
        let grid = board.grid();
        let probe_y = top_y + SKIN;
        for probe_x in [
            center_x - half_w * EDGE_SAMPLE_INSET,
            center_x,
            center_x + half_w * EDGE_SAMPLE_INSET,
        ] {
            let cell = grid.world_to_cell(Vec2::new(probe_x, probe_y));
            if grid.is_valid(cell.x, cell.y) && board.is_occupied(cell.x, cell.y) {
                return Some(cell.y);
            }
        }
        None
    }
}

/// Step `current` toward `target` by at most `max_delta`
fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + max_delta.copysign(delta)
    }
}
