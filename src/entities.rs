/// Game entity types: pure data plus a few rectangle helpers.

use crate::config::{
    ACTOR_HEIGHT, ACTOR_START_X, ACTOR_START_Y, ACTOR_WIDTH, SCREEN_WIDTH, TERRAIN_HEIGHT,
    TERRAIN_WIDTH, TERRAIN_Y,
};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world units. `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// True when the interiors overlap; touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

// ── Screen flow ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Title screen, actor bobbing in place.
    Start,
    Playing,
    /// The actor has landed; waiting for a click to go back to `Start`.
    Dead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backdrop {
    Day,
    Night,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleSkin {
    Green,
    Red,
}

// ── Actor ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    pub rect: Rect,
    /// Vertical velocity, positive = downward.
    pub velocity: f32,
    pub alive: bool,
    /// Degrees, counter-clockwise positive.
    pub rotation: f32,
    pub frame: usize,
    pub anim_counter: u32,
    /// Set while the jump input is held after triggering a jump.
    pub jump_latched: bool,
    /// Idle bobbing offset and direction used on the start screen.
    pub bob_offset: i32,
    pub bob_step: i32,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            rect: Rect::new(ACTOR_START_X, ACTOR_START_Y, ACTOR_WIDTH, ACTOR_HEIGHT),
            velocity: 0.0,
            alive: true,
            rotation: 0.0,
            frame: 0,
            anim_counter: 0,
            jump_latched: false,
            bob_offset: 0,
            bob_step: 1,
        }
    }
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

/// Which half of a gap pair an obstacle is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Hangs from above, image flipped, bottom edge above the gap.
    Top,
    /// Rests below the gap, top edge under it.
    Bottom,
}

impl Side {
    /// +1 for the hanging piece, −1 for the resting one.
    pub fn polarity(&self) -> i32 {
        match self {
            Side::Top => 1,
            Side::Bottom => -1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub rect: Rect,
    pub side: Side,
    /// Monotonic id of the spawn event that created this piece.
    pub pair: u64,
}

// ── Terrain ───────────────────────────────────────────────────────────────────

/// Two ground segments that scroll left and leapfrog each other.
#[derive(Clone, Debug, PartialEq)]
pub struct Terrain {
    pub segments: [Rect; 2],
}

impl Default for Terrain {
    fn default() -> Self {
        Self {
            segments: [
                Rect::new(0, TERRAIN_Y, TERRAIN_WIDTH, TERRAIN_HEIGHT),
                Rect::new(SCREEN_WIDTH, TERRAIN_Y, TERRAIN_WIDTH, TERRAIN_HEIGHT),
            ],
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub screen: Screen,
    pub actor: Actor,
    /// Active obstacles in spawn order; the front pair is the one being scored.
    pub obstacles: Vec<Obstacle>,
    pub terrain: Terrain,
    pub score: u32,
    /// 0 unless playing.
    pub speed: i32,
    /// Timestamp (ms) of the last spawn event; `None` spawns on the next frame.
    pub last_spawn_ms: Option<u64>,
    pub next_pair: u64,
    /// The actor is inside the front obstacle's span and has not left it yet.
    pub crossed: bool,
    pub backdrop: Backdrop,
    pub skin: ObstacleSkin,
    /// Frames ticked since the title screen was first shown.
    pub frames_elapsed: u64,
}
