/// World constants and run-time settings.
///
/// Every physics and layout value is fixed here; only file locations and the
/// log destination can be changed, through environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

// ── Screen ───────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 288;
pub const SCREEN_HEIGHT: i32 = 512;

/// Bottom of the playable area (80% of the screen height).
pub const FLOOR_Y: f32 = 0.80 * SCREEN_HEIGHT as f32;

pub const MAX_FPS: u64 = 60;
pub const FRAME: Duration = Duration::from_micros(1_000_000 / MAX_FPS);

// ── Actor ────────────────────────────────────────────────────────────────────

pub const ACTOR_WIDTH: i32 = 44;
pub const ACTOR_HEIGHT: i32 = 28;
pub const ACTOR_START_X: i32 = 60;
pub const ACTOR_START_Y: i32 = FLOOR_Y as i32 / 2;
/// Horizontal anchor used while bobbing on the start screen.
pub const ACTOR_IDLE_X: i32 = SCREEN_WIDTH / 2 - 20;

pub const GRAVITY: f32 = 0.3;
pub const MAX_FALL_SPEED: f32 = 8.0;
pub const JUMP_VELOCITY: f32 = -6.0;

/// Rotation applied per unit of velocity while alive.
pub const TILT_PER_VELOCITY: f32 = -2.0;
/// Rotation removed every frame while tumbling after death.
pub const DEATH_SPIN: f32 = 2.0;

pub const ANIMATION_FRAMES: usize = 10;
/// Animation ticks spent on each frame.
pub const TICKS_PER_FRAME: u32 = 6;

pub const IDLE_BOB_RANGE: i32 = 10;

// ── Obstacles ────────────────────────────────────────────────────────────────

pub const OBSTACLE_WIDTH: i32 = 52;
pub const OBSTACLE_HEIGHT: i32 = 320;
pub const HALF_GAP: i32 = 100 / 2;
pub const SPAWN_INTERVAL_MS: u64 = 1600;
/// Gap centres are drawn from `GAP_OFFSET_MIN..GAP_OFFSET_MAX` in `GAP_OFFSET_STEP`s
/// around `GAP_BASE_Y`.
pub const GAP_BASE_Y: i32 = (FLOOR_Y / 2.0) as i32;
pub const GAP_OFFSET_MIN: i32 = -100;
pub const GAP_OFFSET_MAX: i32 = 100;
pub const GAP_OFFSET_STEP: i32 = 4;

pub const PLAY_SPEED: i32 = 2;

// ── Terrain ──────────────────────────────────────────────────────────────────

pub const TERRAIN_WIDTH: i32 = 336;
pub const TERRAIN_HEIGHT: i32 = 112;
pub const TERRAIN_Y: i32 = FLOOR_Y as i32;
pub const TERRAIN_WRAP_X: i32 = SCREEN_WIDTH - 5;

// ── HUD ──────────────────────────────────────────────────────────────────────

pub const SCORE_ANCHOR_X: i32 = SCREEN_WIDTH / 2;
pub const SCORE_ANCHOR_Y: i32 = 50;
pub const DIGIT_WIDTH: i32 = 24;
pub const DIGIT_HEIGHT: i32 = 36;

pub const LOGO_POS: (i32, i32) = (50, 20);
pub const LOGO_SIZE: (i32, i32) = (200, 180);
pub const GAME_OVER_POS: (i32, i32) = (50, 200);
pub const GAME_OVER_SIZE: (i32, i32) = (192, 42);

// ── Run-time settings ────────────────────────────────────────────────────────

/// Locations resolved at start-up.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub assets_dir: PathBuf,
    pub sounds_dir: PathBuf,
    /// Where tracing output goes; `None` discards it.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            sounds_dir: PathBuf::from("sounds"),
            log_file: None,
        }
    }
}

impl Settings {
    /// Read `FLAPPY_ASSETS`, `FLAPPY_SOUNDS` and `FLAPPY_LOG`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            assets_dir: non_empty("FLAPPY_ASSETS")
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
            sounds_dir: non_empty("FLAPPY_SOUNDS")
                .map(PathBuf::from)
                .unwrap_or(defaults.sounds_dir),
            log_file: non_empty("FLAPPY_LOG").map(PathBuf::from),
        }
    }
}
