/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current state
/// (and, where needed, an RNG handle, the frame's input and the current time)
/// and returns a brand-new value. Side effects are limited to the injected RNG;
/// sounds are returned as cues for the caller to play.

use rand::Rng;
use tracing::{debug, info};

use crate::audio::SoundCue;
use crate::config::{
    ACTOR_IDLE_X, ANIMATION_FRAMES, DEATH_SPIN, FLOOR_Y, GAP_BASE_Y, GAP_OFFSET_MAX,
    GAP_OFFSET_MIN, GAP_OFFSET_STEP, GRAVITY, HALF_GAP, IDLE_BOB_RANGE, JUMP_VELOCITY,
    MAX_FALL_SPEED, OBSTACLE_HEIGHT, OBSTACLE_WIDTH, PLAY_SPEED, SCREEN_WIDTH,
    SPAWN_INTERVAL_MS, TERRAIN_WRAP_X, TICKS_PER_FRAME, TILT_PER_VELOCITY,
};
use crate::entities::{
    Actor, Backdrop, GameState, Obstacle, ObstacleSkin, Rect, Screen, Side, Terrain,
};
use crate::input::FrameInput;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the title-screen state with a random backdrop and obstacle skin.
pub fn init_state(rng: &mut impl Rng) -> GameState {
    GameState {
        screen: Screen::Start,
        actor: Actor::default(),
        obstacles: Vec::new(),
        terrain: Terrain::default(),
        score: 0,
        speed: 0,
        last_spawn_ms: None,
        next_pair: 0,
        crossed: false,
        backdrop: pick_backdrop(rng),
        skin: pick_skin(rng),
        frames_elapsed: 0,
    }
}

fn pick_backdrop(rng: &mut impl Rng) -> Backdrop {
    if rng.gen_bool(0.5) {
        Backdrop::Day
    } else {
        Backdrop::Night
    }
}

fn pick_skin(rng: &mut impl Rng) -> ObstacleSkin {
    if rng.gen_bool(0.5) {
        ObstacleSkin::Green
    } else {
        ObstacleSkin::Red
    }
}

// ── Actor ────────────────────────────────────────────────────────────────────

fn above_floor(rect: &Rect) -> bool {
    rect.bottom() as f32 <= FLOOR_Y
}

/// Advance the wing animation by one tick.
pub fn animate(actor: &Actor) -> Actor {
    let mut counter = actor.anim_counter + 1;
    let mut frame = actor.frame;
    if counter >= TICKS_PER_FRAME {
        counter = 0;
        frame += 1;
    }
    if frame >= ANIMATION_FRAMES {
        frame = 0;
    }
    Actor {
        anim_counter: counter,
        frame,
        ..actor.clone()
    }
}

/// One physics step: gravity, jump handling, tilt and animation.
///
/// The actor stops moving once its bottom edge passes the floor but is not
/// killed by it; landing is resolved by [`tick`].
pub fn update_actor(actor: &Actor, input: &FrameInput) -> (Actor, Option<SoundCue>) {
    let mut next = actor.clone();
    let mut cue = None;

    next.velocity = (next.velocity + GRAVITY).min(MAX_FALL_SPEED);
    if above_floor(&next.rect) {
        next.rect.y += next.velocity.floor() as i32;
    }

    if next.alive {
        if (input.pressed || input.held) && !next.jump_latched {
            next.jump_latched = true;
            next.velocity = JUMP_VELOCITY;
            cue = Some(SoundCue::Wing);
        }
        if !input.held {
            next.jump_latched = false;
        }
        next = animate(&next);
        next.rotation = next.velocity * TILT_PER_VELOCITY;
    } else if above_floor(&next.rect) {
        // Not wrapped; renderers normalise the angle.
        next.rotation -= DEATH_SPIN;
    }

    (next, cue)
}

/// Start-screen idle animation: bob ±10 units around the anchor, no gravity.
pub fn idle_bob(actor: &Actor) -> Actor {
    let mut next = animate(actor);
    if next.bob_offset <= -IDLE_BOB_RANGE || next.bob_offset > IDLE_BOB_RANGE {
        next.bob_step = -next.bob_step;
    }
    next.bob_offset += next.bob_step;
    next.rect.y += next.bob_step;
    next.rect.x = ACTOR_IDLE_X;
    next
}

// ── Obstacles ────────────────────────────────────────────────────────────────

/// Random gap centre: the base height plus an offset in `[-100, 100)` step 4.
pub fn roll_gap_center(rng: &mut impl Rng) -> i32 {
    let slots = (GAP_OFFSET_MAX - GAP_OFFSET_MIN) / GAP_OFFSET_STEP;
    GAP_BASE_Y + GAP_OFFSET_MIN + rng.gen_range(0..slots) * GAP_OFFSET_STEP
}

/// Build one obstacle at the right screen edge.
pub fn make_obstacle(gap_center: i32, side: Side, pair: u64) -> Obstacle {
    let edge = gap_center - side.polarity() * HALF_GAP;
    let y = match side {
        Side::Top => edge - OBSTACLE_HEIGHT,
        Side::Bottom => edge,
    };
    Obstacle {
        rect: Rect::new(SCREEN_WIDTH, y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
        side,
        pair,
    }
}

/// Both halves of a gap pair sharing one centre height.
pub fn spawn_pair(gap_center: i32, pair: u64) -> [Obstacle; 2] {
    [
        make_obstacle(gap_center, Side::Top, pair),
        make_obstacle(gap_center, Side::Bottom, pair),
    ]
}

/// A spawn is due when none has happened yet or the cadence has elapsed.
pub fn spawn_due(last_spawn_ms: Option<u64>, now_ms: u64) -> bool {
    match last_spawn_ms {
        None => true,
        Some(last) => now_ms.saturating_sub(last) >= SPAWN_INTERVAL_MS,
    }
}

/// Scroll every obstacle left and drop the ones whose right edge passed x = 0.
pub fn scroll_obstacles(obstacles: &[Obstacle], speed: i32) -> Vec<Obstacle> {
    obstacles
        .iter()
        .map(|o| {
            let mut moved = o.clone();
            moved.rect.x -= speed;
            moved
        })
        .filter(|o| o.rect.right() >= 0)
        .collect()
}

// ── Terrain ──────────────────────────────────────────────────────────────────

/// Scroll both ground segments and wrap any that left the screen.
pub fn scroll_terrain(terrain: &Terrain, speed: i32) -> Terrain {
    let mut segments = terrain.segments;
    for seg in segments.iter_mut() {
        seg.x -= speed;
        if seg.right() <= 0 {
            seg.x = TERRAIN_WRAP_X;
        }
    }
    Terrain { segments }
}

// ── Scoring ──────────────────────────────────────────────────────────────────

/// Track passage through the front obstacle pair. Returns the new `crossed`
/// flag and whether a point was earned.
///
/// Only the earliest live obstacle is considered, which is correct as long as
/// the spawn cadence keeps pairs from overlapping the actor at the same time.
pub fn check_crossing(actor: &Actor, front: Option<&Obstacle>, crossed: bool) -> (bool, bool) {
    let Some(obstacle) = front else {
        return (crossed, false);
    };
    let mut crossed = crossed;
    if !crossed
        && actor.alive
        && actor.rect.left() > obstacle.rect.left()
        && actor.rect.right() < obstacle.rect.right()
    {
        crossed = true;
    }
    if crossed && actor.rect.left() > obstacle.rect.right() {
        return (false, true);
    }
    (crossed, false)
}

// ── Per-frame tick (RNG and clock are injected) ──────────────────────────────

/// Advance the game by one frame and return the sounds it produced.
///
/// Clicks that change screens (start, restart) are applied after the frame's
/// simulation, so the click that starts a game does not also jump.
pub fn tick(
    state: &GameState,
    input: &FrameInput,
    now_ms: u64,
    rng: &mut impl Rng,
) -> (GameState, Vec<SoundCue>) {
    let mut next = GameState {
        frames_elapsed: state.frames_elapsed + 1,
        ..state.clone()
    };
    let mut cues = Vec::new();

    if next.screen == Screen::Start {
        next.speed = 0;
        next.actor = idle_bob(&next.actor);
        next.terrain = scroll_terrain(&next.terrain, next.speed);
    } else {
        simulate(&mut next, input, now_ms, rng, &mut cues);
    }

    if input.pressed {
        match next.screen {
            Screen::Start => {
                info!("game started");
                next.screen = Screen::Playing;
                next.speed = PLAY_SPEED;
                next.last_spawn_ms = None;
                next.obstacles.clear();
                next.crossed = false;
                next.score = 0;
            }
            Screen::Dead => {
                info!(score = next.score, "back to title screen");
                next.screen = Screen::Start;
                next.actor = Actor::default();
                next.obstacles.clear();
                next.crossed = false;
                next.backdrop = pick_backdrop(rng);
                next.skin = pick_skin(rng);
                cues.push(SoundCue::Swoosh);
            }
            Screen::Playing => {}
        }
    }

    (next, cues)
}

fn simulate(
    state: &mut GameState,
    input: &FrameInput,
    now_ms: u64,
    rng: &mut impl Rng,
    cues: &mut Vec<SoundCue>,
) {
    // 1. Spawn
    if state.screen == Screen::Playing
        && state.actor.alive
        && spawn_due(state.last_spawn_ms, now_ms)
    {
        let gap_center = roll_gap_center(rng);
        debug!(gap_center, pair = state.next_pair, "spawning obstacle pair");
        state.obstacles.extend(spawn_pair(gap_center, state.next_pair));
        state.next_pair += 1;
        state.last_spawn_ms = Some(now_ms);
    }

    // 2. Move everything
    state.obstacles = scroll_obstacles(&state.obstacles, state.speed);
    state.terrain = scroll_terrain(&state.terrain, state.speed);
    let (actor, cue) = update_actor(&state.actor, input);
    state.actor = actor;
    cues.extend(cue);

    // 3. Obstacle or ceiling hit
    let hit = state
        .obstacles
        .iter()
        .any(|o| o.rect.intersects(&state.actor.rect))
        || state.actor.rect.top() <= 0;
    if hit && state.actor.alive {
        info!(score = state.score, "actor hit an obstacle");
        cues.push(SoundCue::Hit);
        cues.push(SoundCue::Die);
        state.actor.alive = false;
        state.actor.rotation = state.actor.velocity * TILT_PER_VELOCITY;
    }

    // 4. Landing
    if state.actor.rect.bottom() as f32 >= FLOOR_Y {
        if state.screen != Screen::Dead {
            info!(score = state.score, "actor landed, game over");
        }
        state.speed = 0;
        state.screen = Screen::Dead;
    }

    // 5. Scoring
    let (crossed, scored) = check_crossing(&state.actor, state.obstacles.first(), state.crossed);
    state.crossed = crossed;
    if scored {
        state.score += 1;
        debug!(score = state.score, "obstacle pair cleared");
        cues.push(SoundCue::Point);
    }
}
