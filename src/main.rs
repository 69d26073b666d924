use std::io::{stdout, BufWriter, Write};
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::info;

use flappy_dog::assets::Assets;
use flappy_dog::audio::{default_backend, SoundBank};
use flappy_dog::compute::{init_state, tick};
use flappy_dog::config::{Settings, FRAME};
use flappy_dog::display::{self, Canvas};
use flappy_dog::input::{poll_events, InputTracker};
use flappy_dog::logging;
use flappy_dog::scene::compose;

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit input arrives. Each frame: poll input, advance the game,
/// play the frame's sounds, draw, then sleep out the rest of the frame.
fn game_loop<W: Write>(out: &mut W, assets: &Assets, sounds: &mut SoundBank) -> anyhow::Result<()> {
    let mut rng = thread_rng();
    let mut state = init_state(&mut rng);
    let mut tracker = InputTracker::new();
    let mut canvas = display::canvas_for_terminal()?;
    let clock = Instant::now();

    loop {
        let frame_start = Instant::now();

        let input = tracker.frame(&poll_events()?);
        if input.quit {
            info!(score = state.score, frames = state.frames_elapsed, "quit requested");
            return Ok(());
        }

        let now_ms = clock.elapsed().as_millis() as u64;
        let (next, cues) = tick(&state, &input, now_ms, &mut rng);
        state = next;
        sounds.play_all(&cues);

        let (cols, rows) = terminal::size()?;
        if canvas.size() != (cols, rows) {
            canvas = Canvas::new(cols, rows);
        }
        display::paint(&mut canvas, &compose(&state), assets);
        display::render(out, &canvas)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();
    logging::init(&settings)?;
    info!(?settings, "starting");

    let assets = Assets::load(&settings.assets_dir);
    let mut sounds = SoundBank::load(&settings.sounds_dir, default_backend());

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release events; terminals without the protocol fall back to
    // the input tracker's hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = game_loop(&mut out, &assets, &mut sounds);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
