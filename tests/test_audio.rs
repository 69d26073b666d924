use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use flappy_dog::audio::*;
use flappy_dog::compute::{init_state, tick};
use flappy_dog::config::PLAY_SPEED;
use flappy_dog::entities::{Obstacle, Rect, Screen, Side};
use flappy_dog::error::AssetError;
use flappy_dog::input::FrameInput;

/// Backend that remembers what it was asked to play.
struct Recorder(Rc<RefCell<Vec<String>>>);

impl AudioBackend for Recorder {
    fn play(&mut self, clip: &Clip) {
        self.0.borrow_mut().push(clip.name.to_string());
    }
}

fn recording_bank(dir: &Path) -> (SoundBank, Rc<RefCell<Vec<String>>>) {
    let played = Rc::new(RefCell::new(Vec::new()));
    let bank = SoundBank::load(dir, Box::new(Recorder(played.clone())));
    (bank, played)
}

fn repo_sounds() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("sounds")
}

#[test]
fn cue_names() {
    let names: Vec<_> = SoundCue::ALL.iter().map(|c| c.asset_name()).collect();
    assert_eq!(names, ["wing", "hit", "die", "point", "swoosh"]);
}

#[test]
fn shipped_sounds_load() {
    let (mut bank, played) = recording_bank(&repo_sounds());
    for cue in SoundCue::ALL {
        assert!(bank.has_clip(cue), "{cue:?} missing");
    }
    bank.play(SoundCue::Point);
    assert_eq!(*played.borrow(), ["point"]);
}

#[test]
fn missing_sounds_are_silent() {
    let dir = std::env::temp_dir().join(format!("flappy_dog_nosound_{}", std::process::id()));
    let (mut bank, played) = recording_bank(&dir);
    assert!(!bank.has_clip(SoundCue::Wing));
    bank.play_all(&SoundCue::ALL);
    assert!(played.borrow().is_empty());
}

#[test]
fn silent_bank_plays_nothing() {
    let played = Rc::new(RefCell::new(Vec::new()));
    let mut bank = SoundBank::silent(Box::new(Recorder(played.clone())));
    bank.play_all(&[SoundCue::Hit, SoundCue::Die]);
    assert!(played.borrow().is_empty());
}

#[test]
fn clip_errors() {
    let dir = std::env::temp_dir().join(format!("flappy_dog_clips_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();

    assert!(matches!(
        try_load_clip(&dir, SoundCue::Hit),
        Err(AssetError::Io { .. })
    ));

    fs::write(dir.join("hit.wav"), b"").unwrap();
    assert!(matches!(
        try_load_clip(&dir, SoundCue::Hit),
        Err(AssetError::Empty { .. })
    ));

    fs::write(dir.join("hit.wav"), b"RIFF").unwrap();
    let clip = try_load_clip(&dir, SoundCue::Hit).unwrap();
    assert_eq!(clip.name, "hit");
    assert_eq!(&clip.bytes[..], b"RIFF");

    // Only hit is present; everything else stays silent
    let (mut bank, played) = recording_bank(&dir);
    bank.play_all(&SoundCue::ALL);
    assert_eq!(*played.borrow(), ["hit"]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn collision_sounds_play_once() {
    let (mut bank, played) = recording_bank(&repo_sounds());
    let mut rng = StdRng::seed_from_u64(7);

    let mut state = init_state(&mut rng);
    state.screen = Screen::Playing;
    state.speed = PLAY_SPEED;
    state.last_spawn_ms = Some(0);
    state.obstacles.push(Obstacle {
        rect: Rect::new(state.actor.rect.x, 0, 52, 320),
        side: Side::Top,
        pair: 0,
    });

    for frame in 0..30 {
        let (next, cues) = tick(&state, &FrameInput::default(), frame * 16, &mut rng);
        bank.play_all(&cues);
        state = next;
    }

    let played = played.borrow();
    assert_eq!(played.iter().filter(|n| *n == "hit").count(), 1);
    assert_eq!(played.iter().filter(|n| *n == "die").count(), 1);
    assert!(!state.actor.alive);
}
