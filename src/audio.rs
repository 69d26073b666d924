/// Sound cues and playback.
///
/// The game logic only emits [`SoundCue`]s. A [`SoundBank`] resolves each cue
/// to a loaded clip and hands it to an [`AudioBackend`]; a cue whose clip
/// failed to load is silently skipped.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::AssetError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Jump.
    Wing,
    Hit,
    Die,
    /// Obstacle pair cleared.
    Point,
    /// Leaving the game-over screen.
    Swoosh,
}

impl SoundCue {
    pub const ALL: [SoundCue; 5] = [
        SoundCue::Wing,
        SoundCue::Hit,
        SoundCue::Die,
        SoundCue::Point,
        SoundCue::Swoosh,
    ];

    /// Logical asset name; the file is `<name>.wav` in the sounds directory.
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundCue::Wing => "wing",
            SoundCue::Hit => "hit",
            SoundCue::Die => "die",
            SoundCue::Point => "point",
            SoundCue::Swoosh => "swoosh",
        }
    }
}

/// Encoded audio bytes, shared between plays.
#[derive(Clone, Debug, PartialEq)]
pub struct Clip {
    pub name: &'static str,
    pub bytes: Arc<[u8]>,
}

/// Anything that can play a clip. Playback is fire-and-forget.
pub trait AudioBackend {
    fn play(&mut self, clip: &Clip);
}

/// Records the cue in the log instead of making noise.
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, clip: &Clip) {
        debug!(sound = clip.name, "sound cue");
    }
}

#[cfg(feature = "audio")]
pub use self::rodio_backend::RodioBackend;

#[cfg(feature = "audio")]
mod rodio_backend {
    use std::io::Cursor;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use tracing::warn;

    use super::{AudioBackend, Clip};

    /// Plays clips on the default output device.
    pub struct RodioBackend {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl RodioBackend {
        pub fn new() -> Result<Self, rodio::StreamError> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Self {
                _stream: stream,
                handle,
            })
        }
    }

    impl AudioBackend for RodioBackend {
        fn play(&mut self, clip: &Clip) {
            let source = match Decoder::new(Cursor::new(clip.bytes.clone())) {
                Ok(source) => source,
                Err(err) => {
                    warn!(sound = clip.name, %err, "cannot decode sound");
                    return;
                }
            };
            if let Ok(sink) = Sink::try_new(&self.handle) {
                sink.append(source);
                sink.detach();
            }
        }
    }
}

/// Pick the best backend available in this build.
pub fn default_backend() -> Box<dyn AudioBackend> {
    #[cfg(feature = "audio")]
    {
        match RodioBackend::new() {
            Ok(backend) => return Box::new(backend),
            Err(err) => warn!(%err, "no audio output, sounds will only be logged"),
        }
    }
    Box::new(LogBackend)
}

/// Read one clip from disk.
pub fn try_load_clip(dir: &Path, cue: SoundCue) -> Result<Clip, AssetError> {
    let path = dir.join(format!("{}.wav", cue.asset_name()));
    let bytes = fs::read(&path).map_err(|source| AssetError::Io {
        path: path.clone(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(AssetError::Empty { path });
    }
    Ok(Clip {
        name: cue.asset_name(),
        bytes: bytes.into(),
    })
}

/// Every cue mapped to its clip, or `None` when it could not be loaded.
pub struct SoundBank {
    clips: HashMap<SoundCue, Option<Clip>>,
    backend: Box<dyn AudioBackend>,
}

impl SoundBank {
    /// Load every clip from `dir`; failures are logged and leave the cue silent.
    pub fn load(dir: &Path, backend: Box<dyn AudioBackend>) -> Self {
        let clips = SoundCue::ALL
            .iter()
            .map(|&cue| {
                let clip = try_load_clip(dir, cue)
                    .map_err(|err| warn!(%err, "sound unavailable, cue will be silent"))
                    .ok();
                (cue, clip)
            })
            .collect();
        Self { clips, backend }
    }

    /// A bank with no clips at all.
    pub fn silent(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            clips: SoundCue::ALL.iter().map(|&cue| (cue, None)).collect(),
            backend,
        }
    }

    pub fn has_clip(&self, cue: SoundCue) -> bool {
        matches!(self.clips.get(&cue), Some(Some(_)))
    }

    pub fn play(&mut self, cue: SoundCue) {
        if let Some(Some(clip)) = self.clips.get(&cue) {
            self.backend.play(clip);
        }
    }

    pub fn play_all(&mut self, cues: &[SoundCue]) {
        for &cue in cues {
            self.play(cue);
        }
    }
}
