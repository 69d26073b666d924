/// Input polling and jump-button tracking.
///
/// Terminal events are drained once per frame by [`poll_events`], translated
/// into [`InputEvent`]s and folded by [`InputTracker`] into the per-frame
/// [`FrameInput`] the game logic consumes.

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that never emit key-release events.
pub const HOLD_WINDOW: u64 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Mouse,
    Key,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown(Source),
    /// Auto-repeat of a held jump key.
    PointerRepeat,
    PointerUp(Source),
    Quit,
}

/// What the game sees for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// A fresh press arrived this frame.
    pub pressed: bool,
    /// The jump input is down at the end of this frame.
    pub held: bool,
    pub quit: bool,
}

/// Map a terminal event to a game input, if it is one.
pub fn translate(ev: &Event) -> Option<InputEvent> {
    match ev {
        Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) => match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                (*kind == KeyEventKind::Press).then_some(InputEvent::Quit)
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                (*kind == KeyEventKind::Press).then_some(InputEvent::Quit)
            }
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(match kind {
                KeyEventKind::Press => InputEvent::PointerDown(Source::Key),
                KeyEventKind::Repeat => InputEvent::PointerRepeat,
                KeyEventKind::Release => InputEvent::PointerUp(Source::Key),
            }),
            _ => None,
        },
        Event::Mouse(MouseEvent { kind, .. }) => match kind {
            MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerDown(Source::Mouse)),
            MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::PointerUp(Source::Mouse)),
            _ => None,
        },
        _ => None,
    }
}

/// Drain every pending terminal event without blocking.
pub fn poll_events() -> io::Result<Vec<InputEvent>> {
    let mut events = Vec::new();
    while event::poll(Duration::ZERO)? {
        if let Some(input) = translate(&event::read()?) {
            events.push(input);
        }
    }
    Ok(events)
}

/// Remembers which jump sources are down between frames.
#[derive(Clone, Debug, Default)]
pub struct InputTracker {
    frame: u64,
    mouse_down: bool,
    /// Frame of the last key press/repeat, cleared on release.
    key_seen: Option<u64>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn key_held(&self) -> bool {
        self.key_seen
            .map(|last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Fold this frame's events into a [`FrameInput`].
    pub fn frame(&mut self, events: &[InputEvent]) -> FrameInput {
        self.frame += 1;
        let mut input = FrameInput::default();

        for ev in events {
            match ev {
                InputEvent::PointerDown(Source::Mouse) => {
                    if !self.mouse_down {
                        input.pressed = true;
                    }
                    self.mouse_down = true;
                }
                InputEvent::PointerUp(Source::Mouse) => self.mouse_down = false,
                InputEvent::PointerDown(Source::Key) => {
                    // Classic terminals report auto-repeat as repeated presses.
                    if !self.key_held() {
                        input.pressed = true;
                    }
                    self.key_seen = Some(self.frame);
                }
                InputEvent::PointerRepeat => {
                    if self.key_seen.is_some() {
                        self.key_seen = Some(self.frame);
                    }
                }
                InputEvent::PointerUp(Source::Key) => self.key_seen = None,
                InputEvent::Quit => input.quit = true,
            }
        }

        input.held = self.mouse_down || self.key_held();
        input
    }
}
