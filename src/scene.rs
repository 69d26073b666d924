/// Per-frame draw list.
///
/// `compose` turns a [`GameState`] into an ordered list of things to draw,
/// back to front. It knows nothing about terminals; the display module maps
/// each item onto a sprite and a screen area.

use crate::config::{
    DIGIT_HEIGHT, DIGIT_WIDTH, GAME_OVER_POS, GAME_OVER_SIZE, LOGO_POS, LOGO_SIZE,
    SCORE_ANCHOR_X, SCORE_ANCHOR_Y, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::entities::{Backdrop, GameState, ObstacleSkin, Rect, Screen, Side};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawItem {
    Background(Backdrop),
    Obstacle {
        rect: Rect,
        skin: ObstacleSkin,
        /// Mirrored vertically (the hanging half of a pair).
        flipped: bool,
    },
    Terrain(Rect),
    Actor {
        rect: Rect,
        frame: usize,
        /// Degrees, unnormalised.
        rotation: f32,
    },
    Digit {
        digit: u8,
        rect: Rect,
    },
    Logo(Rect),
    GameOver(Rect),
}

/// Scoreboard layout: one glyph per decimal digit, centred on the anchor.
pub fn score_digits(score: u32) -> Vec<(u8, Rect)> {
    let text = score.to_string();
    let count = text.len() as i32;
    text.bytes()
        .enumerate()
        .map(|(i, b)| {
            let x = SCORE_ANCHOR_X - 15 * count + 30 * i as i32;
            (b - b'0', Rect::new(x, SCORE_ANCHOR_Y, DIGIT_WIDTH, DIGIT_HEIGHT))
        })
        .collect()
}

/// Everything to draw this frame, back to front.
pub fn compose(state: &GameState) -> Vec<DrawItem> {
    let mut items = vec![DrawItem::Background(state.backdrop)];

    items.extend(state.obstacles.iter().map(|o| DrawItem::Obstacle {
        rect: o.rect,
        skin: state.skin,
        flipped: o.side == Side::Top,
    }));
    items.extend(state.terrain.segments.iter().map(|&r| DrawItem::Terrain(r)));
    items.push(DrawItem::Actor {
        rect: state.actor.rect,
        frame: state.actor.frame,
        rotation: state.actor.rotation,
    });

    if state.screen == Screen::Start {
        items.push(DrawItem::Logo(Rect::new(
            LOGO_POS.0,
            LOGO_POS.1,
            LOGO_SIZE.0,
            LOGO_SIZE.1,
        )));
    } else {
        items.extend(
            score_digits(state.score)
                .into_iter()
                .map(|(digit, rect)| DrawItem::Digit { digit, rect }),
        );
    }

    if !state.actor.alive {
        items.push(DrawItem::GameOver(Rect::new(
            GAME_OVER_POS.0,
            GAME_OVER_POS.1,
            GAME_OVER_SIZE.0,
            GAME_OVER_SIZE.1,
        )));
    }

    items
}

/// Full-screen rectangle, used for the background.
pub fn screen_rect() -> Rect {
    Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT)
}
