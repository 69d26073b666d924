/// Sprite loading.
///
/// Sprites are plain-text tiles stored as `<assets>/<logical name>.txt`. The
/// optional first line `@<colour> [stretch]` picks the foreground colour and
/// whether the art is scaled to the target rectangle; every other line is a
/// row of the tile. Unstretched tiles repeat to fill whatever rectangle the
/// sprite is drawn into. Spaces are transparent.
///
/// Loading never fails from the caller's point of view: a missing or broken
/// file is logged and replaced by a solid magenta placeholder.

use std::fs;
use std::path::Path;

use crossterm::style::Color;
use tracing::warn;

use crate::config::ANIMATION_FRAMES;
use crate::entities::{Backdrop, ObstacleSkin};
use crate::error::AssetError;

pub const PLACEHOLDER_COLOR: Color = Color::Magenta;
const PLACEHOLDER_GLYPH: char = '█';

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub name: String,
    pub color: Color,
    /// Tile rows; never empty, every row has at least one char.
    pub tile: Vec<Vec<char>>,
    /// Scale the tile to the target area instead of repeating it.
    pub stretch: bool,
    pub placeholder: bool,
}

impl Sprite {
    /// Solid, high-visibility stand-in for an asset that failed to load.
    pub fn placeholder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            color: PLACEHOLDER_COLOR,
            tile: vec![vec![PLACEHOLDER_GLYPH]],
            stretch: false,
            placeholder: true,
        }
    }

    /// Tile glyph for a cell, wrapping in both directions.
    pub fn glyph_at(&self, col: usize, row: usize) -> char {
        let line = &self.tile[row % self.tile.len()];
        line[col % line.len()]
    }

    /// Glyph for cell `(col, row)` of an area `span` cells large.
    pub fn sample(&self, col: usize, row: usize, span: (usize, usize)) -> char {
        if !self.stretch {
            return self.glyph_at(col, row);
        }
        let tile_row = row * self.tile.len() / span.1.max(1);
        let line = &self.tile[tile_row.min(self.tile.len() - 1)];
        let tile_col = col * line.len() / span.0.max(1);
        line[tile_col.min(line.len() - 1)]
    }
}

pub fn parse_color(name: &str) -> Option<Color> {
    let color = match name.trim().to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "dark_red" => Color::DarkRed,
        "dark_green" => Color::DarkGreen,
        "dark_yellow" => Color::DarkYellow,
        "dark_blue" => Color::DarkBlue,
        "dark_magenta" => Color::DarkMagenta,
        "dark_cyan" => Color::DarkCyan,
        "dark_grey" | "dark_gray" => Color::DarkGrey,
        _ => return None,
    };
    Some(color)
}

/// Parse sprite text read from `path`.
pub fn parse_sprite(path: &Path, name: &str, text: &str) -> Result<Sprite, AssetError> {
    let mut lines = text.lines().map(|l| l.trim_end_matches('\r')).peekable();

    let mut color = Color::White;
    let mut stretch = false;
    if let Some(header) = lines.peek().copied().and_then(|l| l.strip_prefix('@')) {
        let mut tokens = header.split_whitespace();
        if let Some(name) = tokens.next() {
            color = parse_color(name).ok_or_else(|| AssetError::UnknownColor {
                path: path.to_path_buf(),
                name: name.to_string(),
            })?;
        }
        for token in tokens {
            match token {
                "stretch" => stretch = true,
                other => {
                    return Err(AssetError::BadHeader {
                        path: path.to_path_buf(),
                        token: other.to_string(),
                    })
                }
            }
        }
        lines.next();
    }

    let tile: Vec<Vec<char>> = lines
        .filter(|l| !l.is_empty())
        .map(|l| l.chars().collect())
        .collect();
    if tile.is_empty() {
        return Err(AssetError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(Sprite {
        name: name.to_string(),
        color,
        tile,
        stretch,
        placeholder: false,
    })
}

pub fn try_load_sprite(dir: &Path, name: &str) -> Result<Sprite, AssetError> {
    let path = dir.join(format!("{name}.txt"));
    let text = fs::read_to_string(&path).map_err(|source| AssetError::Io {
        path: path.clone(),
        source,
    })?;
    parse_sprite(&path, name, &text)
}

/// Load a sprite by logical name, substituting the placeholder on failure.
pub fn load_sprite(dir: &Path, name: &str) -> Sprite {
    try_load_sprite(dir, name).unwrap_or_else(|err| {
        warn!(%err, sprite = name, "using placeholder sprite");
        Sprite::placeholder(name)
    })
}

/// Every sprite the game draws.
#[derive(Clone, Debug)]
pub struct Assets {
    pub background_day: Sprite,
    pub background_night: Sprite,
    pub obstacle_green: Sprite,
    pub obstacle_red: Sprite,
    pub terrain: Sprite,
    pub logo: Sprite,
    pub game_over: Sprite,
    pub actor_frames: Vec<Sprite>,
    pub digits: Vec<Sprite>,
}

impl Assets {
    pub fn load(dir: &Path) -> Self {
        Self::build(|name| load_sprite(dir, name))
    }

    /// All placeholders, for running without an asset directory.
    pub fn placeholders() -> Self {
        Self::build(Sprite::placeholder)
    }

    fn build(load: impl Fn(&str) -> Sprite) -> Self {
        Self {
            background_day: load("background-day"),
            background_night: load("background-night"),
            obstacle_green: load("obstacle-green"),
            obstacle_red: load("obstacle-red"),
            terrain: load("terrain"),
            logo: load("start"),
            game_over: load("gameover"),
            // Frame files are numbered from 2.
            actor_frames: (0..ANIMATION_FRAMES)
                .map(|i| load(&format!("dog/d{}", i + 2)))
                .collect(),
            digits: (0..10).map(|d| load(&format!("score/{d}"))).collect(),
        }
    }

    pub fn background(&self, backdrop: Backdrop) -> &Sprite {
        match backdrop {
            Backdrop::Day => &self.background_day,
            Backdrop::Night => &self.background_night,
        }
    }

    pub fn obstacle(&self, skin: ObstacleSkin) -> &Sprite {
        match skin {
            ObstacleSkin::Green => &self.obstacle_green,
            ObstacleSkin::Red => &self.obstacle_red,
        }
    }

    pub fn actor_frame(&self, frame: usize) -> &Sprite {
        &self.actor_frames[frame % self.actor_frames.len()]
    }

    pub fn digit(&self, digit: u8) -> &Sprite {
        &self.digits[digit as usize % self.digits.len()]
    }

    /// How many sprites fell back to the placeholder.
    pub fn placeholder_count(&self) -> usize {
        [
            &self.background_day,
            &self.background_night,
            &self.obstacle_green,
            &self.obstacle_red,
            &self.terrain,
            &self.logo,
            &self.game_over,
        ]
        .into_iter()
        .chain(self.actor_frames.iter())
        .chain(self.digits.iter())
        .filter(|s| s.placeholder)
        .count()
    }
}
