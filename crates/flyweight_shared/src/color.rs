use crate::types::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// An 8-bit RGBA color. Colors are extrinsic state: they travel with every draw call and are
/// never stored inside a shared shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Color::rgba8(255, 255, 255, 255);
    pub const BLACK: Self = Color::rgba8(0, 0, 0, 255);
    pub const RED: Self = Color::rgba8(255, 0, 0, 255);
    pub const GREEN: Self = Color::rgba8(0, 255, 0, 255);
    pub const BLUE: Self = Color::rgba8(0, 0, 255, 255);
    pub const YELLOW: Self = Color::rgba8(255, 255, 0, 255);
    pub const CYAN: Self = Color::rgba8(0, 255, 255, 255);
    pub const MAGENTA: Self = Color::rgba8(255, 0, 255, 255);
    pub const GRAY: Self = Color::rgba8(128, 128, 128, 255);
    pub const ORANGE: Self = Color::rgba8(255, 200, 0, 255);
    pub const PINK: Self = Color::rgba8(255, 175, 175, 255);
    pub const TRANSPARENT: Self = Color::rgba8(255, 255, 255, 0);

    /// Named colors, in the order the scene composer picks from
    pub const NAMED: [(&'static str, Color); 12] = [
        ("white", Color::WHITE),
        ("black", Color::BLACK),
        ("red", Color::RED),
        ("green", Color::GREEN),
        ("blue", Color::BLUE),
        ("yellow", Color::YELLOW),
        ("cyan", Color::CYAN),
        ("magenta", Color::MAGENTA),
        ("gray", Color::GRAY),
        ("orange", Color::ORANGE),
        ("pink", Color::PINK),
        ("transparent", Color::TRANSPARENT),
    ];

    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 255)
    }

    #[must_use]
    pub fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Color {
    type Err = Error;

    // Accepted forms:
    //   red
    //   #ff0000
    //   #ff000080
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| Error::Parse(format!("invalid hex color: {s}")));
        }

        Color::NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, color)| *color)
            .ok_or_else(|| Error::Parse(format!("unknown color: {s}")))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();

    match hex.len() {
        6 => Some(Color::rgb8(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(Color::rgba8(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
        _ => None,
    }
}
