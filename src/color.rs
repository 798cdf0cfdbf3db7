//! RGB colors and the named palette shared by loaders, sprites and the demo

use serde::{Deserialize, Serialize};

/// 24-bit RGB color. Equality is exact component match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const ORANGE: Color = Color::rgb(255, 127, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const INDIGO: Color = Color::rgb(75, 0, 130);
    pub const VIOLET: Color = Color::rgb(148, 0, 211);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const SILVER: Color = Color::rgb(192, 192, 192);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const BRONZE: Color = Color::rgb(205, 127, 50);
    pub const SKY_BLUE: Color = Color::rgb(135, 206, 235);
    pub const DARK_GREEN: Color = Color::rgb(0, 100, 0);

    /// Fill sentinel: a rastered polygon given this fill color draws its outline only.
    ///
    /// Near-black so that it never collides with a palette entry; it is still a real
    /// color when passed to any other drawing call.
    pub const NO_FILL: Color = Color::rgb(1, 2, 3);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn is_no_fill(&self) -> bool {
        *self == Self::NO_FILL
    }

    /// Look up a palette entry by name (case-insensitive, `_`/`-`/space tolerant)
    pub fn named(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let color = match key.as_str() {
            "black" => Self::BLACK,
            "red" => Self::RED,
            "orange" => Self::ORANGE,
            "yellow" => Self::YELLOW,
            "green" => Self::GREEN,
            "blue" => Self::BLUE,
            "indigo" => Self::INDIGO,
            "violet" => Self::VIOLET,
            "white" => Self::WHITE,
            "cyan" => Self::CYAN,
            "silver" => Self::SILVER,
            "gray" | "grey" => Self::GRAY,
            "bronze" => Self::BRONZE,
            "skyblue" => Self::SKY_BLUE,
            "darkgreen" => Self::DARK_GREEN,
            "nofill" | "none" => Self::NO_FILL,
            _ => return None,
        };
        Some(color)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<Color> for (u8, u8, u8) {
    fn from(c: Color) -> Self {
        (c.r, c.g, c.b)
    }
}
