use super::{Point, Polygon};
use crate::color::Color;
use crate::display::PixelSurface;
use std::collections::BTreeMap;

/// Vector font: every glyph is an outer polygon followed by optional counters (holes)
///
/// Text format, whitespace separated:
///
/// ```text
/// <width> <height> <horizontal space> <vertical space>
/// <char> <polygon count>
///   <point count> x y x y ...
///   ...
/// ```
#[derive(Debug, Clone, Default)]
pub struct Font {
    width: i32,
    height: i32,
    horizontal_space: i32,
    vertical_space: i32,
    glyphs: BTreeMap<char, Vec<Polygon>>,
}

impl Font {
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut tokens = text.split_whitespace();
        let mut int = |what: &str| -> Result<i32, String> {
            let tok = tokens
                .next()
                .ok_or_else(|| format!("font ended while reading {}", what))?;
            tok.parse::<i32>()
                .map_err(|e| format!("bad {} '{}': {}", what, tok, e))
        };

        let mut font = Font {
            width: int("glyph width")?,
            height: int("glyph height")?,
            horizontal_space: int("horizontal space")?,
            vertical_space: int("vertical space")?,
            glyphs: BTreeMap::new(),
        };

        while let Some(tok) = tokens.next() {
            let mut chars = tok.chars();
            let glyph = match (chars.next(), chars.next()) {
                (Some(c), None) => c.to_ascii_uppercase(),
                _ => return Err(format!("expected a single glyph character, got '{}'", tok)),
            };
            let mut int = |what: &str| -> Result<i32, String> {
                let tok = tokens
                    .next()
                    .ok_or_else(|| format!("glyph '{}' ended while reading {}", glyph, what))?;
                tok.parse::<i32>()
                    .map_err(|e| format!("glyph '{}': bad {} '{}': {}", glyph, what, tok, e))
            };

            let polygon_count = int("polygon count")?;
            let mut polygons = Vec::with_capacity(polygon_count.max(0) as usize);
            for _ in 0..polygon_count {
                let point_count = int("point count")?;
                let mut polygon = Polygon::new();
                for _ in 0..point_count {
                    let x = int("x")?;
                    let y = int("y")?;
                    polygon.add_point(Point::new(x, y));
                }
                polygons.push(polygon);
            }
            if font.glyphs.insert(glyph, polygons).is_some() {
                log::warn!("font defines glyph '{}' twice, keeping the last one", glyph);
            }
        }

        log::debug!(
            "parsed font {}x{} with {} glyphs",
            font.width,
            font.height,
            font.glyphs.len()
        );
        Ok(font)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn horizontal_space(&self) -> i32 {
        self.horizontal_space
    }

    pub fn vertical_space(&self) -> i32 {
        self.vertical_space
    }

    pub fn glyph(&self, c: char) -> Option<&[Polygon]> {
        self.glyphs.get(&c.to_ascii_uppercase()).map(Vec::as_slice)
    }

    /// Horizontal distance from one glyph origin to the next
    pub fn advance(&self, scale: i32) -> i32 {
        self.width * scale + self.horizontal_space
    }

    /// Width of the longest line of `text` in pixels
    pub fn text_width(&self, text: &str, scale: i32) -> i32 {
        text.lines()
            .map(|line| line.chars().count() as i32)
            .max()
            .map_or(0, |n| (n * self.advance(scale) - self.horizontal_space).max(0))
    }

    /// Render `text` with its first glyph's top-left at `origin`
    ///
    /// Each glyph's outer polygon is filled with `fill`, its counters with `background`,
    /// and every outline uses `border`. Spaces advance the pen; characters without a
    /// glyph are skipped the same way. Newlines start a new line.
    pub fn render_text(
        &self,
        surface: &mut PixelSurface,
        text: &str,
        origin: Point,
        border: Color,
        fill: Color,
        background: Color,
        scale: i32,
        top_left: Point,
        bottom_right: Point,
    ) {
        let line_advance = self.height * scale + self.vertical_space;
        for (row, line) in text.lines().enumerate() {
            let y = origin.y + row as i32 * line_advance;
            for (col, c) in line.chars().enumerate() {
                let Some(polygons) = self.glyph(c) else {
                    continue;
                };
                let x = origin.x + col as i32 * self.advance(scale);
                for (j, polygon) in polygons.iter().enumerate() {
                    let color = if j == 0 { fill } else { background };
                    surface.draw_rastered_polygon(
                        &polygon.scaled(Point::ORIGIN, scale as f64),
                        border,
                        color,
                        top_left,
                        bottom_right,
                        x,
                        y,
                    );
                }
            }
        }
    }
}
