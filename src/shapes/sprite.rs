use super::{Point, Polygon};
use crate::color::Color;
use serde::{Deserialize, Serialize};

/// One filled polygon of a sprite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub polygon: Polygon,
    pub fill: Color,
    pub border: Color,
}

/// A compound drawable: several colored polygons sharing one coordinate frame
///
/// Parts are drawn in order, so later parts paint over earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    #[serde(default)]
    pub name: String,
    pub parts: Vec<Part>,
}

impl Sprite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
        }
    }

    pub fn add_part(&mut self, polygon: Polygon, fill: Color, border: Color) {
        self.parts.push(Part {
            polygon,
            fill,
            border,
        });
    }

    pub fn with_part(mut self, polygon: Polygon, fill: Color, border: Color) -> Self {
        self.add_part(polygon, fill, border);
        self
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.parts.iter().map(|p| &p.polygon)
    }

    /// Bounding box over every part as (top_left, bottom_right)
    pub fn bounds(&self) -> Option<(Point, Point)> {
        self.polygons()
            .filter_map(Polygon::bounds)
            .reduce(|(a_min, a_max), (b_min, b_max)| {
                (
                    Point::new(a_min.x.min(b_min.x), a_min.y.min(b_min.y)),
                    Point::new(a_max.x.max(b_max.x), a_max.y.max(b_max.y)),
                )
            })
    }

    pub fn translate(&mut self, by: Point) -> &mut Self {
        self.for_each_polygon(|p| {
            p.translate(by);
        })
    }

    pub fn translated(&self, by: Point) -> Sprite {
        let mut result = self.clone();
        result.translate(by);
        result
    }

    pub fn scale(&mut self, pivot: Point, factor: f64) -> &mut Self {
        self.scale_xy(pivot, factor, factor)
    }

    pub fn scaled(&self, pivot: Point, factor: f64) -> Sprite {
        self.scaled_xy(pivot, factor, factor)
    }

    pub fn scale_xy(&mut self, pivot: Point, x_factor: f64, y_factor: f64) -> &mut Self {
        self.for_each_polygon(|p| {
            p.scale_xy(pivot, x_factor, y_factor);
        })
    }

    pub fn scaled_xy(&self, pivot: Point, x_factor: f64, y_factor: f64) -> Sprite {
        let mut result = self.clone();
        result.scale_xy(pivot, x_factor, y_factor);
        result
    }

    pub fn rotate(&mut self, pivot: Point, degrees: f64) -> &mut Self {
        self.for_each_polygon(|p| {
            p.rotate(pivot, degrees);
        })
    }

    pub fn rotated(&self, pivot: Point, degrees: f64) -> Sprite {
        let mut result = self.clone();
        result.rotate(pivot, degrees);
        result
    }

    fn for_each_polygon(&mut self, mut f: impl FnMut(&mut Polygon)) -> &mut Self {
        for part in &mut self.parts {
            f(&mut part.polygon);
        }
        self
    }

    /// Parse the plain-text sprite format
    ///
    /// ```text
    /// <polygon count>
    /// <line count> <fill r> <fill g> <fill b> <border r> <border g> <border b>
    /// dx,dy dx,dy ...      (<line count> lines of relative moves)
    /// ...
    /// ```
    ///
    /// Each `dx,dy` is relative to the previous vertex of the same polygon, starting from
    /// the origin; accumulated positions are truncated to the pixel grid.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, String> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (line_no, header) = lines.next().ok_or("empty sprite file")?;
        let polygon_count: usize = header
            .parse()
            .map_err(|e| format!("line {}: bad polygon count '{}': {}", line_no, header, e))?;

        let mut sprite = Sprite::new(name);
        for index in 0..polygon_count {
            let (line_no, header) = lines
                .next()
                .ok_or_else(|| format!("missing header for polygon {}", index))?;
            let fields: Vec<&str> = header.split_whitespace().collect();
            if fields.len() != 7 {
                return Err(format!(
                    "line {}: expected '<count> r g b r g b', got '{}'",
                    line_no, header
                ));
            }
            let line_count: usize = fields[0]
                .parse()
                .map_err(|e| format!("line {}: bad line count: {}", line_no, e))?;
            let channel = |s: &str| -> Result<u8, String> {
                s.parse::<u8>()
                    .map_err(|e| format!("line {}: bad color component '{}': {}", line_no, s, e))
            };
            let fill = Color::rgb(channel(fields[1])?, channel(fields[2])?, channel(fields[3])?);
            let border = Color::rgb(channel(fields[4])?, channel(fields[5])?, channel(fields[6])?);

            let mut polygon = Polygon::new();
            let (mut acc_x, mut acc_y) = (0.0_f64, 0.0_f64);
            for _ in 0..line_count {
                let (line_no, path) = lines
                    .next()
                    .ok_or_else(|| format!("polygon {}: path ended early", index))?;
                let values = path
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|s| !s.is_empty())
                    .map(|s| {
                        s.parse::<f64>()
                            .map_err(|e| format!("line {}: bad coordinate '{}': {}", line_no, s, e))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if values.len() % 2 != 0 {
                    return Err(format!("line {}: unpaired coordinate", line_no));
                }
                for pair in values.chunks_exact(2) {
                    acc_x += pair[0];
                    acc_y += pair[1];
                    polygon.add_point(Point::new(acc_x as i32, acc_y as i32));
                }
            }
            sprite.add_part(polygon, fill, border);
        }

        log::debug!(
            "parsed sprite '{}' with {} parts",
            sprite.name,
            sprite.parts.len()
        );
        Ok(sprite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARROW: &str = "2
1 255 0 0 255 255 255
0,0 10,0 0,10 -10,0
2 0 0 255 0 0 0
5,5 2.5,0
0,2.5
";

    #[test]
    fn test_parse_accumulates_relative_moves() {
        let sprite = Sprite::parse("arrow", ARROW).unwrap();
        assert_eq!(sprite.len(), 2);

        let first = &sprite.parts[0];
        assert_eq!(first.fill, Color::RED);
        assert_eq!(first.border, Color::WHITE);
        assert_eq!(
            first.polygon.vertices,
            vec![
                Point::new(0, 0),
                Point::new(10, 0),
                Point::new(10, 10),
                Point::new(0, 10)
            ]
        );

        // Accumulation restarts per polygon and spans multiple lines
        let second = &sprite.parts[1];
        assert_eq!(
            second.polygon.vertices,
            vec![Point::new(5, 5), Point::new(7, 5), Point::new(7, 7)]
        );
    }

    #[test]
    fn test_parse_rejects_bad_color() {
        let err = Sprite::parse("bad", "1\n1 256 0 0 0 0 0\n0,0\n").unwrap_err();
        assert!(err.contains("color"), "{}", err);
    }

    #[test]
    fn test_parse_rejects_truncated_path() {
        assert!(Sprite::parse("short", "1\n3 0 0 0 0 0 0\n0,0\n").is_err());
        assert!(Sprite::parse("odd", "1\n1 0 0 0 0 0 0\n0,0 4\n").is_err());
    }

    #[test]
    fn test_transforms_touch_every_part() {
        let sprite = Sprite::parse("arrow", ARROW).unwrap();
        let moved = sprite.translated(Point::new(100, 50));
        assert_eq!(moved.parts[0].polygon.point(0), Some(Point::new(100, 50)));
        assert_eq!(moved.parts[1].polygon.point(0), Some(Point::new(105, 55)));
        // Colors ride along unchanged
        assert_eq!(moved.parts[1].fill, Color::BLUE);
        // Source untouched
        assert_eq!(sprite.parts[0].polygon.point(0), Some(Point::ORIGIN));
    }

    #[test]
    fn test_bounds_span_parts() {
        let sprite = Sprite::parse("arrow", ARROW).unwrap();
        assert_eq!(sprite.bounds(), Some((Point::new(0, 0), Point::new(10, 10))));
        assert_eq!(Sprite::new("empty").bounds(), None);
    }
}
