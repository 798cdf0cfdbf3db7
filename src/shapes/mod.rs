mod font;
mod polygon;
mod scene;
mod sprite;

pub use font::Font;
pub use polygon::Polygon;
pub use scene::{Placement, Scene};
pub use sprite::{Part, Sprite};

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point on the integer pixel grid
///
/// Transforms come in two flavours with identical math: `translate`/`scale`/`rotate`
/// mutate in place and return `&mut Self` for chaining, while `translated`/`scaled`/
/// `rotated` leave the receiver alone and return a new point. Results of scaling and
/// rotation are truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn translate(&mut self, by: Point) -> &mut Self {
        self.x += by.x;
        self.y += by.y;
        self
    }

    pub fn translated(self, by: Point) -> Point {
        Point::new(self.x + by.x, self.y + by.y)
    }

    /// Uniform scale about `pivot`
    pub fn scale(&mut self, pivot: Point, factor: f64) -> &mut Self {
        self.scale_xy(pivot, factor, factor)
    }

    pub fn scaled(self, pivot: Point, factor: f64) -> Point {
        self.scaled_xy(pivot, factor, factor)
    }

    /// Per-axis scale about `pivot`. A zero factor collapses that axis onto the pivot.
    pub fn scale_xy(&mut self, pivot: Point, x_factor: f64, y_factor: f64) -> &mut Self {
        *self = self.scaled_xy(pivot, x_factor, y_factor);
        self
    }

    pub fn scaled_xy(self, pivot: Point, x_factor: f64, y_factor: f64) -> Point {
        Point::new(
            (pivot.x as f64 + (self.x - pivot.x) as f64 * x_factor) as i32,
            (pivot.y as f64 + (self.y - pivot.y) as f64 * y_factor) as i32,
        )
    }

    /// Rotate by `degrees` about `pivot` (clockwise on screen, since y grows downward)
    pub fn rotate(&mut self, pivot: Point, degrees: f64) -> &mut Self {
        *self = self.rotated(pivot, degrees);
        self
    }

    pub fn rotated(self, pivot: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = (self.x - pivot.x) as f64;
        let dy = (self.y - pivot.y) as f64;
        Point::new(
            (pivot.x as f64 + dx * cos - dy * sin) as i32,
            (pivot.y as f64 + dy * cos + dx * sin) as i32,
        )
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        self.translated(rhs)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
