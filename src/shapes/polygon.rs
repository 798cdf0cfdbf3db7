use super::Point;
use serde::{Deserialize, Serialize};

/// A closed polygon defined by its vertices in winding order
///
/// The last vertex always connects back to the first; there is no open-path variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    pub fn from_vertices(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn add_point(&mut self, point: Point) {
        self.vertices.push(point);
    }

    /// Replace the vertex at `idx`. Out-of-range indices are ignored.
    pub fn set_point(&mut self, idx: usize, point: Point) {
        if let Some(v) = self.vertices.get_mut(idx) {
            *v = point;
        }
    }

    pub fn point(&self, idx: usize) -> Option<Point> {
        self.vertices.get(idx).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Edges as `(P[i], P[(i + 1) % n])`, including the closing edge
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Get the bounding box as (top_left, bottom_right)
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.vertices.first()?;
        let (min, max) = self.vertices.iter().fold((first, first), |(min, max), v| {
            (
                Point::new(min.x.min(v.x), min.y.min(v.y)),
                Point::new(max.x.max(v.x), max.y.max(v.y)),
            )
        });
        Some((min, max))
    }

    pub fn translate(&mut self, by: Point) -> &mut Self {
        for v in &mut self.vertices {
            v.translate(by);
        }
        self
    }

    pub fn translated(&self, by: Point) -> Polygon {
        self.map(|v| v.translated(by))
    }

    pub fn scale(&mut self, pivot: Point, factor: f64) -> &mut Self {
        self.scale_xy(pivot, factor, factor)
    }

    pub fn scaled(&self, pivot: Point, factor: f64) -> Polygon {
        self.scaled_xy(pivot, factor, factor)
    }

    pub fn scale_xy(&mut self, pivot: Point, x_factor: f64, y_factor: f64) -> &mut Self {
        for v in &mut self.vertices {
            v.scale_xy(pivot, x_factor, y_factor);
        }
        self
    }

    pub fn scaled_xy(&self, pivot: Point, x_factor: f64, y_factor: f64) -> Polygon {
        self.map(|v| v.scaled_xy(pivot, x_factor, y_factor))
    }

    pub fn rotate(&mut self, pivot: Point, degrees: f64) -> &mut Self {
        for v in &mut self.vertices {
            v.rotate(pivot, degrees);
        }
        self
    }

    pub fn rotated(&self, pivot: Point, degrees: f64) -> Polygon {
        self.map(|v| v.rotated(pivot, degrees))
    }

    fn map(&self, f: impl Fn(Point) -> Point) -> Polygon {
        Polygon::from_vertices(self.vertices.iter().copied().map(f).collect())
    }
}

impl FromIterator<Point> for Polygon {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::from_vertices(iter.into_iter().collect())
    }
}

impl From<&[(i32, i32)]> for Polygon {
    fn from(points: &[(i32, i32)]) -> Self {
        points.iter().map(|&p| Point::from(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::from(&[(0, 0), (10, 0), (10, 10), (0, 10)][..])
    }

    #[test]
    fn test_edges_are_closed() {
        let edges: Vec<_> = square().edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3], (Point::new(0, 10), Point::new(0, 0)));
    }

    #[test]
    fn test_degenerate_edges() {
        assert_eq!(Polygon::new().edges().count(), 0);
        let single = Polygon::from(&[(4, 4)][..]);
        let edges: Vec<_> = single.edges().collect();
        assert_eq!(edges, vec![(Point::new(4, 4), Point::new(4, 4))]);
    }

    #[test]
    fn test_pure_transform_leaves_source_untouched() {
        let original = square();
        let moved = original.translated(Point::new(5, 5));
        assert_eq!(original, square());
        assert_eq!(moved.point(2), Some(Point::new(15, 15)));
    }

    #[test]
    fn test_in_place_matches_pure() {
        let pivot = Point::new(5, 5);
        let pure = square().scaled_xy(pivot, 2.0, 0.5).rotated(pivot, 90.0);
        let mut in_place = square();
        in_place.scale_xy(pivot, 2.0, 0.5).rotate(pivot, 90.0);
        assert_eq!(pure, in_place);
    }

    #[test]
    fn test_bounds() {
        let poly = Polygon::from(&[(3, 9), (-2, 4), (7, -1)][..]);
        assert_eq!(poly.bounds(), Some((Point::new(-2, -1), Point::new(7, 9))));
        assert_eq!(Polygon::new().bounds(), None);
    }

    #[test]
    fn test_set_point_out_of_range_is_ignored() {
        let mut poly = square();
        poly.set_point(1, Point::new(20, 0));
        poly.set_point(99, Point::new(1, 1));
        assert_eq!(poly.point(1), Some(Point::new(20, 0)));
        assert_eq!(poly.len(), 4);
    }
}
