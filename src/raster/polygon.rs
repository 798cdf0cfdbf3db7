//! Polygon outlines, scanline-filled polygons and sprites

use super::line::{first_step_at, is_x_major, minor_offset};
use crate::color::Color;
use crate::display::PixelSurface;
use crate::shapes::{Point, Polygon, Sprite};

/// Per-scanline edge crossings for rows `first..=last`
///
/// Rows outside the range are dropped on push, which keeps the table bounded by the
/// clip rectangle even when a transformed polygon reaches far off the surface.
struct ScanlineTable {
    first: i32,
    rows: Vec<Vec<i32>>,
}

impl ScanlineTable {
    fn new(first: i32, last: i32) -> Self {
        let len = if last >= first {
            (i64::from(last) - i64::from(first) + 1) as usize
        } else {
            0
        };
        Self {
            first,
            rows: vec![Vec::new(); len],
        }
    }

    #[inline]
    fn push(&mut self, y: i32, x: i32) {
        let idx = y as i64 - self.first as i64;
        if idx >= 0 {
            if let Some(row) = self.rows.get_mut(idx as usize) {
                row.push(x);
            }
        }
    }

    /// Last row held by the table
    fn last(&self) -> i64 {
        i64::from(self.first) + self.rows.len() as i64 - 1
    }

    /// Record one crossing per scanline for the edge `start -> end`.
    ///
    /// The crossing is the first pixel of that row met when walking the edge's Bresenham
    /// line from `start`. The row of `end` is left out: it belongs to the next edge, so
    /// every vertex is counted exactly once. Horizontal edges record nothing.
    ///
    /// Only rows inside the table are visited. The stepper position on a row is computed
    /// directly, so cost does not depend on how far the edge reaches off the surface.
    fn add_edge(&mut self, start: Point, end: Point) {
        if start.y == end.y {
            return;
        }
        let (sy, ey) = (i64::from(start.y), i64::from(end.y));
        let (lo, hi) = if ey > sy { (sy, ey - 1) } else { (ey + 1, sy) };
        let lo = lo.max(i64::from(self.first));
        let hi = hi.min(self.last());
        if lo > hi {
            return;
        }

        let dx = (i128::from(end.x) - i128::from(start.x)).abs();
        let dy = (i128::from(end.y) - i128::from(start.y)).abs();

        if is_x_major(start, end) {
            // several pixels per row; the walk runs from the smaller x
            let forward = start.x < end.x;
            let (a, b) = if forward { (start, end) } else { (end, start) };
            let yi: i128 = if b.y > a.y { 1 } else { -1 };
            for y in lo..=hi {
                let m = (i128::from(y) - i128::from(a.y)) * yi;
                let k = if forward {
                    first_step_at(dx, dy, m)
                } else if m == dy {
                    dx
                } else {
                    first_step_at(dx, dy, m + 1) - 1
                };
                self.push(y as i32, (i128::from(a.x) + k) as i32);
            }
        } else {
            let (a, b) = if start.y < end.y { (start, end) } else { (end, start) };
            let xi: i128 = if b.x >= a.x { 1 } else { -1 };
            for y in lo..=hi {
                let k = i128::from(y) - i128::from(a.y);
                self.push(y as i32, (i128::from(a.x) + xi * minor_offset(dy, dx, k)) as i32);
            }
        }
    }
}

/// A vertex is a turning point when the nearest differing neighbours on both sides
/// lie on the same side of it in y. Runs of horizontal edges are looked through, so a
/// flat-topped peak counts as a single turning point at the end of the run.
fn is_turning_point(vertices: &[Point], i: usize) -> bool {
    let n = vertices.len();
    let y = vertices[i].y;
    let next_y = vertices[(i + 1) % n].y;

    let mut j = (i + n - 1) % n;
    while vertices[j].y == y && j != i {
        j = (j + n - 1) % n;
    }
    let prev_y = vertices[j].y;

    prev_y != y && (prev_y > y) == (next_y > y)
}

impl PixelSurface {
    /// Draw a polygon outline with solid lines
    pub fn draw_polygon(&mut self, polygon: &Polygon, color: Color) {
        for (a, b) in polygon.edges() {
            self.draw_line(a, b, color);
        }
    }

    /// Fill a polygon with `fill` and outline it with `border`, clipped to
    /// `[top_left, bottom_right]`, after shifting it by `(x_offset, y_offset)`.
    ///
    /// Crossings are taken from the same Bresenham walk the outline uses; spans are
    /// filled strictly between paired crossings and the outline is drawn last, so the
    /// border always owns the boundary pixels. Passing [`Color::NO_FILL`] as `fill`
    /// draws the outline only.
    pub fn draw_rastered_polygon(
        &mut self,
        polygon: &Polygon,
        border: Color,
        fill: Color,
        top_left: Point,
        bottom_right: Point,
        x_offset: i32,
        y_offset: i32,
    ) {
        let vertices: Vec<Point> = polygon.translated(Point::new(x_offset, y_offset)).vertices;
        let Some(y_min) = vertices.iter().map(|v| v.y).min() else {
            return;
        };
        let y_max = vertices.iter().map(|v| v.y).max().unwrap_or(y_min);

        if y_max > y_min && !fill.is_no_fill() {
            self.fill_scanlines(&vertices, y_min, y_max, fill, top_left, bottom_right);
        }

        let n = vertices.len();
        for i in 0..n {
            let next = (i + 1) % n;
            self.clip_line(vertices[i], vertices[next], top_left, bottom_right, border);
        }
    }

    fn fill_scanlines(
        &mut self,
        vertices: &[Point],
        y_min: i32,
        y_max: i32,
        fill: Color,
        top_left: Point,
        bottom_right: Point,
    ) {
        // The first and last rows only hold vertices and flat edges: pure outline.
        let first = (y_min + 1).max(top_left.y);
        let last = (y_max - 1).min(bottom_right.y);
        if first > last {
            return;
        }

        let mut table = ScanlineTable::new(first, last);
        let n = vertices.len();
        for i in 0..n {
            let (start, end) = (vertices[i], vertices[(i + 1) % n]);
            if start.y == end.y {
                continue;
            }
            table.add_edge(start, end);
            // A peak or valley closes the span it opened: count it twice
            if is_turning_point(vertices, i) {
                table.push(start.y, start.x);
            }
        }

        for (offset, row) in table.rows.iter_mut().enumerate() {
            let y = first + offset as i32;
            row.sort_unstable();
            for pair in row.chunks_exact(2) {
                let (from, to) = (pair[0] + 1, pair[1] - 1);
                if from <= to {
                    self.clip_line(
                        Point::new(from, y),
                        Point::new(to, y),
                        top_left,
                        bottom_right,
                        fill,
                    );
                }
            }
        }
    }

    /// Draw every part of a sprite, clipped to the whole surface
    pub fn draw_sprite(&mut self, sprite: &Sprite, x_offset: i32, y_offset: i32) {
        let bottom_right = self.bottom_right();
        self.draw_clipped_sprite(sprite, Point::ORIGIN, bottom_right, x_offset, y_offset);
    }

    /// Draw every part of a sprite, clipped to `[top_left, bottom_right]`
    pub fn draw_clipped_sprite(
        &mut self,
        sprite: &Sprite,
        top_left: Point,
        bottom_right: Point,
        x_offset: i32,
        y_offset: i32,
    ) {
        for part in &sprite.parts {
            self.draw_rastered_polygon(
                &part.polygon,
                part.border,
                part.fill,
                top_left,
                bottom_right,
                x_offset,
                y_offset,
            );
        }
    }
}
