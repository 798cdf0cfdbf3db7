//! Bresenham line drawing (solid and dotted)

use crate::color::Color;
use crate::display::PixelSurface;
use crate::shapes::Point;

/// Walk the pixels of a line in increasing major-axis order.
///
/// `visit` receives each pixel together with its step index along the major axis
/// (0 for the first pixel). Axis-aligned lines are walked directly; everything else
/// goes through the x-major ("low") or y-major ("high") stepper with endpoints swapped
/// so the major coordinate increases. Deltas and the error term are `i64`, so any pair
/// of `i32` endpoints is accepted.
pub(crate) fn walk_line(start: Point, end: Point, mut visit: impl FnMut(Point, i64)) {
    if start.x == end.x {
        let (y0, y1) = if start.y < end.y { (start.y, end.y) } else { (end.y, start.y) };
        for y in y0..=y1 {
            visit(Point::new(start.x, y), i64::from(y) - i64::from(y0));
        }
    } else if start.y == end.y {
        let (x0, x1) = if start.x < end.x { (start.x, end.x) } else { (end.x, start.x) };
        for x in x0..=x1 {
            visit(Point::new(x, start.y), i64::from(x) - i64::from(x0));
        }
    } else if is_x_major(start, end) {
        if start.x > end.x {
            walk_low(end, start, visit);
        } else {
            walk_low(start, end, visit);
        }
    } else if start.y > end.y {
        walk_high(end, start, visit);
    } else {
        walk_high(start, end, visit);
    }
}

/// True when a line steps once per x (|dy| < |dx|)
#[inline]
pub(crate) fn is_x_major(start: Point, end: Point) -> bool {
    (i64::from(end.y) - i64::from(start.y)).abs() < (i64::from(end.x) - i64::from(start.x)).abs()
}

/// Gentle slope (|m| < 1): one pixel per x, y follows the error term
fn walk_low(start: Point, end: Point, mut visit: impl FnMut(Point, i64)) {
    let dx = i64::from(end.x) - i64::from(start.x);
    let mut dy = i64::from(end.y) - i64::from(start.y);
    let yi = if dy < 0 {
        dy = -dy;
        -1
    } else {
        1
    };

    let mut p = 2 * dy - dx;
    let mut y = start.y;
    for x in start.x..=end.x {
        visit(Point::new(x, y), i64::from(x) - i64::from(start.x));
        if p > 0 {
            y += yi;
            p -= 2 * dx;
        }
        p += 2 * dy;
    }
}

/// Steep slope (|m| >= 1): one pixel per y, x follows the error term
fn walk_high(start: Point, end: Point, mut visit: impl FnMut(Point, i64)) {
    let mut dx = i64::from(end.x) - i64::from(start.x);
    let dy = i64::from(end.y) - i64::from(start.y);
    let xi = if dx < 0 {
        dx = -dx;
        -1
    } else {
        1
    };

    let mut p = 2 * dx - dy;
    let mut x = start.x;
    for y in start.y..=end.y {
        visit(Point::new(x, y), i64::from(y) - i64::from(start.y));
        if p > 0 {
            x += xi;
            p -= 2 * dy;
        }
        p += 2 * dx;
    }
}

/// Minor-axis offset of the stepper after `k` major steps, without walking.
///
/// `major > 0` and `minor <= major` are the absolute extents. Matches `walk_low` /
/// `walk_high` exactly: the error term after step `k` is `2*minor*(k+1) - major - 2*major*m`.
#[inline]
pub(crate) fn minor_offset(major: i128, minor: i128, k: i128) -> i128 {
    (2 * minor * k + major - 1).div_euclid(2 * major)
}

/// First major step whose minor offset reaches `m` (`0 <= m <= minor`, `minor > 0`)
#[inline]
pub(crate) fn first_step_at(major: i128, minor: i128, m: i128) -> i128 {
    let num = 2 * major * m - major + 1;
    let den = 2 * minor;
    (num.div_euclid(den) + i128::from(num.rem_euclid(den) != 0)).max(0)
}

impl PixelSurface {
    /// Draw a line from `start` to `end` (both endpoints inclusive)
    pub fn draw_line(&mut self, start: Point, end: Point, color: Color) {
        walk_line(start, end, |p, _| self.set_pixel(p, color));
    }

    /// Draw a dashed line: runs of `interval` pixels alternate between drawn and skipped,
    /// starting with a drawn run at the endpoint with the smaller major coordinate.
    ///
    /// `interval` must be at least 1.
    pub fn draw_dotted_line(&mut self, start: Point, end: Point, color: Color, interval: i32) {
        debug_assert!(interval >= 1, "dotted line interval must be >= 1, got {}", interval);
        let interval = i64::from(interval.max(1));
        let mut draw = false;
        walk_line(start, end, |p, step| {
            if step % interval == 0 {
                draw = !draw;
            }
            if draw {
                self.set_pixel(p, color);
            }
        });
    }
}

#[cfg(test)]
pub(crate) fn lit_pixels(surface: &PixelSurface, color: Color) -> Vec<Point> {
    let mut lit = Vec::new();
    for y in 0..surface.height() as i32 {
        for x in 0..surface.width() as i32 {
            if surface.get_pixel(Point::new(x, y)) == Some(color) {
                lit.push(Point::new(x, y));
            }
        }
    }
    lit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_pixels(a: Point, b: Point) -> Vec<Point> {
        let mut surface = PixelSurface::new(32, 32);
        surface.draw_line(a, b, Color::WHITE);
        lit_pixels(&surface, Color::WHITE)
    }

    fn walked(a: Point, b: Point) -> Vec<Point> {
        let mut out = Vec::new();
        walk_line(a, b, |p, _| out.push(p));
        out
    }

    #[test]
    fn test_classic_bresenham_sequence() {
        let expected: Vec<Point> = [(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]
            .iter()
            .map(|&p| Point::from(p))
            .collect();
        assert_eq!(walked(Point::new(0, 0), Point::new(5, 2)), expected);
    }

    #[test]
    fn test_argument_order_does_not_matter() {
        let c = Point::new(10, 10);
        let cases = [
            (c, Point::new(20, 10)),
            (c, Point::new(10, 25)),
            (c, Point::new(0, 10)),
            (c, Point::new(10, 0)),
            (c, Point::new(20, 20)),
            (c, Point::new(0, 20)),
            (c, Point::new(20, 0)),
            (c, Point::new(0, 0)),
        ];
        for (a, b) in cases {
            assert_eq!(line_pixels(a, b), line_pixels(b, a), "{:?} -> {:?}", a, b);
        }
    }

    #[test]
    fn test_endpoints_are_inclusive() {
        for (a, b) in [
            (Point::new(1, 1), Point::new(17, 6)),
            (Point::new(3, 29), Point::new(9, 2)),
            (Point::new(30, 4), Point::new(2, 11)),
        ] {
            let px = line_pixels(a, b);
            assert!(px.contains(&a) && px.contains(&b), "{:?} -> {:?}", a, b);
        }
    }

    #[test]
    fn test_one_pixel_per_major_step() {
        let px = walked(Point::new(2, 3), Point::new(8, 30));
        assert_eq!(px.len(), 28);
        for (i, p) in px.iter().enumerate() {
            assert_eq!(p.y, 3 + i as i32);
        }
    }

    #[test]
    fn test_zero_length_line_plots_one_pixel() {
        assert_eq!(line_pixels(Point::new(4, 4), Point::new(4, 4)), vec![Point::new(4, 4)]);
    }

    #[test]
    fn test_dotted_interval_one_alternates() {
        let (a, b) = (Point::new(0, 0), Point::new(13, 5));
        let solid = walked(a, b);

        let mut surface = PixelSurface::new(32, 32);
        surface.draw_dotted_line(a, b, Color::WHITE, 1);
        let dotted = lit_pixels(&surface, Color::WHITE);

        let expected: Vec<Point> = solid.iter().copied().step_by(2).collect();
        let mut expected_sorted = expected.clone();
        expected_sorted.sort_by_key(|p| (p.y, p.x));
        assert_eq!(dotted, expected_sorted);
    }

    #[test]
    fn test_dotted_runs_of_interval() {
        let mut surface = PixelSurface::new(32, 4);
        surface.draw_dotted_line(Point::new(20, 1), Point::new(0, 1), Color::RED, 3);
        let xs: Vec<i32> = lit_pixels(&surface, Color::RED).iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0, 1, 2, 6, 7, 8, 12, 13, 14, 18, 19, 20]);
    }

    #[test]
    fn test_closed_form_matches_stepper() {
        for dx in 1..40 {
            for dy in 0..40 {
                let end = Point::new(dx, dy);
                let x_major = is_x_major(Point::ORIGIN, end);
                let (major, minor) = if x_major { (dx, dy) } else { (dy, dx) };
                walk_line(Point::ORIGIN, end, |p, k| {
                    let (along, across) = if x_major { (p.x, p.y) } else { (p.y, p.x) };
                    assert_eq!(i64::from(along), k);
                    let m = minor_offset(i128::from(major), i128::from(minor), i128::from(k));
                    assert_eq!(m, i128::from(across), "{:?} step {}", end, k);
                    if minor > 0 {
                        let (maj, min) = (i128::from(major), i128::from(minor));
                        assert!(first_step_at(maj, min, m) <= i128::from(k));
                        if m < min {
                            assert!(first_step_at(maj, min, m + 1) > i128::from(k));
                        }
                    }
                });
            }
        }
    }

    #[test]
    fn test_extreme_endpoints_classify_without_overflow() {
        assert!(is_x_major(Point::new(i32::MIN, 0), Point::new(i32::MAX, 1)));
        assert!(!is_x_major(Point::new(0, i32::MAX), Point::new(1, i32::MIN)));
        assert_eq!(minor_offset(u32::MAX as i128, 2, u32::MAX as i128), 2);
    }

    #[test]
    fn test_off_surface_pixels_are_dropped() {
        let mut surface = PixelSurface::new(8, 8);
        surface.draw_line(Point::new(-5, 3), Point::new(20, 3), Color::GREEN);
        assert_eq!(lit_pixels(&surface, Color::GREEN).len(), 8);
    }
}
