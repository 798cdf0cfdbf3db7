//! Cohen-Sutherland line clipping against an arbitrary rectangle

use crate::color::Color;
use crate::display::PixelSurface;
use crate::shapes::Point;

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// Each pass moves one endpoint onto a boundary it violated; four boundaries per
/// endpoint bounds the loop well below this.
const MAX_ITERATIONS: u32 = 16;

fn outcode(p: Point, top_left: Point, bottom_right: Point) -> u8 {
    let mut code = INSIDE;
    if p.x < top_left.x {
        code |= LEFT;
    } else if p.x > bottom_right.x {
        code |= RIGHT;
    }
    if p.y < top_left.y {
        code |= TOP;
    } else if p.y > bottom_right.y {
        code |= BOTTOM;
    }
    code
}

/// Clip a segment to the inclusive rectangle `[top_left, bottom_right]`.
///
/// Returns the visible part, or None when the segment misses the rectangle.
/// Boundary intersections use truncating integer division.
pub fn clip_segment(
    p1: Point,
    p2: Point,
    top_left: Point,
    bottom_right: Point,
) -> Option<(Point, Point)> {
    let (mut a, mut b) = (p1, p2);
    let mut code_a = outcode(a, top_left, bottom_right);
    let mut code_b = outcode(b, top_left, bottom_right);

    for _ in 0..MAX_ITERATIONS {
        if (code_a | code_b) == 0 {
            return Some((a, b));
        }
        if (code_a & code_b) != 0 {
            return None;
        }

        let code_out = if code_a != 0 { code_a } else { code_b };

        // Interpolate in i128: delta times boundary distance can exceed i64 at the i32 extremes
        let (x1, y1) = (i128::from(a.x), i128::from(a.y));
        let dx = i128::from(b.x) - x1;
        let dy = i128::from(b.y) - y1;

        let p = if (code_out & BOTTOM) != 0 {
            let y = i128::from(bottom_right.y);
            Point::new((x1 + dx * (y - y1) / dy) as i32, bottom_right.y)
        } else if (code_out & TOP) != 0 {
            let y = i128::from(top_left.y);
            Point::new((x1 + dx * (y - y1) / dy) as i32, top_left.y)
        } else if (code_out & RIGHT) != 0 {
            let x = i128::from(bottom_right.x);
            Point::new(bottom_right.x, (y1 + dy * (x - x1) / dx) as i32)
        } else {
            let x = i128::from(top_left.x);
            Point::new(top_left.x, (y1 + dy * (x - x1) / dx) as i32)
        };

        if code_out == code_a {
            a = p;
            code_a = outcode(a, top_left, bottom_right);
        } else {
            b = p;
            code_b = outcode(b, top_left, bottom_right);
        }
    }

    None
}

impl PixelSurface {
    /// Draw only the part of a line that lies inside `[top_left, bottom_right]`
    pub fn clip_line(
        &mut self,
        p1: Point,
        p2: Point,
        top_left: Point,
        bottom_right: Point,
        color: Color,
    ) {
        if let Some((a, b)) = clip_segment(p1, p2, top_left, bottom_right) {
            self.draw_line(a, b, color);
        }
    }
}
