//! Midpoint circle algorithm

use crate::color::Color;
use crate::display::PixelSurface;
use crate::shapes::Point;

/// Step the midpoint algorithm through the first octant.
///
/// Calls `visit(x, y)` once per step after the axis step (y = 0), stopping as soon as
/// the walk crosses the diagonal. The decision variable starts at `1 - radius`.
fn walk_octant(radius: i32, mut visit: impl FnMut(i32, i32)) {
    let mut x = radius;
    let mut y = 0;
    let mut p = 1 - radius;
    while x > y {
        y += 1;
        if p <= 0 {
            // midpoint inside or on the circle
            p += 2 * y + 1;
        } else {
            x -= 1;
            p += 2 * y - 2 * x + 1;
        }
        if x < y {
            break;
        }
        visit(x, y);
    }
}

impl PixelSurface {
    /// Draw a 1px circle outline. A radius of zero or less plots just the center.
    pub fn draw_circle(&mut self, center: Point, radius: i32, color: Color) {
        if radius <= 0 {
            self.set_pixel(center, color);
            return;
        }

        let (cx, cy) = (center.x, center.y);
        self.set_pixel(Point::new(cx + radius, cy), color);
        self.set_pixel(Point::new(cx - radius, cy), color);
        self.set_pixel(Point::new(cx, cy + radius), color);
        self.set_pixel(Point::new(cx, cy - radius), color);

        walk_octant(radius, |x, y| {
            self.set_pixel(Point::new(cx + x, cy + y), color);
            self.set_pixel(Point::new(cx - x, cy + y), color);
            self.set_pixel(Point::new(cx + x, cy - y), color);
            self.set_pixel(Point::new(cx - x, cy - y), color);
            // on the diagonal the mirrored octant is the same four pixels
            if x != y {
                self.set_pixel(Point::new(cx + y, cy + x), color);
                self.set_pixel(Point::new(cx - y, cy + x), color);
                self.set_pixel(Point::new(cx + y, cy - x), color);
                self.set_pixel(Point::new(cx - y, cy - x), color);
            }
        });
    }

    /// Draw a filled circle: horizontal spans in `fill`, then the outline in `border`
    pub fn draw_filled_circle(&mut self, center: Point, radius: i32, border: Color, fill: Color) {
        if radius > 0 {
            let (cx, cy) = (center.x, center.y);
            self.draw_line(Point::new(cx + radius, cy), Point::new(cx - radius, cy), fill);
            self.draw_line(Point::new(cx, cy + radius), Point::new(cx, cy - radius), fill);

            walk_octant(radius, |x, y| {
                self.draw_line(Point::new(cx + x, cy + y), Point::new(cx - x, cy + y), fill);
                self.draw_line(Point::new(cx + x, cy - y), Point::new(cx - x, cy - y), fill);
                if x != y {
                    self.draw_line(Point::new(cx + y, cy + x), Point::new(cx - y, cy + x), fill);
                    self.draw_line(Point::new(cx + y, cy - x), Point::new(cx - y, cy - x), fill);
                }
            });
        } else {
            self.set_pixel(center, fill);
        }
        self.draw_circle(center, radius, border);
    }
}
