//! Viewports: map a window of sprite space onto a rectangle of the surface

use crate::color::Color;
use crate::display::PixelSurface;
use crate::shapes::{Point, Sprite};

/// Scale used on an axis whose source window has zero extent
const DEGENERATE_SCALE: f64 = 600.0;

struct Source<'a> {
    sprite: &'a Sprite,
    visible: bool,
}

/// A framed rectangle on the surface showing a scaled window of one or more sprites
///
/// Sources are borrowed, never owned: the sprites must outlive the view, and changes
/// the caller makes to them between frames show up on the next render.
pub struct View<'a> {
    top_left: Point,
    bottom_right: Point,
    border: Color,
    source_top_left: Point,
    source_bottom_right: Point,
    scale: (f64, f64),
    sources: Vec<Source<'a>>,
}

impl<'a> View<'a> {
    /// The source window starts out identical to the destination rectangle
    pub fn new(top_left: Point, bottom_right: Point, border: Color) -> Self {
        let mut view = Self {
            top_left,
            bottom_right,
            border,
            source_top_left: top_left,
            source_bottom_right: bottom_right,
            scale: (1.0, 1.0),
            sources: Vec::new(),
        };
        view.set_source_position(top_left, bottom_right);
        view
    }

    pub fn add_source(&mut self, sprite: &'a Sprite) {
        self.sources.push(Source {
            sprite,
            visible: true,
        });
    }

    /// Flip the visibility of source `idx`; unknown indices are ignored
    pub fn toggle_visible(&mut self, idx: usize) {
        if let Some(source) = self.sources.get_mut(idx) {
            source.visible = !source.visible;
        }
    }

    pub fn is_visible(&self, idx: usize) -> bool {
        self.sources.get(idx).is_some_and(|s| s.visible)
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Choose which window of source space is mapped onto the view
    pub fn set_source_position(&mut self, source_top_left: Point, source_bottom_right: Point) {
        self.source_top_left = source_top_left;
        self.source_bottom_right = source_bottom_right;

        let axis = |dest: i32, src: i32| {
            if src == 0 {
                log::debug!("view source window has zero extent, using fallback scale");
                DEGENERATE_SCALE
            } else {
                dest as f64 / src as f64
            }
        };
        self.scale = (
            axis(
                self.bottom_right.x - self.top_left.x,
                source_bottom_right.x - source_top_left.x,
            ),
            axis(
                self.bottom_right.y - self.top_left.y,
                source_bottom_right.y - source_top_left.y,
            ),
        );
    }

    pub fn bounds(&self) -> (Point, Point) {
        (self.top_left, self.bottom_right)
    }

    /// Per-axis factors from source space to destination space
    pub fn scale_factors(&self) -> (f64, f64) {
        self.scale
    }

    /// Map a source-space point to where it lands on the surface
    pub fn project(&self, p: Point) -> Point {
        let (sx, sy) = self.scale_factors();
        p.scaled_xy(self.source_top_left, sx, sy)
            .translated(self.top_left - self.source_top_left)
    }

    /// Draw every visible source clipped to the view, then the frame
    pub fn render(&self, surface: &mut PixelSurface) {
        if !self.sources.is_empty() {
            let (sx, sy) = self.scale_factors();
            let shift = self.top_left - self.source_top_left;
            for source in self.sources.iter().filter(|s| s.visible) {
                let mut sprite = source.sprite.scaled_xy(self.source_top_left, sx, sy);
                sprite.translate(shift);
                surface.draw_clipped_sprite(&sprite, self.top_left, self.bottom_right, 0, 0);
            }
        }

        let top_right = Point::new(self.bottom_right.x, self.top_left.y);
        let bottom_left = Point::new(self.top_left.x, self.bottom_right.y);
        surface.draw_line(self.top_left, top_right, self.border);
        surface.draw_line(self.top_left, bottom_left, self.border);
        surface.draw_line(self.bottom_right, top_right, self.border);
        surface.draw_line(self.bottom_right, bottom_left, self.border);
    }
}
