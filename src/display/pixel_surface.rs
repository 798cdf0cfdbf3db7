use super::FrameSink;
use crate::color::Color;
use crate::shapes::Point;

// ============================================================================
// Utility Functions
// ============================================================================

/// Write ABGR pixel to slice (RGBA8888 little-endian byte order)
#[inline]
fn write_pixel(dest: &mut [u8], color: Color) {
    dest[0] = 255; // A
    dest[1] = color.b;
    dest[2] = color.g;
    dest[3] = color.r;
}

#[inline]
fn read_pixel(src: &[u8]) -> Color {
    Color::rgb(src[3], src[2], src[1])
}

// ============================================================================
// PixelSurface
// ============================================================================

/// Fixed-size RGB canvas that every rasterizer draws into
///
/// Pixels are stored as RGBA8888 so a window sink can upload the bytes untouched.
/// All writes are bounds checked: geometry that lands off the surface is dropped
/// silently, which is the normal case for transformed or clipped shapes.
pub struct PixelSurface {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelSurface {
    /// Create a surface cleared to black
    pub fn new(width: u32, height: u32) -> Self {
        let mut surface = Self {
            pixels: vec![0; width as usize * height as usize * 4],
            width,
            height,
        };
        surface.clear();
        surface
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bottom-right pixel, handy as a clip corner covering the whole surface
    #[inline]
    pub fn bottom_right(&self) -> Point {
        Point::new(self.width as i32 - 1, self.height as i32 - 1)
    }

    #[inline]
    fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && (p.x as i64) < self.width as i64 && p.y >= 0 && (p.y as i64) < self.height as i64
    }

    /// Calculate byte offset for an in-bounds pixel
    #[inline]
    fn pixel_index(&self, p: Point) -> usize {
        (p.y as usize * self.width as usize + p.x as usize) * 4
    }

    /// Set every pixel to black
    pub fn clear(&mut self) {
        self.fill(Color::BLACK);
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: Color) {
        for px in self.pixels.chunks_exact_mut(4) {
            write_pixel(px, color);
        }
    }

    /// Set a single pixel (bounds checked, silently ignores off-surface points)
    #[inline]
    pub fn set_pixel(&mut self, p: Point, color: Color) {
        if self.in_bounds(p) {
            let idx = self.pixel_index(p);
            write_pixel(&mut self.pixels[idx..idx + 4], color);
        }
    }

    /// Read a pixel. Returns None if the point is off the surface.
    #[inline]
    pub fn get_pixel(&self, p: Point) -> Option<Color> {
        if self.in_bounds(p) {
            let idx = self.pixel_index(p);
            Some(read_pixel(&self.pixels[idx..idx + 4]))
        } else {
            None
        }
    }

    /// Read a pixel, answering [`Color::BLACK`] for off-surface points
    ///
    /// Black doubles as the out-of-range sentinel; use [`get_pixel`](Self::get_pixel)
    /// when the two cases must be told apart.
    #[inline]
    pub fn pixel_color(&self, p: Point) -> Color {
        self.get_pixel(p).unwrap_or(Color::BLACK)
    }

    /// Raw RGBA8888 bytes, row-major, `width * 4` bytes per row
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Iterate rows of colors, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Color> + '_> + '_ {
        let stride = self.width as usize * 4;
        self.pixels
            .chunks_exact(stride.max(4))
            .take(self.height as usize)
            .map(|row| row.chunks_exact(4).map(read_pixel))
    }

    /// Push the finished frame to a sink (window, file, device adapter)
    pub fn display(&self, sink: &mut dyn FrameSink) -> Result<(), String> {
        sink.commit(self)
    }
}
