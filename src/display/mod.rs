mod pixel_surface;
#[cfg(feature = "window")]
mod window;

pub use pixel_surface::PixelSurface;
#[cfg(feature = "window")]
pub use window::{Display, InputEvent, MouseButtonKind, RenderTarget, WindowSink};

use std::io::Write;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

/// Receives a finished frame once per frame
///
/// This is the only seam between the rasterizer and a physical output. Implementations
/// copy the surface somewhere (a window texture, a file, a memory-mapped device) and
/// must not keep a reference to it.
pub trait FrameSink {
    fn commit(&mut self, surface: &PixelSurface) -> Result<(), String>;
}

/// Writes every committed frame as a binary PPM (P6) image
pub struct PpmSink<W: Write> {
    out: W,
    frames: usize,
}

impl<W: Write> PpmSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Number of frames written so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for PpmSink<W> {
    fn commit(&mut self, surface: &PixelSurface) -> Result<(), String> {
        let mut data = Vec::with_capacity(surface.width() as usize * surface.height() as usize * 3 + 32);
        write!(data, "P6\n{} {}\n255\n", surface.width(), surface.height())
            .map_err(|e| e.to_string())?;
        for row in surface.rows() {
            for c in row {
                data.extend_from_slice(&[c.r, c.g, c.b]);
            }
        }
        self.out
            .write_all(&data)
            .and_then(|()| self.out.flush())
            .map_err(|e| format!("Failed to write PPM frame: {}", e))?;
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::shapes::Point;

    #[test]
    fn test_ppm_header_and_payload() {
        let mut surface = PixelSurface::new(2, 2);
        surface.set_pixel(Point::new(1, 1), Color::rgb(1, 2, 3));

        let mut sink = PpmSink::new(Vec::new());
        surface.display(&mut sink).unwrap();
        assert_eq!(sink.frames(), 1);

        let bytes = sink.into_inner();
        let header = b"P6\n2 2\n255\n";
        assert_eq!(&bytes[..header.len()], header);
        let payload = &bytes[header.len()..];
        assert_eq!(payload.len(), 12);
        assert_eq!(&payload[9..12], &[1, 2, 3]);
        assert!(payload[..9].iter().all(|&b| b == 0));
    }
}
