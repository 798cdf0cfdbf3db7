//! Scan conversion over [`PixelSurface`](crate::display::PixelSurface)
//!
//! Every rasterizer is an `impl PixelSurface` block in its own file and works purely in
//! integer arithmetic; off-surface pixels are dropped by `set_pixel`.

mod circle;
mod clip;
pub(crate) mod line;
mod polygon;

pub use clip::clip_segment;
