//! Integer software rasterizer
//!
//! Everything draws into a [`PixelSurface`]: Bresenham lines, scanline-filled polygons and
//! sprites, Cohen-Sutherland clipping, midpoint circles and [`View`] viewports that map a
//! window of sprite space onto a framed rectangle. Finished frames leave through a
//! [`FrameSink`].

pub mod color;
pub mod display;
pub mod input;
pub mod logging;
pub mod raster;
pub mod shapes;
pub mod view;

pub use color::Color;
pub use display::{FrameSink, PixelSurface, PpmSink};
pub use shapes::{Font, Point, Polygon, Scene, Sprite};
pub use view::View;

/// Block font covering the letters the demo needs
pub const BLOCK_FONT: &str = include_str!("../assets/font.txt");
