//! Rendering module for tessera.
//!
//! This module handles turning triangles into painted pixels: scanline
//! rasterization, dominant colour selection, and compositing onto the canvas.

mod canvas;
mod compositor;
mod dominant;
mod png;
mod raster;

pub use canvas::Canvas;
pub use compositor::{default_jobs, CompositeStats, Compositor, Stroke};
pub use dominant::dominant;
pub use png::{load_image, write_png};
pub use raster::{rasterize, Coverage};
