//! tessera - Low-poly triangle mosaics
//!
//! A library for restyling raster images as overlapping random triangles or
//! a Delaunay mesh, each triangle filled with the dominant colour of the
//! source pixels it covers, optionally snapped to a fixed palette.

pub mod cli;
pub mod effect;
pub mod error;
pub mod output;
pub mod render;
pub mod triangulate;
pub mod types;

pub use effect::{quantize_image, render, Effect, MeshSource, RenderOptions, Rendered};
pub use error::{Result, TesseraError};
pub use render::{
    dominant, load_image, rasterize, write_png, Canvas, CompositeStats, Compositor, Coverage,
};
pub use triangulate::{
    DelaunayMeshProvider, EdgeBounds, ExternalMeshProvider, MeshProvider, OffsetSigns,
    PointSampler,
};
pub use types::{Colour, ColourMetric, Mesh, Palette, Point, Triangle};
