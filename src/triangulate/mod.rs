//! Triangle sources.
//!
//! Random mode samples free-standing triangles with [`PointSampler`]. Uniform
//! mode asks a [`MeshProvider`] for a proper triangulation, either computed
//! in-process ([`DelaunayMeshProvider`]) or by an external program
//! ([`ExternalMeshProvider`]).

mod delaunay;
mod external;
mod random;

use std::path::Path;

use image::RgbaImage;

use crate::error::Result;
use crate::types::Mesh;

pub use delaunay::{triangulate, DelaunayMeshProvider, DEFAULT_SAMPLES};
pub use external::{ExternalMeshProvider, DEFAULT_RESULT_FILE};
pub use random::{EdgeBounds, OffsetSigns, PointSampler, TRIANGLE_RATIO};

/// Something that can triangulate a source image.
pub trait MeshProvider {
    /// Short name for status output.
    fn name(&self) -> &str;

    /// Produce a mesh covering `source`, which was decoded from `source_path`.
    fn mesh(&self, source_path: &Path, source: &RgbaImage) -> Result<Mesh>;
}
