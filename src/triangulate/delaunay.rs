//! Incremental Bowyer-Watson Delaunay triangulation.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use image::RgbaImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::Result;
use crate::types::Mesh;

use super::MeshProvider;

/// Point count the uniform effect triangulates by default.
pub const DEFAULT_SAMPLES: usize = 5000;

/// Triangulate integer points.
///
/// Duplicate points are dropped before triangulating; the returned mesh
/// lists only the unique points, in first-seen order. Fewer than three
/// unique points, or all points collinear, gives a mesh with no simplices.
pub fn triangulate(points: &[[i32; 2]]) -> Mesh {
    let mut seen = HashSet::new();
    let unique: Vec<[i32; 2]> = points.iter().copied().filter(|p| seen.insert(*p)).collect();

    let simplices = if unique.len() < 3 {
        Vec::new()
    } else {
        bowyer_watson(&unique)
    };

    Mesh {
        points: unique,
        simplices,
    }
}

type P = (i64, i64);

/// Twice the signed area of `abc`; positive when counter-clockwise.
fn orient(a: P, b: P, c: P) -> i128 {
    (b.0 - a.0) as i128 * (c.1 - a.1) as i128 - (b.1 - a.1) as i128 * (c.0 - a.0) as i128
}

/// Whether `d` lies strictly inside the circumcircle of the
/// counter-clockwise triangle `abc`. Exact for the coordinate range used here.
fn in_circle(a: P, b: P, c: P, d: P) -> bool {
    let (adx, ady) = ((a.0 - d.0) as i128, (a.1 - d.1) as i128);
    let (bdx, bdy) = ((b.0 - d.0) as i128, (b.1 - d.1) as i128);
    let (cdx, cdy) = ((c.0 - d.0) as i128, (c.1 - d.1) as i128);

    let det = (adx * adx + ady * ady) * (bdx * cdy - cdx * bdy)
        - (bdx * bdx + bdy * bdy) * (adx * cdy - cdx * ady)
        + (cdx * cdx + cdy * cdy) * (adx * bdy - bdx * ady);
    det > 0
}

#[derive(Debug, Clone, Copy)]
struct Face {
    /// Vertex indices in counter-clockwise order.
    v: [usize; 3],
    degenerate: bool,
}

impl Face {
    fn new(v: [usize; 3], pts: &[P]) -> Self {
        let o = orient(pts[v[0]], pts[v[1]], pts[v[2]]);
        let v = if o < 0 { [v[0], v[2], v[1]] } else { v };
        Self {
            v,
            degenerate: o == 0,
        }
    }

    fn encloses(&self, p: P, pts: &[P]) -> bool {
        !self.degenerate && in_circle(pts[self.v[0]], pts[self.v[1]], pts[self.v[2]], p)
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.v;
        [ordered(a, b), ordered(b, c), ordered(c, a)]
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

fn bowyer_watson(points: &[[i32; 2]]) -> Vec<[usize; 3]> {
    let n = points.len();
    let mut pts: Vec<P> = points.iter().map(|p| (p[0] as i64, p[1] as i64)).collect();

    let (mut min_x, mut min_y) = (i64::MAX, i64::MAX);
    let (mut max_x, mut max_y) = (i64::MIN, i64::MIN);
    for &(x, y) in &pts {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    // Super triangle at indices n..n+3. It must sit outside every
    // circumcircle of a thin hull triangle (radius up to ~span^3), or hull
    // faces go missing. The cap keeps in_circle inside i128.
    let span = (max_x - min_x).max(max_y - min_y).max(1);
    let reach = (4 * span.min(512).pow(3)).clamp(16, 1 << 29);
    let (mid_x, mid_y) = ((min_x + max_x) / 2, (min_y + max_y) / 2);
    pts.push((mid_x - reach, mid_y - reach));
    pts.push((mid_x + reach, mid_y - reach));
    pts.push((mid_x, mid_y + reach));

    let mut faces = vec![Face::new([n, n + 1, n + 2], &pts)];

    for i in 0..n {
        let p = pts[i];

        let (bad, good): (Vec<Face>, Vec<Face>) =
            faces.into_iter().partition(|f| f.encloses(p, &pts));
        faces = good;

        // Cavity boundary: edges belonging to exactly one removed face.
        let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
        for face in &bad {
            for edge in face.edges() {
                *edge_count.entry(edge).or_insert(0) += 1;
            }
        }

        for ((a, b), count) in edge_count {
            if count == 1 {
                faces.push(Face::new([a, b, i], &pts));
            }
        }
    }

    let mut simplices: Vec<[usize; 3]> = faces
        .into_iter()
        .filter(|f| !f.degenerate && f.v.iter().all(|&v| v < n))
        .map(|f| f.v)
        .collect();
    simplices.sort_unstable();

    debug!(points = n, triangles = simplices.len(), "delaunay triangulation");
    simplices
}

/// Triangulates uniformly scattered points in-process.
///
/// The image corners are always included so the mesh spans the whole image.
#[derive(Debug, Clone)]
pub struct DelaunayMeshProvider {
    samples: usize,
    seed: Option<u64>,
}

impl DelaunayMeshProvider {
    pub fn new(samples: usize) -> Self {
        Self {
            samples,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Uniform random points over the image plus its four corners.
    pub fn scatter(&self, width: u32, height: u32) -> Vec<[i32; 2]> {
        if width == 0 || height == 0 {
            return Vec::new();
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let (w, h) = (width as i32 - 1, height as i32 - 1);
        let mut points = vec![[0, 0], [w, 0], [0, h], [w, h]];
        points.extend((0..self.samples).map(|_| {
            [
                rng.gen_range(0..width) as i32,
                rng.gen_range(0..height) as i32,
            ]
        }));
        points
    }
}

impl Default for DelaunayMeshProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLES)
    }
}

impl MeshProvider for DelaunayMeshProvider {
    fn name(&self) -> &str {
        "delaunay"
    }

    fn mesh(&self, _source_path: &Path, source: &RgbaImage) -> Result<Mesh> {
        let (width, height) = source.dimensions();
        Ok(triangulate(&self.scatter(width, height)))
    }
}
