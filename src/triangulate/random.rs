//! Random triangle sampling.
//!
//! Each triangle is an anchor point anywhere in the image plus two companion
//! vertices offset from it on both axes. Triangles are independent: they may
//! overlap, leave the image, or collapse to zero area.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::types::{Point, Triangle};

/// Calibrates triangle count to the image aspect ratio.
pub const TRIANGLE_RATIO: f64 = 0.00001708897089;

/// Range of companion offset magnitudes: `[min, min + span)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeBounds {
    pub min: i32,
    pub span: i32,
}

impl EdgeBounds {
    /// Bounds for the random triangulation effect.
    pub const DEFAULT: Self = Self { min: 5, span: 60 };

    /// Nearly fixed-length edges for the line effect.
    pub const LINES: Self = Self { min: 60, span: 1 };

    pub const fn new(min: i32, span: i32) -> Self {
        Self { min, span }
    }
}

impl Default for EdgeBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How companion offsets pick their direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetSigns {
    /// Fair coin flip per axis.
    #[default]
    Random,
    /// Always subtract: companions sit up and to the left of the anchor.
    AlwaysNegative,
}

/// Generates independent random triangles over an image.
#[derive(Debug, Clone)]
pub struct PointSampler {
    bounds: EdgeBounds,
    signs: OffsetSigns,
    rng: StdRng,
}

impl PointSampler {
    /// Create a sampler seeded from system entropy.
    pub fn new(bounds: EdgeBounds) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Create a reproducible sampler.
    pub fn seeded(bounds: EdgeBounds, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: EdgeBounds, rng: StdRng) -> Self {
        Self {
            bounds: EdgeBounds {
                min: bounds.min,
                span: bounds.span.max(1),
            },
            signs: OffsetSigns::default(),
            rng,
        }
    }

    pub fn with_signs(mut self, signs: OffsetSigns) -> Self {
        self.signs = signs;
        self
    }

    pub fn bounds(&self) -> EdgeBounds {
        self.bounds
    }

    /// Number of triangles sampled for an image: `floor((w / h) / TRIANGLE_RATIO)`.
    pub fn triangle_count(width: u32, height: u32) -> usize {
        if width == 0 || height == 0 {
            return 0;
        }
        ((width as f64 / height as f64) / TRIANGLE_RATIO).floor() as usize
    }

    /// Sample the triangles for a `width x height` image.
    pub fn sample(&mut self, width: u32, height: u32) -> Vec<Triangle> {
        let count = Self::triangle_count(width, height);
        debug!(count, width, height, bounds = ?self.bounds, "sampling random triangles");

        (0..count)
            .map(|_| self.triangle(width, height))
            .collect()
    }

    fn triangle(&mut self, width: u32, height: u32) -> Triangle {
        let anchor = Point::new(
            self.rng.gen_range(0..width) as i32,
            self.rng.gen_range(0..height) as i32,
        );

        let b = self.companion(anchor);
        let c = self.companion(anchor);
        Triangle::new(anchor, b, c)
    }

    fn companion(&mut self, anchor: Point) -> Point {
        let dx = self.offset();
        let dy = self.offset();
        Point::new(anchor.x + dx, anchor.y + dy)
    }

    fn offset(&mut self) -> i32 {
        let magnitude = self.bounds.min + self.rng.gen_range(0..self.bounds.span);
        match self.signs {
            OffsetSigns::Random if self.rng.gen_bool(0.5) => magnitude,
            _ => -magnitude,
        }
    }
}
