//! Concurrent triangle compositing.
//!
//! Each triangle is turned into a [`Stroke`] on a bounded rayon pool:
//! rasterize, pick the dominant colour, snap it to the palette. Strokes are
//! sent over a channel to a single writer thread that owns the canvas and
//! applies them in triangle order, so overlapping triangles always resolve
//! the same way regardless of scheduling.

use std::collections::BTreeMap;
use std::sync::mpsc;
use std::thread;

use image::RgbaImage;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{Result, TesseraError};
use crate::types::{Colour, Palette, Point, Triangle};

use super::{dominant, rasterize, Canvas};

const BATCH_PER_JOB: usize = 256;

/// One triangle's contribution to the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Position of the triangle in the input list.
    pub index: usize,

    /// Colour to paint, or `None` when the triangle covered no pixels.
    pub colour: Option<Colour>,

    pub pixels: Vec<Point>,

    /// Scanline pixels that fell outside the source image.
    pub clipped: usize,
}

/// Totals gathered while compositing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositeStats {
    pub triangles: usize,
    /// Triangles that produced no pixels.
    pub empty: usize,
    /// Pixel writes, counting overdraw.
    pub painted: usize,
    pub clipped: usize,
}

/// Paints triangles sampled from a source image onto a canvas.
pub struct Compositor<'a> {
    source: &'a RgbaImage,
    palette: &'a Palette,
    jobs: usize,
}

impl<'a> Compositor<'a> {
    pub fn new(source: &'a RgbaImage, palette: &'a Palette) -> Self {
        Self {
            source,
            palette,
            jobs: default_jobs(),
        }
    }

    /// Set the number of worker threads (minimum 1).
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Compute the stroke for a single triangle.
    pub fn stroke(&self, index: usize, triangle: &Triangle) -> Stroke {
        let coverage = rasterize(&triangle.sorted_by_y(), self.source);
        let colour = dominant(&coverage.colours).map(|c| self.palette.nearest(c));

        Stroke {
            index,
            colour,
            pixels: coverage.pixels,
            clipped: coverage.clipped,
        }
    }

    /// Paint every triangle onto `canvas` and return it once all are applied.
    pub fn composite(
        &self,
        canvas: Canvas,
        triangles: &[Triangle],
    ) -> Result<(Canvas, CompositeStats)> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .thread_name(|i| format!("tessera-worker-{}", i))
            .build()
            .map_err(|e| TesseraError::Config {
                message: format!("Failed to start worker pool: {}", e),
                help: Some("Try a smaller --jobs value".to_string()),
            })?;

        debug!(
            triangles = triangles.len(),
            jobs = self.jobs,
            "compositing triangles"
        );

        let (tx, rx) = mpsc::sync_channel::<Stroke>(self.jobs * 8);

        let (canvas, stats) = thread::scope(|s| {
            let writer = s.spawn(move || apply_in_order(canvas, rx));

            // Batches bound how many finished strokes can wait in the writer's
            // reorder buffer.
            let batch = self.jobs * BATCH_PER_JOB;
            for (n, chunk) in triangles.chunks(batch).enumerate() {
                let offset = n * batch;
                let tx = tx.clone();
                pool.install(move || {
                    chunk
                        .par_iter()
                        .enumerate()
                        .for_each_with(tx, |tx, (i, triangle)| {
                            // The writer only hangs up if it panicked; that surfaces on join.
                            let _ = tx.send(self.stroke(offset + i, triangle));
                        });
                });
            }
            drop(tx);

            writer
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
        });

        debug!(
            painted = stats.painted,
            empty = stats.empty,
            clipped = stats.clipped,
            "compositing finished"
        );

        Ok((canvas, stats))
    }
}

/// Writer loop: buffer out-of-order strokes and apply them by index.
fn apply_in_order(mut canvas: Canvas, rx: mpsc::Receiver<Stroke>) -> (Canvas, CompositeStats) {
    let mut pending: BTreeMap<usize, Stroke> = BTreeMap::new();
    let mut next = 0;
    let mut stats = CompositeStats::default();

    for stroke in rx {
        pending.insert(stroke.index, stroke);

        while let Some(stroke) = pending.remove(&next) {
            stats.triangles += 1;
            stats.clipped += stroke.clipped;
            match stroke.colour {
                Some(colour) => stats.painted += canvas.paint(&stroke.pixels, colour),
                None => stats.empty += 1,
            }
            next += 1;
        }
    }

    (canvas, stats)
}

/// Worker count when none is configured: the available parallelism.
pub fn default_jobs() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
