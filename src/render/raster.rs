//! Scanline triangle rasterizer.
//!
//! Triangles are filled row by row between two edges whose x positions
//! advance by truncated integer inverse slopes. A general triangle is split
//! at its middle vertex into a flat-bottom and a flat-top half.
//!
//! Inverse slopes stay integer (truncated toward zero); pixel counts in the
//! tests depend on it.

use image::RgbaImage;

use crate::types::{Colour, Point, Triangle};

/// Pixels covered by one triangle together with their source colours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coverage {
    /// Source colour at each entry of `pixels`, in the same order.
    pub colours: Vec<Colour>,

    /// Covered pixel coordinates, all inside the source image.
    pub pixels: Vec<Point>,

    /// Scanline pixels dropped because they fell outside the source image.
    pub clipped: usize,
}

impl Coverage {
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    fn push(&mut self, point: Point, colour: Colour) {
        self.pixels.push(point);
        self.colours.push(colour);
    }
}

/// Rasterize a triangle against `source`.
///
/// The vertices must already be sorted ascending by `y`
/// (see [`Triangle::sorted_by_y`]). Zero-area triangles cover nothing.
pub fn rasterize(triangle: &Triangle, source: &RgbaImage) -> Coverage {
    debug_assert!(triangle.is_sorted_by_y(), "vertices must be sorted by y");

    let mut coverage = Coverage::default();
    if triangle.is_degenerate() {
        return coverage;
    }

    let [v1, v2, v3] = triangle.vertices;
    let mut scan = Scanner {
        source,
        coverage: &mut coverage,
    };

    if v2.y == v3.y {
        scan.fill_bottom_flat(v1, v2, v3);
    } else if v1.y == v2.y {
        scan.fill_top_flat(v1, v2, v3);
    } else {
        let v4 = split_point(v1, v2, v3);
        scan.fill_bottom_flat(v1, v2, v4);
        scan.fill_top_flat(v2, v4, v3);
    }

    coverage
}

/// Point on the long edge `v1 -> v3` at the height of `v2`.
///
/// Lies between `v1.x` and `v3.x`, so it always fits an `i32`.
fn split_point(v1: Point, v2: Point, v3: Point) -> Point {
    let dy_mid = v2.y as i64 - v1.y as i64;
    let dy_long = v3.y as i64 - v1.y as i64;
    let dx_long = v3.x as i64 - v1.x as i64;

    Point::new((v1.x as i64 + dy_mid * dx_long / dy_long) as i32, v2.y)
}

/// Truncated inverse slope `dx / dy`; `dy` must be non-zero.
fn inv_slope(from: Point, to: Point) -> i64 {
    (to.x as i64 - from.x as i64) / (to.y as i64 - from.y as i64)
}

/// A run of scanlines leaving `apex`: row `k` sits at `apex.y + k * dir` and
/// spans `apex.x + k * step1` to `apex.x + k * step2`.
struct Walk {
    apex: Point,
    dir: i64,
    step1: i64,
    step2: i64,
    /// Last row index, inclusive.
    rows: i64,
}

struct Scanner<'a> {
    source: &'a RgbaImage,
    coverage: &'a mut Coverage,
}

impl Scanner<'_> {
    /// Fill a triangle whose bottom edge `v2 - v3` is horizontal, walking
    /// down from the apex `v1` to the flat edge inclusive.
    fn fill_bottom_flat(&mut self, v1: Point, v2: Point, v3: Point) {
        if v2.y == v1.y || v3.y == v1.y {
            return;
        }

        self.walk(Walk {
            apex: v1,
            dir: 1,
            step1: inv_slope(v1, v2),
            step2: inv_slope(v1, v3),
            rows: v2.y as i64 - v1.y as i64,
        });
    }

    /// Fill a triangle whose top edge `v1 - v2` is horizontal, walking up
    /// from the apex `v3`. The flat edge row itself is not filled.
    fn fill_top_flat(&mut self, v1: Point, v2: Point, v3: Point) {
        if v3.y == v1.y || v3.y == v2.y {
            return;
        }

        self.walk(Walk {
            apex: v3,
            dir: -1,
            step1: -inv_slope(v1, v3),
            step2: -inv_slope(v2, v3),
            rows: v3.y as i64 - v1.y as i64 - 1,
        });
    }

    /// Emit the rows of `walk` that land inside the source. Rows above or
    /// below it are skipped without visiting them, but still counted as
    /// clipped.
    fn walk(&mut self, walk: Walk) {
        let height = self.source.height() as i64;
        let apex_y = walk.apex.y as i64;

        // Row indices whose y falls in [0, height).
        let (lo, hi) = if walk.dir > 0 {
            (-apex_y, height - 1 - apex_y)
        } else {
            (apex_y - (height - 1), apex_y)
        };
        let first = lo.max(0);
        let last = hi.min(walk.rows);

        let spread = (walk.step2 - walk.step1).abs();
        if first > last {
            self.skip_rows(spread, 0, walk.rows);
            return;
        }
        self.skip_rows(spread, 0, first - 1);
        self.skip_rows(spread, last + 1, walk.rows);

        let apex_x = walk.apex.x as i64;
        for k in first..=last {
            let y = apex_y + k * walk.dir;
            self.hline(apex_x + k * walk.step1, y, apex_x + k * walk.step2);
        }
    }

    /// Count the pixels of rows `from..=to` as clipped. Row `k` is
    /// `k * spread + 1` pixels wide.
    fn skip_rows(&mut self, spread: i64, from: i64, to: i64) {
        if from > to {
            return;
        }
        let (from, to, spread) = (from as i128, to as i128, spread as i128);
        let count = to - from + 1;
        let pixels = spread * (from + to) * count / 2 + count;
        self.coverage.clipped = self
            .coverage
            .clipped
            .saturating_add(usize::try_from(pixels).unwrap_or(usize::MAX));
    }

    /// Record every pixel from `x1` to `x2` inclusive on row `y`, which must
    /// be inside the source.
    fn hline(&mut self, x1: i64, y: i64, x2: i64) {
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let span = usize::try_from(hi - lo + 1).unwrap_or(usize::MAX);

        let width = self.source.width() as i64;
        let start = lo.max(0);
        let end = hi.min(width - 1);
        if start > end {
            self.coverage.clipped = self.coverage.clipped.saturating_add(span);
            return;
        }
        self.coverage.clipped += span - (end - start + 1) as usize;

        for x in start..=end {
            let colour = Colour::from(*self.source.get_pixel(x as u32, y as u32));
            self.coverage.push(Point::new(x as i32, y as i32), colour);
        }
    }
}
