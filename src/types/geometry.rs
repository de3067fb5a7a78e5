//! Integer points and triangles in canvas space.

/// A pixel coordinate. May lie outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

/// An ordered triple of vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub vertices: [Point; 3],
}

impl Triangle {
    pub const fn new(a: Point, b: Point, c: Point) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Return a copy with vertices ascending by `y`.
    ///
    /// The sort is stable, so vertices sharing a `y` keep their relative order.
    pub fn sorted_by_y(&self) -> Self {
        let mut vertices = self.vertices;
        vertices.sort_by_key(|p| p.y);
        Self { vertices }
    }

    /// Whether the vertices are ascending by `y`.
    pub fn is_sorted_by_y(&self) -> bool {
        let [a, b, c] = self.vertices;
        a.y <= b.y && b.y <= c.y
    }

    /// Twice the signed area (positive for counter-clockwise in y-up space).
    pub fn doubled_area(&self) -> i128 {
        let [a, b, c] = self.vertices;
        let (ax, ay) = (a.x as i128, a.y as i128);
        let (bx, by) = (b.x as i128, b.y as i128);
        let (cx, cy) = (c.x as i128, c.y as i128);
        (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
    }

    /// Zero-area triangles: coincident or collinear vertices.
    pub fn is_degenerate(&self) -> bool {
        self.doubled_area() == 0
    }
}
