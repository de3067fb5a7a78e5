//! Triangulated mesh exchanged with mesh providers.
//!
//! The JSON shape is `{"points": [[x, y], ...], "simplices": [[i, j, k], ...]}`
//! where each simplex indexes into `points`.

use serde::Deserialize;

use crate::error::{Result, TesseraError};

use super::{Point, Triangle};

/// A point list plus index triples, one per triangle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Mesh {
    pub points: Vec<[i32; 2]>,
    pub simplices: Vec<[usize; 3]>,
}

impl Mesh {
    /// Parse a mesh from its JSON form.
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    /// Resolve every simplex into a triangle.
    ///
    /// Fails on the first index that is out of range. Degenerate simplices
    /// are passed through; they rasterize to nothing.
    pub fn triangles(&self) -> Result<Vec<Triangle>> {
        self.simplices
            .iter()
            .enumerate()
            .map(|(n, simplex)| {
                let mut vertices = [Point::default(); 3];
                for (slot, &index) in vertices.iter_mut().zip(simplex) {
                    let p = self.points.get(index).ok_or(TesseraError::MeshIndex {
                        simplex: n,
                        index,
                        points: self.points.len(),
                    })?;
                    *slot = Point::from(*p);
                }
                Ok(Triangle { vertices })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_json_shape() {
        let mesh = Mesh::from_json(
            r#"{"points": [[0, 0], [10, 0], [0, 10], [10, 10]], "simplices": [[0, 1, 2], [1, 3, 2]]}"#,
        )
        .unwrap();

        assert_eq!(mesh.points.len(), 4);
        let triangles = mesh.triangles().unwrap();
        assert_eq!(
            triangles[1],
            Triangle::new(Point::new(10, 0), Point::new(10, 10), Point::new(0, 10))
        );
    }

    #[test]
    fn test_out_of_range_index() {
        let mesh = Mesh {
            points: vec![[0, 0], [1, 0]],
            simplices: vec![[0, 1, 2]],
        };

        match mesh.triangles() {
            Err(TesseraError::MeshIndex {
                simplex,
                index,
                points,
            }) => {
                assert_eq!((simplex, index, points), (0, 2, 2));
            }
            other => panic!("expected MeshIndex error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(Mesh::from_json(r#"{"points": [[0, 0]]}"#).is_err());
        assert!(Mesh::from_json(r#"{"points": [[0]], "simplices": []}"#).is_err());
        assert!(Mesh::from_json("not json").is_err());
    }
}
