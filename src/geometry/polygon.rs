use crate::math::{Point2, TOLERANCE};

/// A closed wall outline. The last vertex connects back to the first.
///
/// Input only: polygons are consumed by boundary resolution and not kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Point2>,
}

impl Polygon {
    /// Creates a polygon from integer `(x, y)` pairs.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_coords(coords: &[(i64, i64)]) -> Self {
        let vertices = coords
            .iter()
            .map(|&(x, y)| Point2::new(x as f64, y as f64))
            .collect();
        Self { vertices }
    }

    /// Returns the number of boundary edges, closing edge included.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.vertices.len();
        if n < 2 {
            0
        } else {
            n
        }
    }

    /// The exterior ring as consecutive vertex pairs, closing edge included.
    ///
    /// Zero-length edges (repeated vertices, or an explicitly repeated first
    /// vertex at the end) are skipped.
    #[must_use]
    pub fn exterior(&self) -> Vec<(Point2, Point2)> {
        let n = self.vertices.len();
        let mut ring = Vec::with_capacity(self.segment_count());
        for i in 0..self.segment_count() {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            if (b - a).norm_squared() < TOLERANCE * TOLERANCE {
                continue;
            }
            ring.push((a, b));
        }
        ring
    }
}
