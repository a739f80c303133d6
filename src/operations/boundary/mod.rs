mod merge;
mod parse;
mod split;

use std::collections::HashSet;

pub use merge::{merge_boundaries, MergedLine};
pub use parse::{parse_records, read_records, METADATA_TOKENS};
pub use split::{boundary_contacts, split_line};

use crate::error::{BoundaryError, Result};
use crate::geometry::{Polygon, Segment};
use crate::math::{GridPoint, Point2};

/// Default distance below which a candidate point counts as lying on a line.
pub const DEFAULT_ON_SEGMENT_TOLERANCE: f64 = 1e-6;

/// Resolves wall polygons into atomic integer segments.
///
/// Boundaries are merged into a shared line network (walls traced by two
/// polygons appear once), every merged line is split at the points where
/// polygon boundaries meet and at polygon corners lying on it, and the
/// pieces are truncated to the integer grid and deduplicated.
#[derive(Debug)]
pub struct BoundaryResolver {
    polygons: Vec<Polygon>,
    tolerance: f64,
}

impl BoundaryResolver {
    /// Creates a new resolver over already-parsed polygons.
    #[must_use]
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self {
            polygons,
            tolerance: DEFAULT_ON_SEGMENT_TOLERANCE,
        }
    }

    /// Creates a resolver from wall record text (see [`parse_records`]).
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MalformedRecord` for an unparsable line.
    pub fn from_records(text: &str) -> Result<Self> {
        Ok(Self::new(parse_records(text)?))
    }

    /// Sets the on-line tolerance used when splitting merged lines.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes boundary resolution.
    ///
    /// # Errors
    ///
    /// Returns `BoundaryError::EmptyInput` if there are no polygons, or none
    /// of them has a non-degenerate edge.
    pub fn execute(&self) -> Result<Vec<Segment>> {
        if self.polygons.is_empty() {
            return Err(BoundaryError::EmptyInput.into());
        }

        // Step 1: Exterior ring of every polygon.
        let rings: Vec<Vec<(Point2, Point2)>> = self
            .polygons
            .iter()
            .map(Polygon::exterior)
            .filter(|ring| !ring.is_empty())
            .collect();
        if rings.is_empty() {
            return Err(BoundaryError::EmptyInput.into());
        }

        // Step 2: Shared line network.
        let merged = merge_boundaries(&rings);

        // Step 3: Junctions between the original boundaries, plus corners.
        let mut candidates = boundary_contacts(&rings);
        let contact_count = candidates.len();
        for p in self.polygons.iter().flat_map(|poly| poly.vertices.iter()) {
            split::add_unique_point(&mut candidates, *p);
        }

        // Step 4: Split, resolve onto the grid, deduplicate.
        let mut pieces = Vec::new();
        for line in &merged {
            let points = split_line(line.start, line.end, &candidates, self.tolerance);
            for pair in points.windows(2) {
                pieces.push(Segment::new(
                    GridPoint::resolve(&pair[0]),
                    GridPoint::resolve(&pair[1]),
                ));
            }
        }
        let segments = dedup_segments(pieces);

        tracing::debug!(
            polygons = self.polygons.len(),
            merged_lines = merged.len(),
            contacts = contact_count,
            segments = segments.len(),
            "resolved boundaries"
        );
        Ok(segments)
    }
}

/// Drops zero-length and repeated segments, keeping first-seen order.
#[must_use]
pub fn dedup_segments(segments: impl IntoIterator<Item = Segment>) -> Vec<Segment> {
    let mut seen = HashSet::new();
    let mut collapsed = 0_usize;
    let mut unique = Vec::new();
    for seg in segments {
        if seg.is_degenerate() {
            collapsed += 1;
            continue;
        }
        if seen.insert(seg) {
            unique.push(seg);
        }
    }
    if collapsed > 0 {
        tracing::warn!(collapsed, "dropped segments collapsed to a single grid point");
    }
    unique
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FloorgraphError;

    fn vertex_count(segments: &[Segment]) -> usize {
        segments
            .iter()
            .flat_map(|s| [s.p1, s.p2])
            .collect::<HashSet<_>>()
            .len()
    }

    #[test]
    fn single_square() {
        let sq = Polygon::from_coords(&[(0, 0), (10, 0), (10, 10), (0, 10)]);
        let segs = BoundaryResolver::new(vec![sq]).execute().unwrap();
        assert_eq!(segs.len(), 4);
        assert_eq!(vertex_count(&segs), 4);
    }

    #[test]
    fn shared_wall_counted_once() {
        let a = Polygon::from_coords(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        let b = Polygon::from_coords(&[(1, 0), (2, 0), (2, 1), (1, 1)]);
        let segs = BoundaryResolver::new(vec![a, b]).execute().unwrap();
        assert_eq!(vertex_count(&segs), 6);
        assert_eq!(segs.len(), 7, "segs={segs:?}");
        let shared = Segment::new(GridPoint::new(1, 0), GridPoint::new(1, 1));
        assert_eq!(segs.iter().filter(|s| **s == shared).count(), 1);
    }

    #[test]
    fn partially_shared_wall_is_split() {
        // Right room is half as tall as the left one and shares part of x=2.
        let a = Polygon::from_coords(&[(0, 0), (2, 0), (2, 2), (0, 2)]);
        let b = Polygon::from_coords(&[(2, 0), (3, 0), (3, 1), (2, 1)]);
        let segs = BoundaryResolver::new(vec![a, b]).execute().unwrap();
        let lower = Segment::new(GridPoint::new(2, 0), GridPoint::new(2, 1));
        let upper = Segment::new(GridPoint::new(2, 1), GridPoint::new(2, 2));
        assert!(segs.contains(&lower), "segs={segs:?}");
        assert!(segs.contains(&upper), "segs={segs:?}");
        assert!(!segs.contains(&Segment::new(GridPoint::new(2, 0), GridPoint::new(2, 2))));
    }

    #[test]
    fn t_junction_splits_long_wall() {
        let hall = Polygon::from_coords(&[(0, 0), (10, 0), (10, 4), (0, 4)]);
        let room = Polygon::from_coords(&[(5, 4), (8, 4), (8, 9), (5, 9)]);
        let segs = BoundaryResolver::new(vec![hall, room]).execute().unwrap();
        // y=4 wall becomes 0-5, 5-8, 8-10.
        let top: Vec<_> = segs
            .iter()
            .filter(|s| s.p1.y == 4 && s.p2.y == 4)
            .collect();
        assert_eq!(top.len(), 3, "top={top:?}");
    }

    #[test]
    fn crossing_walls_get_a_vertex() {
        let a = Polygon::from_coords(&[(0, 0), (4, 0), (4, 4), (0, 4)]);
        let b = Polygon::from_coords(&[(2, 2), (6, 2), (6, 6), (2, 6)]);
        let segs = BoundaryResolver::new(vec![a, b]).execute().unwrap();
        // 8 corners + 2 crossings; every crossing splits two walls.
        assert_eq!(vertex_count(&segs), 10);
        assert_eq!(segs.len(), 12);
    }

    #[test]
    fn collinear_corner_is_kept() {
        let poly = Polygon::from_coords(&[(0, 0), (5, 0), (10, 0), (10, 10), (0, 10)]);
        let segs = BoundaryResolver::new(vec![poly]).execute().unwrap();
        assert_eq!(segs.len(), 5);
    }

    #[test]
    fn output_order_is_stable() {
        let text = "0 0 10 0 10 10 0 10 a b\n10 0 20 0 20 10 10 10 a b\n";
        let first = BoundaryResolver::from_records(text).unwrap().execute().unwrap();
        let second = BoundaryResolver::from_records(text).unwrap().execute().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_fails() {
        let err = BoundaryResolver::new(Vec::new()).execute().unwrap_err();
        assert!(matches!(err, FloorgraphError::Boundary(BoundaryError::EmptyInput)));
        let err = BoundaryResolver::from_records("\n\n").unwrap().execute().unwrap_err();
        assert_eq!(err.kind(), "EmptyInput");
    }

    #[test]
    fn malformed_record_propagates() {
        let err = BoundaryResolver::from_records("0 0 1 a b\n").unwrap_err();
        assert_eq!(err.kind(), "MalformedRecord");
    }

    #[test]
    fn dedup_drops_degenerate_and_reversed() {
        let a = GridPoint::new(0, 0);
        let b = GridPoint::new(3, 0);
        let out = dedup_segments([Segment::new(a, b), Segment::new(b, a), Segment::new(a, a)]);
        assert_eq!(out, vec![Segment::new(a, b)]);
    }
}
