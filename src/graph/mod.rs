pub mod annotate;
pub mod artifact;
pub mod code;
pub mod direction;
pub mod levels;
pub mod semantic;

pub use annotate::{AnnotatedGraph, AnnotationRecord, GraphAnnotator};
pub use artifact::{GraphArtifact, VertexEntry};
pub use code::{ConnectivityCode, EdgeClass, EDGE_CLASS_TABLE};
pub use direction::Direction;
pub use levels::{canonical_origin, LevelMap};
pub use semantic::{FixedLabels, LabelSource, SemanticLabel, UniformLabels, VOCABULARY};

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::config::SlotConflictPolicy;
use crate::error::GraphError;
use crate::math::GridPoint;

slotmap::new_key_type! {
    /// Unique identifier for a junction vertex in a [`WallGraph`].
    pub struct VertexId;
}

/// Neighbor of a vertex in each of the four direction slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdjacencyRecord {
    slots: [Option<VertexId>; 4],
}

impl AdjacencyRecord {
    #[must_use]
    pub fn get(&self, dir: Direction) -> Option<VertexId> {
        self.slots[dir.index()]
    }

    /// Filled slots in slot order.
    pub fn neighbors(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// Connectivity code derived from the filled slots.
    #[must_use]
    pub fn code(&self) -> ConnectivityCode {
        ConnectivityCode(self.slots.map(|s| s.is_some()))
    }
}

/// Data associated with a junction vertex.
#[derive(Debug, Clone)]
pub struct VertexData {
    pub point: GridPoint,
    pub adjacency: AdjacencyRecord,
}

/// Arena of junction vertices keyed by grid coordinate.
///
/// Iteration follows vertex insertion order.
#[derive(Debug, Default)]
pub struct WallGraph {
    vertices: SlotMap<VertexId, VertexData>,
    index: HashMap<GridPoint, VertexId>,
}

impl WallGraph {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the vertex at `point`, inserting it if absent.
    pub fn ensure_vertex(&mut self, point: GridPoint) -> VertexId {
        if let Some(&id) = self.index.get(&point) {
            return id;
        }
        let id = self.vertices.insert(VertexData {
            point,
            adjacency: AdjacencyRecord::default(),
        });
        self.index.insert(point, id);
        id
    }

    #[must_use]
    pub fn find(&self, point: GridPoint) -> Option<VertexId> {
        self.index.get(&point).copied()
    }

    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&VertexData> {
        self.vertices.get(id)
    }

    #[must_use]
    pub fn point(&self, id: VertexId) -> Option<GridPoint> {
        self.vertices.get(id).map(|v| v.point)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &VertexData)> {
        self.vertices.iter()
    }

    /// Neighbors of `id` in slot order; empty for an unknown id.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .get(id)
            .into_iter()
            .flat_map(|v| v.adjacency.neighbors())
    }

    /// Connects `a` and `b` in both directions, inserting missing vertices.
    ///
    /// Returns the number of slots (0..=2) where an earlier, different
    /// neighbor was already present; `policy` decides what happens to them.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::ZeroLengthSegment` if `a == b`, or
    /// `GraphError::SlotConflict` under [`SlotConflictPolicy::Error`].
    pub fn connect(
        &mut self,
        a: GridPoint,
        b: GridPoint,
        policy: SlotConflictPolicy,
    ) -> Result<usize, GraphError> {
        let dir_ab = Direction::classify(a, b)?;
        let dir_ba = Direction::classify(b, a)?;
        let ia = self.ensure_vertex(a);
        let ib = self.ensure_vertex(b);

        let mut conflicts = 0;
        if self.fill_slot(ia, dir_ab, ib, policy)? {
            conflicts += 1;
        }
        if self.fill_slot(ib, dir_ba, ia, policy)? {
            conflicts += 1;
        }
        tracing::trace!(%a, %b, %dir_ab, %dir_ba, "connected");
        Ok(conflicts)
    }

    fn fill_slot(
        &mut self,
        id: VertexId,
        dir: Direction,
        neighbor: VertexId,
        policy: SlotConflictPolicy,
    ) -> Result<bool, GraphError> {
        let Some(vertex) = self.vertices.get_mut(id) else {
            return Ok(false);
        };
        let slot = &mut vertex.adjacency.slots[dir.index()];
        match *slot {
            Some(prev) if prev != neighbor => {
                tracing::warn!(
                    vertex = %vertex.point,
                    direction = %dir,
                    ?policy,
                    "direction slot written by two segments"
                );
                match policy {
                    SlotConflictPolicy::KeepLast => *slot = Some(neighbor),
                    SlotConflictPolicy::KeepFirst => {}
                    SlotConflictPolicy::Error => {
                        return Err(GraphError::SlotConflict {
                            vertex: vertex.point,
                            direction: dir.name(),
                        })
                    }
                }
                Ok(true)
            }
            _ => {
                *slot = Some(neighbor);
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn gp(x: i64, y: i64) -> GridPoint {
        GridPoint::new(x, y)
    }

    #[test]
    fn vertices_are_identified_by_value() {
        let mut g = WallGraph::new();
        let a = g.ensure_vertex(gp(1, 2));
        let b = g.ensure_vertex(gp(1, 2));
        assert_eq!(a, b);
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn connect_fills_opposite_slots() {
        let mut g = WallGraph::new();
        g.connect(gp(0, 0), gp(10, 0), SlotConflictPolicy::KeepLast).unwrap();
        let a = g.find(gp(0, 0)).unwrap();
        let b = g.find(gp(10, 0)).unwrap();
        assert_eq!(g.vertex(a).unwrap().adjacency.get(Direction::Right), Some(b));
        assert_eq!(g.vertex(b).unwrap().adjacency.get(Direction::Left), Some(a));
        assert_eq!(g.vertex(a).unwrap().adjacency.code().to_string(), "0001");
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let mut g = WallGraph::new();
        for p in [gp(5, 5), gp(0, 0), gp(9, 1)] {
            g.ensure_vertex(p);
        }
        let pts: Vec<GridPoint> = g.iter().map(|(_, v)| v.point).collect();
        assert_eq!(pts, vec![gp(5, 5), gp(0, 0), gp(9, 1)]);
    }

    #[test]
    fn conflict_keep_last_overwrites() {
        let mut g = WallGraph::new();
        g.connect(gp(0, 0), gp(10, 0), SlotConflictPolicy::KeepLast).unwrap();
        // Shallow diagonal also classifies as Right from the origin.
        let n = g.connect(gp(0, 0), gp(10, 2), SlotConflictPolicy::KeepLast).unwrap();
        assert_eq!(n, 1);
        let o = g.find(gp(0, 0)).unwrap();
        let right = g.vertex(o).unwrap().adjacency.get(Direction::Right).unwrap();
        assert_eq!(g.point(right), Some(gp(10, 2)));
    }

    #[test]
    fn conflict_keep_first_preserves() {
        let mut g = WallGraph::new();
        g.connect(gp(0, 0), gp(10, 0), SlotConflictPolicy::KeepFirst).unwrap();
        g.connect(gp(0, 0), gp(10, 2), SlotConflictPolicy::KeepFirst).unwrap();
        let o = g.find(gp(0, 0)).unwrap();
        let right = g.vertex(o).unwrap().adjacency.get(Direction::Right).unwrap();
        assert_eq!(g.point(right), Some(gp(10, 0)));
    }

    #[test]
    fn conflict_error_policy_fails() {
        let mut g = WallGraph::new();
        g.connect(gp(0, 0), gp(10, 0), SlotConflictPolicy::Error).unwrap();
        let err = g.connect(gp(0, 0), gp(10, 2), SlotConflictPolicy::Error).unwrap_err();
        assert!(matches!(err, GraphError::SlotConflict { direction: "right", .. }));
    }

    #[test]
    fn code_degree_matches_filled_slots() {
        let mut g = WallGraph::new();
        g.connect(gp(5, 5), gp(5, 0), SlotConflictPolicy::KeepLast).unwrap();
        g.connect(gp(5, 5), gp(0, 5), SlotConflictPolicy::KeepLast).unwrap();
        g.connect(gp(5, 5), gp(9, 5), SlotConflictPolicy::KeepLast).unwrap();
        for (_, v) in g.iter() {
            assert_eq!(v.adjacency.code().degree(), v.adjacency.neighbors().count());
        }
        let c = g.find(gp(5, 5)).unwrap();
        assert_eq!(g.vertex(c).unwrap().adjacency.code().to_string(), "1101");
    }
}
