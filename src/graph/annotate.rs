use serde::{Deserialize, Serialize};

use super::artifact::{GraphArtifact, VertexEntry};
use super::levels::{canonical_origin, LevelMap};
use super::semantic::{LabelSource, SemanticLabel};
use super::{ConnectivityCode, Direction, EdgeClass, VertexId, WallGraph};
use crate::config::SlotConflictPolicy;
use crate::error::GraphError;
use crate::geometry::Segment;
use crate::math::GridPoint;
use crate::operations::query::BoundingBox;

/// One junction label, ready for the COCO `annotations` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub image_id: String,
    pub category_id: u32,
    pub id: u64,
    pub point: GridPoint,
    pub edge_code: EdgeClass,
    pub semantic: [SemanticLabel; 4],
}

/// Builds the directional junction graph of one image.
///
/// Every segment connects its endpoints in both directions; the vertex
/// nearest `(0, 0)` becomes the breadth-first root of the level map.
#[derive(Debug)]
pub struct GraphAnnotator {
    segments: Vec<Segment>,
    image_id: String,
    category_id: u32,
    slot_conflict: SlotConflictPolicy,
}

impl GraphAnnotator {
    /// Creates a new annotator over segments already in canvas coordinates.
    #[must_use]
    pub fn new(segments: Vec<Segment>, image_id: impl Into<String>, category_id: u32) -> Self {
        Self {
            segments,
            image_id: image_id.into(),
            category_id,
            slot_conflict: SlotConflictPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_slot_conflict(mut self, policy: SlotConflictPolicy) -> Self {
        self.slot_conflict = policy;
        self
    }

    /// Builds the adjacency graph and the level map.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::ZeroLengthSegment` for a degenerate segment, or
    /// `GraphError::SlotConflict` under [`SlotConflictPolicy::Error`].
    pub fn execute(&self) -> Result<AnnotatedGraph, GraphError> {
        let mut graph = WallGraph::new();
        let mut slot_conflicts = 0;
        for seg in &self.segments {
            slot_conflicts += graph.connect(seg.p1, seg.p2, self.slot_conflict)?;
        }

        let origin = canonical_origin(&graph);
        let levels = origin
            .map(|o| LevelMap::build(&graph, o))
            .unwrap_or_default();

        let annotated = AnnotatedGraph {
            image_id: self.image_id.clone(),
            category_id: self.category_id,
            graph,
            origin,
            levels,
            slot_conflicts,
        };

        let unreachable = annotated.graph.len() - annotated.levels.vertex_count();
        if unreachable > 0 {
            tracing::warn!(
                image_id = %self.image_id,
                unreachable,
                "vertices unreachable from the canonical origin are not leveled"
            );
        }
        tracing::info!(
            image_id = %self.image_id,
            segments = self.segments.len(),
            vertices = annotated.graph.len(),
            max_level = ?annotated.levels.max_level(),
            slot_conflicts,
            "built junction graph"
        );
        Ok(annotated)
    }
}

/// The junction graph of one image with its level map.
#[derive(Debug)]
pub struct AnnotatedGraph {
    image_id: String,
    category_id: u32,
    graph: WallGraph,
    origin: Option<VertexId>,
    levels: LevelMap,
    slot_conflicts: usize,
}

impl AnnotatedGraph {
    #[must_use]
    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    #[must_use]
    pub fn graph(&self) -> &WallGraph {
        &self.graph
    }

    /// Root of the level map; `None` only for an empty graph.
    #[must_use]
    pub fn origin(&self) -> Option<VertexId> {
        self.origin
    }

    #[must_use]
    pub fn levels(&self) -> &LevelMap {
        &self.levels
    }

    /// Number of direction slots claimed by more than one segment.
    #[must_use]
    pub fn slot_conflicts(&self) -> usize {
        self.slot_conflicts
    }

    #[must_use]
    pub fn connectivity(&self, id: VertexId) -> Option<ConnectivityCode> {
        self.graph.vertex(id).map(|v| v.adjacency.code())
    }

    /// Vertices outside the origin's component, in insertion order.
    #[must_use]
    pub fn unreachable(&self) -> Vec<VertexId> {
        self.graph
            .iter()
            .map(|(id, _)| id)
            .filter(|&id| self.levels.level_of(id).is_none())
            .collect()
    }

    /// One annotation record per vertex, in vertex insertion order.
    ///
    /// Ids start at `annot_id` and increase by one; the returned counter is
    /// the next free id.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::InvalidConnectivity` if a vertex code is missing
    /// from the edge class table.
    pub fn create_annotations(
        &self,
        annot_id: u64,
        labels: &mut dyn LabelSource,
    ) -> Result<(Vec<AnnotationRecord>, u64), GraphError> {
        let mut next_id = annot_id;
        let mut records = Vec::with_capacity(self.graph.len());
        for (_, v) in self.graph.iter() {
            records.push(AnnotationRecord {
                image_id: self.image_id.clone(),
                category_id: self.category_id,
                id: next_id,
                point: v.point,
                edge_code: v.adjacency.code().edge_class()?,
                semantic: labels.draw(),
            });
            next_id += 1;
        }
        tracing::debug!(
            image_id = %self.image_id,
            records = records.len(),
            next_id,
            "created annotations"
        );
        Ok((records, next_id))
    }

    /// Bounding box over all vertices.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::EmptyGraph` if the graph has no vertices.
    pub fn bounding_box(&self) -> Result<BoundingBox, GraphError> {
        BoundingBox::of_points(self.graph.iter().map(|(_, v)| v.point))
    }

    /// Serializable snapshot of adjacency, codes and levels.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::InvalidConnectivity` if a vertex code is missing
    /// from the edge class table.
    pub fn artifact(&self) -> Result<GraphArtifact, GraphError> {
        let point_of = |id: VertexId| self.graph.point(id);
        let mut vertices = Vec::with_capacity(self.graph.len());
        for (_, v) in self.graph.iter() {
            let code = v.adjacency.code();
            vertices.push(VertexEntry {
                point: v.point,
                neighbors: Direction::ALL.map(|d| v.adjacency.get(d).and_then(point_of)),
                code: code.to_string(),
                edge_class: code.edge_class()?,
            });
        }
        let levels = self
            .levels
            .levels()
            .iter()
            .map(|level| level.iter().filter_map(|&id| point_of(id)).collect())
            .collect();
        let unreachable = self
            .unreachable()
            .into_iter()
            .filter_map(point_of)
            .collect();

        Ok(GraphArtifact {
            image_id: self.image_id.clone(),
            origin: self.origin.and_then(point_of),
            vertices,
            levels,
            unreachable,
        })
    }
}
