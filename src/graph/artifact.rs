use serde::{Deserialize, Serialize};

use super::EdgeClass;
use crate::math::GridPoint;

/// Adjacency and connectivity of one vertex, keyed by coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexEntry {
    pub point: GridPoint,
    /// Neighbor per slot, in Up, Left, Down, Right order.
    pub neighbors: [Option<GridPoint>; 4],
    pub code: String,
    pub edge_class: EdgeClass,
}

/// Per-image graph side output: adjacency, level map and origin.
///
/// Everything is expressed in grid coordinates so the file can be read
/// without the in-memory vertex arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphArtifact {
    pub image_id: String,
    pub origin: Option<GridPoint>,
    pub vertices: Vec<VertexEntry>,
    pub levels: Vec<Vec<GridPoint>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unreachable: Vec<GridPoint>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Segment;
    use crate::graph::GraphAnnotator;

    #[test]
    fn json_shape() {
        let a = GridPoint::new(0, 0);
        let b = GridPoint::new(4, 0);
        let art = GraphAnnotator::new(vec![Segment::new(a, b)], "img", 1)
            .execute()
            .unwrap()
            .artifact()
            .unwrap();
        let json: serde_json::Value = serde_json::to_value(&art).unwrap();
        assert_eq!(json["origin"], serde_json::json!([0, 0]));
        assert_eq!(json["vertices"][0]["neighbors"], serde_json::json!([null, null, null, [4, 0]]));
        assert_eq!(json["vertices"][0]["code"], "0001");
        assert_eq!(json["vertices"][0]["edge_class"], 1);
        assert_eq!(json["levels"], serde_json::json!([[[0, 0]], [[4, 0]]]));
        assert!(json.get("unreachable").is_none());

        let back: GraphArtifact = serde_json::from_value(json).unwrap();
        assert_eq!(back, art);
        let far = back.vertices.iter().find(|v| v.point == b).unwrap();
        assert_eq!(far.code, "0100");
    }
}
