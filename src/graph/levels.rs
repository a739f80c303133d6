use std::collections::VecDeque;

use slotmap::SecondaryMap;

use super::{VertexId, WallGraph};

/// Vertices grouped by breadth-first hop distance from a root vertex.
///
/// Level `n` holds the vertices first reached after `n` hops, in visit
/// order. Vertices outside the root's component are absent.
#[derive(Debug, Clone, Default)]
pub struct LevelMap {
    levels: Vec<Vec<VertexId>>,
    level_of: SecondaryMap<VertexId, usize>,
}

impl LevelMap {
    /// Breadth-first traversal of `graph` from `origin`.
    ///
    /// Neighbors are visited in slot order (Up, Left, Down, Right); each
    /// vertex keeps the first level it is assigned.
    #[must_use]
    pub fn build(graph: &WallGraph, origin: VertexId) -> Self {
        let mut map = Self::default();
        if graph.vertex(origin).is_none() {
            return map;
        }

        let mut queue = VecDeque::from([(origin, 0_usize)]);
        map.level_of.insert(origin, 0);
        while let Some((id, level)) = queue.pop_front() {
            if map.levels.len() <= level {
                map.levels.resize_with(level + 1, Vec::new);
            }
            map.levels[level].push(id);
            for next in graph.neighbors(id) {
                if !map.level_of.contains_key(next) {
                    map.level_of.insert(next, level + 1);
                    queue.push_back((next, level + 1));
                }
            }
        }
        map
    }

    /// Levels in increasing order; index is the hop distance.
    #[must_use]
    pub fn levels(&self) -> &[Vec<VertexId>] {
        &self.levels
    }

    #[must_use]
    pub fn level_of(&self, id: VertexId) -> Option<usize> {
        self.level_of.get(id).copied()
    }

    /// Deepest level, i.e. the root's eccentricity within its component.
    #[must_use]
    pub fn max_level(&self) -> Option<usize> {
        self.levels.len().checked_sub(1)
    }

    /// Number of vertices reached.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.level_of.len()
    }
}

/// The vertex closest to `(0, 0)`; ties go to the earliest inserted.
#[must_use]
pub fn canonical_origin(graph: &WallGraph) -> Option<VertexId> {
    let mut best: Option<(VertexId, f64)> = None;
    for (id, v) in graph.iter() {
        let d = v.point.norm();
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((id, d)),
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::SlotConflictPolicy;
    use crate::math::GridPoint;
    use proptest::prelude::*;

    fn gp(x: i64, y: i64) -> GridPoint {
        GridPoint::new(x, y)
    }

    fn graph_of(edges: &[((i64, i64), (i64, i64))]) -> WallGraph {
        let mut g = WallGraph::new();
        for &(a, b) in edges {
            g.connect(a.into(), b.into(), SlotConflictPolicy::KeepLast).unwrap();
        }
        g
    }

    fn points(g: &WallGraph, ids: &[VertexId]) -> Vec<GridPoint> {
        ids.iter().map(|&id| g.point(id).unwrap()).collect()
    }

    #[test]
    fn square_levels() {
        let g = graph_of(&[
            ((0, 0), (10, 0)),
            ((10, 0), (10, 10)),
            ((10, 10), (0, 10)),
            ((0, 10), (0, 0)),
        ]);
        let origin = canonical_origin(&g).unwrap();
        assert_eq!(g.point(origin), Some(gp(0, 0)));
        let lm = LevelMap::build(&g, origin);
        assert_eq!(lm.levels().len(), 3);
        assert_eq!(points(&g, &lm.levels()[0]), vec![gp(0, 0)]);
        let mut l1 = points(&g, &lm.levels()[1]);
        l1.sort();
        assert_eq!(l1, vec![gp(0, 10), gp(10, 0)]);
        assert_eq!(points(&g, &lm.levels()[2]), vec![gp(10, 10)]);
        assert_eq!(lm.max_level(), Some(2));
    }

    #[test]
    fn origin_tie_goes_to_first_inserted() {
        let mut g = WallGraph::new();
        let first = g.ensure_vertex(gp(3, 4));
        g.ensure_vertex(gp(4, 3));
        g.ensure_vertex(gp(0, 9));
        assert_eq!(canonical_origin(&g), Some(first));
    }

    #[test]
    fn empty_graph_has_no_origin() {
        assert!(canonical_origin(&WallGraph::new()).is_none());
    }

    #[test]
    fn disconnected_component_is_not_leveled() {
        // Known gap: the far room never appears in the level map.
        let g = graph_of(&[((0, 0), (5, 0)), ((100, 100), (105, 100))]);
        let lm = LevelMap::build(&g, canonical_origin(&g).unwrap());
        assert_eq!(lm.vertex_count(), 2);
        assert!(lm.level_of(g.find(gp(100, 100)).unwrap()).is_none());
    }

    #[test]
    fn path_eccentricity() {
        let g = graph_of(&[((0, 0), (0, 5)), ((0, 5), (0, 9)), ((0, 9), (7, 9))]);
        let lm = LevelMap::build(&g, canonical_origin(&g).unwrap());
        assert_eq!(lm.max_level(), Some(3));
        assert_eq!(lm.level_of(g.find(gp(7, 9)).unwrap()), Some(3));
    }

    proptest! {
        #[test]
        fn levels_are_hop_distances(
            edges in prop::collection::vec((0_i64..4, 0_i64..4, any::<bool>()), 1..24),
        ) {
            // Unit edges on a 5x5 lattice.
            let mut g = WallGraph::new();
            for &(x, y, horizontal) in &edges {
                let b = if horizontal { gp(x + 1, y) } else { gp(x, y + 1) };
                g.connect(gp(x, y), b, SlotConflictPolicy::KeepLast).unwrap();
            }
            let origin = canonical_origin(&g).unwrap();
            let lm = LevelMap::build(&g, origin);

            prop_assert_eq!(lm.level_of(origin), Some(0));
            let listed: usize = lm.levels().iter().map(Vec::len).sum();
            prop_assert_eq!(listed, lm.vertex_count());
            for (n, level) in lm.levels().iter().enumerate() {
                for &id in level {
                    prop_assert_eq!(lm.level_of(id), Some(n));
                    for nb in g.neighbors(id) {
                        let m = lm.level_of(nb).unwrap();
                        prop_assert!(m + 1 >= n && m <= n + 1);
                    }
                    if n > 0 {
                        prop_assert!(g.neighbors(id).any(|nb| lm.level_of(nb) == Some(n - 1)));
                    }
                }
            }
        }
    }
}
