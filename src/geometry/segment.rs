use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::GridPoint;

/// An undirected wall segment between two grid vertices.
///
/// Endpoints are stored in a canonical order (`p1 <= p2`), so two segments
/// over the same pair of vertices compare equal regardless of how they were
/// traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub p1: GridPoint,
    pub p2: GridPoint,
}

impl Segment {
    #[must_use]
    pub fn new(a: GridPoint, b: GridPoint) -> Self {
        if b < a {
            Self { p1: b, p2: a }
        } else {
            Self { p1: a, p2: b }
        }
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.p1, self.p2)
    }
}
