use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::math::GridPoint;

/// An axis-aligned bounding box over grid vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

impl BoundingBox {
    /// Computes the bounding box of a set of points.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::EmptyGraph` if there are no points.
    pub fn of_points(points: impl IntoIterator<Item = GridPoint>) -> Result<Self, GraphError> {
        let mut iter = points.into_iter();
        let first = iter.next().ok_or(GraphError::EmptyGraph)?;
        let init = Self {
            x_min: first.x,
            y_min: first.y,
            x_max: first.x,
            y_max: first.y,
        };
        Ok(iter.fold(init, |b, p| Self {
            x_min: b.x_min.min(p.x),
            y_min: b.y_min.min(p.y),
            x_max: b.x_max.max(p.x),
            y_max: b.y_max.max(p.y),
        }))
    }
}
