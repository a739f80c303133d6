pub mod distance_2d;
pub mod intersect_2d;

use std::fmt;

use serde::{Deserialize, Serialize};

/// 2D point type used before coordinates are resolved to the integer grid.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Distance to an integer below which a computed coordinate is treated as
/// that integer when resolving onto the grid.
pub const SNAP_TOLERANCE: f64 = 1e-6;

/// Integer vertex coordinate on the annotation (or canvas) pixel grid.
///
/// Identity is by value: two grid points with equal coordinates are the same
/// graph vertex. Serializes as a `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct GridPoint {
    pub x: i64,
    pub y: i64,
}

impl GridPoint {
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Truncates each coordinate toward zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn truncate(p: &Point2) -> Self {
        Self {
            x: p.x.trunc() as i64,
            y: p.y.trunc() as i64,
        }
    }

    /// Resolves a computed coordinate onto the grid.
    ///
    /// Values within [`SNAP_TOLERANCE`] of an integer snap to it, everything
    /// else truncates toward zero like [`GridPoint::truncate`].
    #[must_use]
    pub fn resolve(p: &Point2) -> Self {
        let snap = |v: f64| {
            let r = v.round();
            if (v - r).abs() < SNAP_TOLERANCE {
                r
            } else {
                v
            }
        };
        Self::truncate(&Point2::new(snap(p.x), snap(p.y)))
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_point2(self) -> Point2 {
        Point2::new(self.x as f64, self.y as f64)
    }

    /// Euclidean distance to the coordinate origin.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn norm(self) -> f64 {
        (self.x as f64).hypot(self.y as f64)
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<[i64; 2]> for GridPoint {
    fn from([x, y]: [i64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<GridPoint> for [i64; 2] {
    fn from(p: GridPoint) -> Self {
        [p.x, p.y]
    }
}

impl From<(i64, i64)> for GridPoint {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}
