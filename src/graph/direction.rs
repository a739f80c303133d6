use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::math::GridPoint;

/// Canonical neighbor direction in image coordinates (y grows downward).
///
/// The discriminant is the slot index in adjacency records and connectivity
/// codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up = 0,
    Left = 1,
    Down = 2,
    Right = 3,
}

impl Direction {
    /// All directions in slot order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Left, Self::Down, Self::Right];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Left => "left",
            Self::Down => "down",
            Self::Right => "right",
        }
    }

    /// Direction of `target` as seen from `origin`.
    ///
    /// Sectors by angle in degrees (counter-clockwise from +x, y up):
    /// `[-45, 45]` is Right, `(45, 135]` is Up, `[-135, -45)` is Down and
    /// everything beyond ±135 is Left. Decided on the integer offsets so the
    /// diagonal boundaries are exact.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::ZeroLengthSegment` if the two points coincide.
    pub fn classify(origin: GridPoint, target: GridPoint) -> Result<Self, GraphError> {
        if origin == target {
            return Err(GraphError::ZeroLengthSegment {
                from: origin,
                to: target,
            });
        }
        let dx = target.x - origin.x;
        // Image rows grow downward.
        let dy = origin.y - target.y;
        let dir = if dx > 0 && dy.abs() <= dx {
            Self::Right
        } else if dy > 0 && -dy <= dx && dx < dy {
            Self::Up
        } else if dy < 0 && dy <= dx && dx < -dy {
            Self::Down
        } else {
            Self::Left
        };
        Ok(dir)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
