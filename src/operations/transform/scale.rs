use crate::geometry::Segment;
use crate::math::{GridPoint, Point2};

/// Rescales and translates segments into a target coordinate space.
///
/// Every endpoint coordinate maps as `new = old * scale + offset`, truncated
/// toward zero. Scale factors and offsets come from the image transform that
/// fitted the source raster onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSegments {
    scale_x: f64,
    scale_y: f64,
    offset_x: f64,
    offset_y: f64,
}

impl ScaleSegments {
    /// Creates a pure scaling (no offset).
    #[must_use]
    pub fn new(scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x,
            scale_y,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Adds a per-axis translation applied after scaling.
    #[must_use]
    pub fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    /// Maps a single grid point.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn apply(&self, p: GridPoint) -> GridPoint {
        GridPoint::truncate(&Point2::new(
            p.x as f64 * self.scale_x + self.offset_x,
            p.y as f64 * self.scale_y + self.offset_y,
        ))
    }

    /// Executes the mapping, one output segment per input segment.
    ///
    /// Segments that collapse to a point or coincide after truncation are
    /// kept; use [`crate::operations::boundary::dedup_segments`] to drop them.
    #[must_use]
    pub fn execute(&self, segments: &[Segment]) -> Vec<Segment> {
        segments
            .iter()
            .map(|s| Segment::new(self.apply(s.p1), self.apply(s.p2)))
            .collect()
    }
}
