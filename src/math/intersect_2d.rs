use super::{Point2, Vector2, TOLERANCE};

/// How two bounded segments meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentContact {
    /// Crossing, T-junction, or shared endpoint.
    Point(Point2),
    /// Collinear segments sharing a stretch; the ends of the shared stretch.
    Overlap(Point2, Point2),
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Parallel segments (including collinear ones) return `None`; see
/// [`segment_contact_2d`] for the collinear case.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = cross_2d(&da, &db);
    if cross.abs() < TOLERANCE {
        return None;
    }

    let d = b0 - a0;
    let t = cross_2d(&d, &db) / cross;
    let u = cross_2d(&d, &da) / cross;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        let pt = a0 + da * t_clamped;
        Some((pt, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Full contact classification between two bounded segments.
///
/// Unlike [`segment_segment_intersect_2d`], collinear segments that share a
/// stretch report the ends of that stretch, and collinear segments that only
/// touch end-to-end report the touching point.
#[must_use]
pub fn segment_contact_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<SegmentContact> {
    if let Some((pt, _t, _u)) = segment_segment_intersect_2d(a0, a1, b0, b1) {
        return Some(SegmentContact::Point(pt));
    }

    let da = a1 - a0;
    let len_sq = da.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return None;
    }
    let len = len_sq.sqrt();

    // Parallel: only collinear pairs can still touch.
    let off0 = cross_2d(&da, &(b0 - a0)).abs() / len;
    let off1 = cross_2d(&da, &(b1 - a0)).abs() / len;
    if off0 > TOLERANCE * 100.0 || off1 > TOLERANCE * 100.0 {
        return None;
    }

    let tb0 = (b0 - a0).dot(&da) / len_sq;
    let tb1 = (b1 - a0).dot(&da) / len_sq;
    let lo = tb0.min(tb1).max(0.0);
    let hi = tb0.max(tb1).min(1.0);
    let eps = TOLERANCE * 100.0 / len;
    if lo > hi + eps {
        return None;
    }

    let start = a0 + da * lo;
    if (hi - lo) <= eps {
        return Some(SegmentContact::Point(start));
    }
    Some(SegmentContact::Overlap(start, a0 + da * hi))
}

fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
