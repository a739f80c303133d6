use crate::math::distance_2d::point_to_segment_dist;
use crate::math::intersect_2d::{segment_contact_2d, SegmentContact};
use crate::math::{Point2, TOLERANCE};

/// Finds every point where the boundaries of two different polygons meet.
///
/// Works on the original per-polygon rings, not the merged network, so
/// T-junctions and crossings show up even where merging introduced no vertex.
/// Collinear shared stretches contribute both of their ends.
#[must_use]
pub fn boundary_contacts(rings: &[Vec<(Point2, Point2)>]) -> Vec<Point2> {
    let mut points: Vec<Point2> = Vec::new();

    for i in 0..rings.len() {
        for j in (i + 1)..rings.len() {
            for (a0, a1) in &rings[i] {
                for (b0, b1) in &rings[j] {
                    match segment_contact_2d(a0, a1, b0, b1) {
                        Some(SegmentContact::Point(p)) => add_unique_point(&mut points, p),
                        Some(SegmentContact::Overlap(s, e)) => {
                            add_unique_point(&mut points, s);
                            add_unique_point(&mut points, e);
                        }
                        None => {}
                    }
                }
            }
        }
    }
    points
}

/// Splits the line `start`–`end` at every candidate point lying on it.
///
/// A candidate counts as on the line when its distance is below `tolerance`.
/// The result starts and ends with the line's endpoints (in sorted order) and
/// is sorted along the dominant axis: x when the line is wider than it is
/// tall, y otherwise.
#[must_use]
pub fn split_line(
    start: Point2,
    end: Point2,
    candidates: &[Point2],
    tolerance: f64,
) -> Vec<Point2> {
    let mut included = vec![start, end];
    for cp in candidates {
        let is_endpoint = (cp - start).norm() < tolerance || (cp - end).norm() < tolerance;
        if !is_endpoint && point_to_segment_dist(cp, &start, &end) < tolerance {
            included.push(*cp);
        }
    }

    let delta = end - start;
    if delta.x.abs() > delta.y.abs() {
        included.sort_by(|a, b| a.x.total_cmp(&b.x));
    } else {
        included.sort_by(|a, b| a.y.total_cmp(&b.y));
    }
    included
}

/// Adds a point to the list if not already present (within tolerance).
pub fn add_unique_point(points: &mut Vec<Point2>, p: Point2) {
    let tol_sq = TOLERANCE * 100.0;
    if !points.iter().any(|q| (q - p).norm_squared() < tol_sq) {
        points.push(p);
    }
}
