use crate::math::{Point2, Vector2, TOLERANCE};

/// A maximal straight line in the merged boundary network.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedLine {
    pub start: Point2,
    pub end: Point2,
}

/// Merges polygon boundary rings into a shared line network.
///
/// Groups boundary edges by supporting line and merges overlapping or
/// touching extents, so a wall traced by two polygons appears once.
/// Lines come out in order of first appearance of their supporting line.
#[must_use]
pub fn merge_boundaries(rings: &[Vec<(Point2, Point2)>]) -> Vec<MergedLine> {
    let mut groups: Vec<SupportingLine> = Vec::new();

    for &(a, b) in rings.iter().flatten() {
        let key = supporting_line_key(a, b);
        let t_a = project_param(&key, a);
        let t_b = project_param(&key, b);
        let interval = if t_a <= t_b {
            Extent { lo: (t_a, a), hi: (t_b, b) }
        } else {
            Extent { lo: (t_b, b), hi: (t_a, a) }
        };

        match groups.iter_mut().find(|g| same_supporting_line(&g.key, &key)) {
            Some(g) => g.intervals.push(interval),
            None => groups.push(SupportingLine {
                key,
                intervals: vec![interval],
            }),
        }
    }

    let mut result = Vec::new();
    for g in &mut groups {
        for extent in merge_intervals(&mut g.intervals) {
            result.push(MergedLine {
                start: extent.lo.1,
                end: extent.hi.1,
            });
        }
    }
    result
}

/// Supporting line: foot of the perpendicular from `(0,0)` + unit direction.
///
/// The direction is canonicalized so that `dx > 0`, or `dx == 0 && dy > 0`.
#[derive(Debug, Clone)]
struct LineKey {
    origin: Point2,
    dir: Vector2,
}

struct SupportingLine {
    key: LineKey,
    intervals: Vec<Extent>,
}

/// Extent of an edge along its supporting line. Ends keep the original
/// vertex so merged lines never carry reconstructed coordinates.
#[derive(Debug, Clone, Copy)]
struct Extent {
    lo: (f64, Point2),
    hi: (f64, Point2),
}

fn supporting_line_key(a: Point2, b: Point2) -> LineKey {
    let mut dir = (b - a).normalize();
    if dir.x < -TOLERANCE || (dir.x.abs() < TOLERANCE && dir.y < 0.0) {
        dir = -dir;
    }
    let dot = a.coords.dot(&dir);
    LineKey {
        origin: a - dir * dot,
        dir,
    }
}

fn project_param(key: &LineKey, p: Point2) -> f64 {
    (p - key.origin).dot(&key.dir)
}

fn same_supporting_line(a: &LineKey, b: &LineKey) -> bool {
    let cross = a.dir.x * b.dir.y - a.dir.y * b.dir.x;
    if cross.abs() > TOLERANCE * 100.0 {
        return false;
    }
    if a.dir.dot(&b.dir) < 1.0 - TOLERANCE * 100.0 {
        return false;
    }
    (a.origin - b.origin).norm_squared() < TOLERANCE * 100.0
}

/// Merges overlapping or touching extents and returns the union.
fn merge_intervals(intervals: &mut [Extent]) -> Vec<Extent> {
    intervals.sort_by(|a, b| a.lo.0.total_cmp(&b.lo.0));
    let mut merged: Vec<Extent> = Vec::with_capacity(intervals.len());
    for &ext in intervals.iter() {
        match merged.last_mut() {
            Some(last) if ext.lo.0 <= last.hi.0 + TOLERANCE => {
                if ext.hi.0 > last.hi.0 {
                    last.hi = ext.hi;
                }
            }
            _ => merged.push(ext),
        }
    }
    merged
}
