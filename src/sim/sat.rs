//! Separating axis theorem narrow-phase
//!
//! Every edge normal of both polygons is a candidate separating axis. If the
//! projections are disjoint on any of them the polygons are apart; otherwise
//! the smallest projection overlap estimates the penetration depth.
//!
//! The push is applied along the center-to-center line, not along the axis
//! of minimum overlap, so it is not a true minimum translation vector.

use glam::Vec2;

use super::polygon::Polygon;
use crate::consts::CONTACT_TOLERANCE;

/// Penetration estimate for an overlapping pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatOverlap {
    /// Smallest projection overlap over all tested axes
    pub depth: f32,
    /// Unit axis on which `depth` was measured
    pub axis: Vec2,
}

/// Project a vertex list onto `axis`, returning (min, max)
fn project(points: &[Vec2], axis: Vec2) -> (f32, f32) {
    let first = points[0].dot(axis);
    points[1..].iter().fold((first, first), |(min, max), p| {
        let q = p.dot(axis);
        (min.min(q), max.max(q))
    })
}

/// Unit outward normals of every edge of a counter-clockwise vertex list
fn edge_normals(points: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    (0..points.len()).filter_map(move |i| {
        let edge = points[(i + 1) % points.len()] - points[i];
        let normal = Vec2::new(edge.y, -edge.x).normalize_or_zero();
        // Zero-length edges carry no axis
        (normal != Vec2::ZERO).then_some(normal)
    })
}

/// Overlap test on two vertex lists; `None` when a separating axis exists
///
/// Intervals overlapping by no more than `CONTACT_TOLERANCE` only touch,
/// and touching counts as separated.
pub fn overlap(a: &[Vec2], b: &[Vec2]) -> Option<SatOverlap> {
    let mut best: Option<SatOverlap> = None;

    for axis in edge_normals(a).chain(edge_normals(b)) {
        let (min_a, max_a) = project(a, axis);
        let (min_b, max_b) = project(b, axis);

        let depth = max_a.min(max_b) - min_a.max(min_b);
        if depth <= CONTACT_TOLERANCE {
            return None;
        }
        if best.is_none_or(|current| depth < current.depth) {
            best = Some(SatOverlap { depth, axis });
        }
    }

    best
}

/// Side-effect-free collision test
pub fn detect(a: &Polygon, b: &Polygon) -> bool {
    overlap(&a.vertices(), &b.vertices()).is_some()
}

/// Test `a` against `b` and push them apart if they overlap
///
/// `b` moves away from `a` when pushable, otherwise `a` moves away from `b`.
/// The distance is the estimated depth plus `margin`. When the minimum
/// overlap is off the center line a single pass can leave residual overlap;
/// propagation re-checks the pair until it is clear.
pub fn resolve(a: &mut Polygon, b: &mut Polygon, margin: f32) -> bool {
    let Some(hit) = overlap(&a.vertices(), &b.vertices()) else {
        return false;
    };

    let mut direction = (b.center - a.center).normalize_or_zero();
    if direction == Vec2::ZERO {
        // Coincident centers: the line between them is undefined
        direction = hit.axis;
    }
    let push = direction * (hit.depth + margin);

    if b.pushable {
        b.center += push;
    } else {
        a.center -= push;
    }
    log::debug!("SAT push {:?} (depth {:.3})", push, hit.depth);

    true
}
