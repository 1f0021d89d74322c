//! Spoke intersection narrow-phase ("DIAG")
//!
//! A spoke is the segment from a polygon's center to one of its vertices.
//! Any spoke of one polygon that crosses an edge of the other has its tip
//! inside the other polygon; the part of the spoke beyond the crossing is
//! how far that tip penetrates. Those tails are averaged into one push.
//!
//! The test runs in both directions (a's spokes vs. b's edges, then b's
//! spokes vs. a's edges), re-deriving vertices in between because the first
//! direction may already have moved one of the polygons.

use glam::Vec2;

use super::polygon::Polygon;
use crate::consts::{CONTACT_TOLERANCE, IDENTICAL_TOLERANCE};
use crate::cross;

/// Parametric intersection of segment `p + t1·r` with segment `q + t2·s`
///
/// Returns `(t1, t2)` when both lie in `[0, 1)`, so the far endpoint of
/// either segment never counts. Parallel (or degenerate) segments never
/// intersect; parallelism is judged relative to the segment lengths.
pub fn segment_intersection(p: Vec2, r: Vec2, q: Vec2, s: Vec2) -> Option<(f32, f32)> {
    let denom = cross(r, s);
    if denom.abs() <= f32::EPSILON * r.length() * s.length() {
        return None;
    }
    let qp = q - p;
    let t1 = cross(qp, s) / denom;
    let t2 = cross(qp, r) / denom;

    ((0.0..1.0).contains(&t1) && (0.0..1.0).contains(&t2)).then_some((t1, t2))
}

/// Whether two vertex lists describe the same shape, ignoring order
pub fn identical(a: &[Vec2], b: &[Vec2], tolerance: f32) -> bool {
    let sorted = |points: &[Vec2]| {
        let mut points = points.to_vec();
        points.sort_by(|u, v| u.y.total_cmp(&v.y).then(u.x.total_cmp(&v.x)));
        points
    };
    if a.len() != b.len() {
        return false;
    }
    let close = |u: &Vec2, v: &Vec2| (u.x - v.x).abs() <= tolerance && (u.y - v.y).abs() <= tolerance;

    let (a, b) = (sorted(a), sorted(b));
    if a.iter().zip(&b).all(|(u, v)| close(u, v)) {
        return true;
    }
    // Sorting by y is unstable for vertices sharing a row up to rounding,
    // so fall back to a greedy match before declaring them different.
    let mut used = vec![false; b.len()];
    a.iter().all(|u| {
        match (0..b.len()).find(|&j| !used[j] && close(u, &b[j])) {
            Some(j) => {
                used[j] = true;
                true
            }
            None => false,
        }
    })
}

/// Averaged penetration of `from`'s spokes into `other`
///
/// `center` is the center of the polygon whose vertices are `from`. The
/// result points from that polygon into `other`; `None` when no spoke
/// crosses an edge by more than `CONTACT_TOLERANCE`.
pub fn spoke_displacement(center: Vec2, from: &[Vec2], other: &[Vec2]) -> Option<Vec2> {
    let mut sum = Vec2::ZERO;
    let mut count = 0u32;

    for &tip in from {
        let spoke = tip - center;
        for (i, &start) in other.iter().enumerate() {
            let edge = other[(i + 1) % other.len()] - start;
            if let Some((t1, _)) = segment_intersection(center, spoke, start, edge) {
                let tail = (1.0 - t1) * spoke;
                // A tip resting on the edge is contact
                if tail.length() > CONTACT_TOLERANCE {
                    sum += tail;
                    count += 1;
                }
            }
        }
    }

    (count > 0).then(|| sum / count as f32)
}

/// Side-effect-free collision test
pub fn detect(a: &Polygon, b: &Polygon) -> bool {
    let (va, vb) = (a.vertices(), b.vertices());
    identical(&va, &vb, IDENTICAL_TOLERANCE)
        || spoke_displacement(a.center, &va, &vb).is_some()
        || spoke_displacement(b.center, &vb, &va).is_some()
}

#[inline]
fn with_margin(displacement: Vec2, margin: f32) -> Vec2 {
    displacement + displacement.normalize_or_zero() * margin
}

/// Test `a` against `b` and push them apart if they overlap
///
/// Same push policy as SAT: `b` moves when pushable, otherwise `a` does.
/// Coincident shapes report a collision without moving anything.
pub fn resolve(a: &mut Polygon, b: &mut Polygon, margin: f32) -> bool {
    let (va, vb) = (a.vertices(), b.vertices());
    if identical(&va, &vb, IDENTICAL_TOLERANCE) {
        log::debug!("DIAG: coincident polygons at {:?}", a.center);
        return true;
    }

    let mut hit = false;

    // a's spokes into b: displacement points from a toward b
    if let Some(displacement) = spoke_displacement(a.center, &va, &vb) {
        let push = with_margin(displacement, margin);
        if b.pushable {
            b.center += push;
        } else {
            a.center -= push;
        }
        log::debug!("DIAG push {:?} (a into b)", push);
        hit = true;
    }

    // b's spokes into a: displacement points from b toward a
    let (va, vb) = (a.vertices(), b.vertices());
    if let Some(displacement) = spoke_displacement(b.center, &vb, &va) {
        let push = with_margin(displacement, margin);
        if b.pushable {
            b.center -= push;
        } else {
            a.center += push;
        }
        log::debug!("DIAG push {:?} (b into a)", push);
        hit = true;
    }

    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::COLLISION_MARGIN;

    fn square(x: f32, y: f32, pushable: bool) -> Polygon {
        Polygon::at(4, 50.0, Vec2::new(x, y), 0.0, pushable)
    }

    #[test]
    fn test_segment_intersection_crossing() {
        let hit = segment_intersection(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, -5.0),
            Vec2::new(0.0, 10.0),
        );
        let (t1, t2) = hit.unwrap();
        assert!((t1 - 0.5).abs() < 1e-6);
        assert!((t2 - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_segment_intersection_excludes_far_end() {
        // Touches exactly at the end of the first segment
        let hit = segment_intersection(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, -5.0),
            Vec2::new(0.0, 10.0),
        );
        assert!(hit.is_none());

        // Parallel
        let hit = segment_intersection(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(10.0, 0.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_segment_intersection_short_segments() {
        // cross(r, s) is 1e-8 here, well below f32::EPSILON
        let hit = segment_intersection(
            Vec2::ZERO,
            Vec2::new(1e-4, 0.0),
            Vec2::new(5e-5, -5e-5),
            Vec2::new(0.0, 1e-4),
        );
        let (t1, t2) = hit.unwrap();
        assert!((t1 - 0.5).abs() < 1e-3);
        assert!((t2 - 0.5).abs() < 1e-3);

        // Degenerate segment
        let hit = segment_intersection(Vec2::ZERO, Vec2::ZERO, Vec2::new(0.0, -1.0), Vec2::Y * 2.0);
        assert!(hit.is_none());
    }

    #[test]
    fn test_tiny_polygons_overlap() {
        let a = Polygon::at(5, 0.01, Vec2::ZERO, 0.0, true);
        let b = Polygon::at(5, 0.01, Vec2::new(0.015, 0.0), 0.0, true);
        let d = spoke_displacement(a.center, &a.vertices(), &b.vertices());
        assert!(d.is_some_and(|d| d.x > 0.0));
    }

    #[test]
    fn test_tip_resting_on_edge_is_contact() {
        // Diamond tip at (50, 0) on the left face of an axis-aligned square
        let half = 50.0 * std::f32::consts::FRAC_1_SQRT_2;
        let diamond = Polygon::at(4, 50.0, Vec2::ZERO, std::f32::consts::FRAC_PI_4, true);
        let square = square(50.0 + half, 0.0, true);
        assert!(spoke_displacement(diamond.center, &diamond.vertices(), &square.vertices()).is_none());
        assert!(!detect(&diamond, &square));
    }

    #[test]
    fn test_identical_ignores_order() {
        let a = square(10.0, 10.0, true);
        // A square turned a quarter is the same point set
        let b = Polygon::at(4, 50.0, Vec2::new(10.3, 9.8), std::f32::consts::FRAC_PI_2, true);
        assert!(identical(&a.vertices(), &b.vertices(), IDENTICAL_TOLERANCE));

        let c = square(12.0, 10.0, true);
        assert!(!identical(&a.vertices(), &c.vertices(), IDENTICAL_TOLERANCE));

        let d = Polygon::at(5, 50.0, Vec2::new(10.0, 10.0), 0.0, true);
        assert!(!identical(&a.vertices(), &d.vertices(), IDENTICAL_TOLERANCE));
    }

    fn pentagon(x: f32, y: f32, pushable: bool) -> Polygon {
        Polygon::at(5, 50.0, Vec2::new(x, y), 0.0, pushable)
    }

    #[test]
    fn test_spoke_displacement_points_into_other() {
        let a = pentagon(0.0, 0.0, true);
        let b = pentagon(60.0, 0.0, true);
        let d = spoke_displacement(a.center, &a.vertices(), &b.vertices()).unwrap();
        assert!(d.x > 0.0);
        assert!(d.length() > 20.0 && d.length() < 40.0, "{d:?}");

        let back = spoke_displacement(b.center, &b.vertices(), &a.vertices()).unwrap();
        assert!(back.x < 0.0);
    }

    #[test]
    fn test_resolve_pushes_b_then_clear() {
        let mut a = pentagon(0.0, 0.0, true);
        let mut b = pentagon(60.0, 0.0, true);
        assert!(resolve(&mut a, &mut b, COLLISION_MARGIN));
        assert_eq!(a.center, Vec2::ZERO);
        assert!(b.center.x > 90.0);
        assert!(!detect(&a, &b));
    }

    #[test]
    fn test_resolve_pushes_a_off_fixed_b() {
        let mut a = pentagon(0.0, 0.0, true);
        let mut b = pentagon(-60.0, 0.0, false);
        assert!(resolve(&mut a, &mut b, COLLISION_MARGIN));
        assert_eq!(b.center, Vec2::new(-60.0, 0.0));
        assert!(a.center.x > 30.0);
        assert!(!detect(&a, &b));
    }

    #[test]
    fn test_resolve_identical_reports_without_moving() {
        let mut a = Polygon::at(6, 50.0, Vec2::new(5.0, 5.0), 0.4, false);
        let mut b = a.clone();
        b.pushable = true;
        assert!(resolve(&mut a, &mut b, COLLISION_MARGIN));
        assert_eq!(a.center, Vec2::new(5.0, 5.0));
        assert_eq!(b.center, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_resolve_apart() {
        let mut a = square(0.0, 0.0, true);
        let mut b = square(0.0, 90.0, true);
        assert!(!resolve(&mut a, &mut b, COLLISION_MARGIN));
        assert_eq!(b.center, Vec2::new(0.0, 90.0));
    }
}
