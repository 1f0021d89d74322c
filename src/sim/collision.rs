//! Narrow-phase selection and pairwise checks
//!
//! SAT and DIAG share one contract, `resolve(a, b) -> bool`, so the
//! propagation loop only ever talks to [`Algorithm`] and never needs to know
//! which one is active.

use super::polygon::Polygon;
use super::{broad, diag, sat};
use crate::settings::Algorithm;

impl Algorithm {
    /// Detect and resolve a collision between `a` and `b`
    ///
    /// Returns true iff they overlapped. Moves `b` away from `a` when `b` is
    /// pushable, otherwise moves `a` away from `b`.
    pub fn resolve(self, a: &mut Polygon, b: &mut Polygon, margin: f32) -> bool {
        match self {
            Algorithm::Sat => sat::resolve(a, b, margin),
            Algorithm::Diag => diag::resolve(a, b, margin),
        }
    }

    /// Overlap test without resolving anything
    pub fn detect(self, a: &Polygon, b: &Polygon) -> bool {
        match self {
            Algorithm::Sat => sat::detect(a, b),
            Algorithm::Diag => diag::detect(a, b),
        }
    }
}

/// Mutable access to two distinct polygons of the same slice
pub fn pair_mut(polygons: &mut [Polygon], i: usize, j: usize) -> (&mut Polygon, &mut Polygon) {
    assert_ne!(i, j, "a polygon cannot collide with itself");
    if i < j {
        let (head, tail) = polygons.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = polygons.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// Broad-phase then narrow-phase check of `polygons[i]` against `polygons[j]`
pub fn check_pair(
    algorithm: Algorithm,
    polygons: &mut [Polygon],
    i: usize,
    j: usize,
    margin: f32,
) -> bool {
    let (a, b) = pair_mut(polygons, i, j);
    broad::may_collide(a, b) && algorithm.resolve(a, b, margin)
}
