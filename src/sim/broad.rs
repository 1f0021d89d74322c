//! Broad-phase rejection
//!
//! Every polygon lies inside its circumcircle, so disjoint circles rule out
//! any overlap. Both narrow-phase algorithms are gated on this test.

use super::polygon::Polygon;

/// True iff the circumcircles of `a` and `b` overlap or touch
#[inline]
pub fn may_collide(a: &Polygon, b: &Polygon) -> bool {
    a.center.distance(b.center) <= a.radius + b.radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_circles_apart() {
        let a = Polygon::at(5, 50.0, Vec2::ZERO, 0.0, true);
        let b = Polygon::at(5, 50.0, Vec2::new(100.5, 0.0), 0.0, true);
        assert!(!may_collide(&a, &b));
    }

    #[test]
    fn test_circles_touching_counts() {
        let a = Polygon::at(3, 30.0, Vec2::ZERO, 0.0, true);
        let b = Polygon::at(8, 20.0, Vec2::new(0.0, 50.0), 1.0, false);
        assert!(may_collide(&a, &b));
        assert!(may_collide(&b, &a));
    }
}
