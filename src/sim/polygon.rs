//! Regular polygon geometry
//!
//! A polygon is stored as center, circumradius, rotation and side count.
//! The vertex list is derived on demand and never cached, so it is always
//! consistent with the latest move or turn.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::polar_to_cartesian;

/// Transient highlight used when a polygon blocks a spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Blink {
    /// Seconds left in the current blink sequence (0 = idle)
    pub timer: f32,
    /// Lit part of each period (seconds)
    pub on: f32,
    /// Dark part of each period (seconds)
    pub off: f32,
    /// Number of on/off periods per trigger
    pub repeats: u32,
}

impl Default for Blink {
    fn default() -> Self {
        Self {
            timer: 0.0,
            on: BLINK_ON,
            off: BLINK_OFF,
            repeats: BLINK_REPEATS,
        }
    }
}

impl Blink {
    #[inline]
    fn period(&self) -> f32 {
        self.on + self.off
    }

    /// Start (or restart) the blink sequence
    pub fn trigger(&mut self) {
        self.timer = self.period() * self.repeats as f32;
    }

    /// Count down by one external time step
    pub fn advance(&mut self, dt: f32) {
        self.timer = (self.timer - dt).max(0.0);
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }

    /// Whether the highlight should be drawn right now
    pub fn is_lit(&self) -> bool {
        if !self.is_active() || self.period() <= 0.0 {
            return false;
        }
        let elapsed = self.period() * self.repeats as f32 - self.timer;
        elapsed.rem_euclid(self.period()) < self.on
    }
}

/// A convex regular polygon in arena-local coordinates (y up)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    /// Offset from the arena origin
    pub center: Vec2,
    /// Circumradius
    pub radius: f32,
    /// Radians, clockwise; unbounded
    pub rotation: f32,
    pub sides: u32,
    /// Whether other polygons may shove this one
    pub pushable: bool,
    pub blink: Blink,
}

impl Polygon {
    /// Create a polygon at the spawn pose (arena origin, rotation 0)
    ///
    /// Odd-sided shapes have an apex on top and a flat bottom, so their
    /// vertical extent is not symmetric about the circumcenter. The center
    /// is lowered so the bounding box is centered on the spawn point, which
    /// lines them up with even-sided shapes.
    pub fn new(sides: u32, radius: f32, pushable: bool) -> Self {
        debug_assert!(sides >= MIN_SIDES, "polygon needs at least 3 sides");
        let mut polygon = Self {
            center: Vec2::ZERO,
            radius,
            rotation: 0.0,
            sides,
            pushable,
            blink: Blink::default(),
        };

        if sides % 2 == 1 {
            let points = polygon.vertices();
            let opposite = (sides as usize).div_ceil(2);
            let height = points[0].y - points[opposite].y;
            polygon.center.y -= radius - height / 2.0;
        }

        polygon
    }

    /// Polygon at an explicit pose
    pub fn at(sides: u32, radius: f32, center: Vec2, rotation: f32, pushable: bool) -> Self {
        Self {
            center,
            radius,
            rotation,
            sides,
            pushable,
            blink: Blink::default(),
        }
    }

    /// Direction the polygon moves when driven forward
    #[inline]
    pub fn heading(&self) -> Vec2 {
        polar_to_cartesian(1.0, FRAC_PI_2 - self.rotation)
    }

    /// Vertex list, counter-clockwise, starting at angle
    /// `π/2 − rotation` (plus half a step for even side counts)
    pub fn vertices(&self) -> Vec<Vec2> {
        let n = self.sides as usize;
        let step = TAU / self.sides as f32;
        let offset = if self.sides % 2 == 0 {
            PI / self.sides as f32
        } else {
            0.0
        };
        let start = FRAC_PI_2 - self.rotation + offset;

        (0..n)
            .map(|i| self.center + polar_to_cartesian(self.radius, start + i as f32 * step))
            .collect()
    }

    pub fn turn_left(&mut self, delta: f32) {
        self.rotation -= delta;
    }

    pub fn turn_right(&mut self, delta: f32) {
        self.rotation += delta;
    }

    pub fn move_forward(&mut self, distance: f32) {
        self.center += self.heading() * distance;
    }

    pub fn move_backward(&mut self, distance: f32) {
        self.center -= self.heading() * distance;
    }

    /// Ray-casting point containment against the current vertex list
    pub fn contains_point(&self, point: Vec2) -> bool {
        let points = self.vertices();
        let mut inside = false;
        let mut j = points.len() - 1;
        for i in 0..points.len() {
            let (pi, pj) = (points[i], points[j]);
            if (pi.y > point.y) != (pj.y > point.y)
                && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}
