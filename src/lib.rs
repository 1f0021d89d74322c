//! Poly Arena - regular polygons that never overlap
//!
//! Core modules:
//! - `sim`: Collision engine (geometry, broad-phase, SAT/DIAG narrow-phase, propagation)
//! - `settings`: Runtime configuration (algorithm, speeds, side-count bounds)
//! - `error`: Crate error type
//! - `web`: wasm-bindgen surface for the browser UI (wasm32 only)

pub mod error;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::ArenaError;
pub use settings::{Algorithm, Settings};

use glam::Vec2;

/// Engine configuration constants
pub mod consts {
    /// Frame rate the per-frame speed constants are expressed at
    pub const REFERENCE_FPS: f32 = 144.0;
    /// Fixed step used by the scripted native session
    pub const SIM_DT: f32 = 1.0 / REFERENCE_FPS;

    /// Polygon defaults
    pub const DEFAULT_RADIUS: f32 = 50.0;
    pub const DEFAULT_SIDES: u32 = 5;
    pub const MIN_SIDES: u32 = 3;
    pub const MAX_SIDES: u32 = 40;

    /// Translation speed (px/s), 1.3 px per reference frame
    pub const LINEAR_SPEED: f32 = 1.3 * REFERENCE_FPS;
    /// Rotation speed (rad/s), 0.03 rad per reference frame
    pub const ANGULAR_SPEED: f32 = 0.03 * REFERENCE_FPS;

    /// Extra distance added to every resolved push
    pub const COLLISION_MARGIN: f32 = 0.5;
    /// Penetration at or below this depth is contact, not overlap
    pub const CONTACT_TOLERANCE: f32 = 1e-3;
    /// Two vertex sets closer than this (per coordinate) count as identical
    pub const IDENTICAL_TOLERANCE: f32 = 1.0;
    /// Propagation gives up after `polygon_count * GUARD_FACTOR` checks
    pub const GUARD_FACTOR: usize = 10;

    /// Rejection blink timings (seconds)
    pub const BLINK_ON: f32 = 0.15;
    pub const BLINK_OFF: f32 = 0.1;
    pub const BLINK_REPEATS: u32 = 3;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// 2D cross product (z component of the 3D cross)
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}
