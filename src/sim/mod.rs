//! Collision engine
//!
//! Everything here is pure, single-threaded and deterministic:
//! - Vertices are derived from pose on every query, never cached
//! - Pairs are visited in polygon index order
//! - No rendering or platform dependencies

pub mod broad;
pub mod collision;
pub mod diag;
pub mod polygon;
pub mod propagate;
pub mod sat;
pub mod state;
pub mod tick;

pub use broad::may_collide;
pub use collision::{check_pair, pair_mut};
pub use polygon::{Blink, Polygon};
pub use propagate::{Resolution, propagate, propagate_from};
pub use state::Arena;
pub use tick::{StepInput, step};
