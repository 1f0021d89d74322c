//! Push propagation across the whole polygon set
//!
//! Starting from the polygon that just moved, every other polygon is checked
//! in index order. A pushed polygon becomes the new source of disturbance;
//! hitting an immovable polygon pushes the source back and re-checks it.
//! The walk is depth-first and bounded by a check counter: once it exceeds
//! `polygon_count * guard_factor` the arrangement is treated as
//! non-convergent and the whole set is restored from the snapshot.

use super::collision::check_pair;
use super::polygon::Polygon;
use crate::settings::{Algorithm, Settings};

/// Outcome of one propagation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Every collision reachable from the moved polygon was resolved
    Settled { checks: usize },
    /// The cycle guard fired and the snapshot was restored
    RolledBack { checks: usize },
}

impl Resolution {
    pub fn is_rolled_back(&self) -> bool {
        matches!(self, Resolution::RolledBack { .. })
    }

    /// Number of propagation visits performed
    pub fn checks(&self) -> usize {
        match *self {
            Resolution::Settled { checks } | Resolution::RolledBack { checks } => checks,
        }
    }
}

/// Cycle guard tripped
struct Diverged;

struct Propagator<'a> {
    polygons: &'a mut [Polygon],
    algorithm: Algorithm,
    margin: f32,
    checks: usize,
    limit: usize,
}

impl Propagator<'_> {
    fn visit(&mut self, moved: usize) -> Result<(), Diverged> {
        self.checks += 1;
        if self.checks > self.limit {
            return Err(Diverged);
        }

        for other in 0..self.polygons.len() {
            if other == moved {
                continue;
            }
            if check_pair(self.algorithm, self.polygons, moved, other, self.margin) {
                if self.polygons[other].pushable {
                    // The disturbance has been handed off
                    self.visit(other)?;
                } else {
                    // Bounced off an obstacle; the source moved again
                    self.visit(moved)?;
                }
            }
        }

        Ok(())
    }
}

/// Resolve every collision caused by moving `polygons[moved]`
///
/// `snapshot` is the state restored if the cycle guard fires; it must have
/// the same length as `polygons`. The moved polygon is treated as pushable
/// for the duration of the call and its flag is restored afterwards.
pub fn propagate_from(
    polygons: &mut [Polygon],
    moved: usize,
    settings: &Settings,
    snapshot: &[Polygon],
) -> Resolution {
    debug_assert_eq!(polygons.len(), snapshot.len());

    let pushable = polygons[moved].pushable;
    polygons[moved].pushable = true;

    let mut propagator = Propagator {
        limit: polygons.len() * settings.guard_factor,
        polygons: &mut *polygons,
        algorithm: settings.algorithm,
        margin: settings.margin,
        checks: 0,
    };
    let outcome = propagator.visit(moved);
    let checks = propagator.checks;

    let resolution = match outcome {
        Ok(()) => Resolution::Settled { checks },
        Err(Diverged) => {
            log::warn!(
                "Propagation from polygon {} did not converge after {} checks, rolling back",
                moved,
                checks
            );
            polygons.clone_from_slice(snapshot);
            Resolution::RolledBack { checks }
        }
    };

    polygons[moved].pushable = pushable;
    resolution
}

/// Resolve collisions from `polygons[moved]`, snapshotting the current state
pub fn propagate(polygons: &mut [Polygon], moved: usize, settings: &Settings) -> Resolution {
    let snapshot = polygons.to_vec();
    propagate_from(polygons, moved, settings, &snapshot)
}
