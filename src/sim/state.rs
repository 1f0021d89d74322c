//! Arena state
//!
//! The simulation context: the ordered polygon set, the selection and the
//! settings. Every engine entry point goes through an `Arena`; there is no
//! global state.

use glam::Vec2;
use serde::Serialize;

use super::broad::may_collide;
use super::polygon::Polygon;
use super::propagate::{Resolution, propagate};
use crate::error::ArenaError;
use crate::settings::{Algorithm, Settings};

/// The polygon set and everything needed to drive it
///
/// Index order is display order and identity: `selected` points into
/// `polygons`, and polygons are only ever appended.
#[derive(Debug, Clone, Serialize)]
pub struct Arena {
    pub polygons: Vec<Polygon>,
    pub selected: Option<usize>,
    pub settings: Settings,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Arena {
    pub fn new(settings: Settings) -> Self {
        Self {
            polygons: Vec::new(),
            selected: None,
            settings,
        }
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    fn selected_polygon_mut(&mut self) -> Option<&mut Polygon> {
        self.selected.and_then(|i| self.polygons.get_mut(i))
    }

    /// Try to spawn a polygon at the spawn pose
    ///
    /// The candidate is checked once, without propagation, against every
    /// existing polygon. Each one it overlaps starts blinking and the
    /// candidate is dropped (`Ok(false)`). Otherwise it is appended and
    /// selected (`Ok(true)`). Existing polygons are never moved: the
    /// candidate is always the pushable side of the check.
    pub fn try_insert(&mut self, sides: u32, pushable: bool) -> Result<bool, ArenaError> {
        self.settings.check_sides(sides)?;

        let spawn = Polygon::new(sides, self.settings.radius, pushable);
        let algorithm = self.settings.algorithm;
        let margin = self.settings.margin;

        let mut blocked = 0;
        for existing in &mut self.polygons {
            let mut candidate = spawn.clone();
            candidate.pushable = true;
            let mut scratch = existing.clone();
            if may_collide(&scratch, &candidate)
                && algorithm.resolve(&mut scratch, &mut candidate, margin)
            {
                existing.blink.trigger();
                blocked += 1;
            }
        }

        if blocked > 0 {
            log::warn!(
                "Spawn of {}-gon blocked by {} polygon(s)",
                sides,
                blocked
            );
            return Ok(false);
        }

        self.polygons.push(spawn);
        self.selected = Some(self.polygons.len() - 1);
        log::info!(
            "Spawned {}-gon #{} (pushable: {})",
            sides,
            self.polygons.len() - 1,
            pushable
        );
        Ok(true)
    }

    /// Resolve collisions caused by moving polygon `moved`
    pub fn propagate(&mut self, moved: usize) -> Result<Resolution, ArenaError> {
        if moved >= self.polygons.len() {
            return Err(ArenaError::NoSuchPolygon(moved));
        }
        Ok(propagate(&mut self.polygons, moved, &self.settings))
    }

    pub fn select(&mut self, index: usize) -> Result<(), ArenaError> {
        if index >= self.polygons.len() {
            return Err(ArenaError::NoSuchPolygon(index));
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Select the first polygon (in index order) containing `point`
    pub fn select_at(&mut self, point: Vec2) -> Option<usize> {
        let hit = self.polygons.iter().position(|p| p.contains_point(point))?;
        self.selected = Some(hit);
        Some(hit)
    }

    /// Flip pushability of the selected polygon, returning the new value
    pub fn toggle_pushable(&mut self) -> Option<bool> {
        let polygon = self.selected_polygon_mut()?;
        polygon.pushable = !polygon.pushable;
        Some(polygon.pushable)
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        if self.settings.algorithm != algorithm {
            log::info!("Collision algorithm: {}", algorithm.as_str());
        }
        self.settings.algorithm = algorithm;
    }

    /// Count down every polygon's blink timer
    pub fn advance_blinks(&mut self, dt: f32) {
        for polygon in &mut self.polygons {
            polygon.blink.advance(dt);
        }
    }

    /// All index pairs the active algorithm reports as overlapping
    pub fn overlapping_pairs(&self) -> Vec<(usize, usize)> {
        let algorithm = self.settings.algorithm;
        let mut pairs = Vec::new();
        for (i, a) in self.polygons.iter().enumerate() {
            for (j, b) in self.polygons.iter().enumerate().skip(i + 1) {
                if may_collide(a, b) && algorithm.detect(a, b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}
