//! Per-frame step driver
//!
//! Applies the user's turn/move intent to the selected polygon and resolves
//! the fallout. The polygon set is snapshotted before the move, so a step
//! that cannot converge is undone completely, movement included.

use super::propagate::{Resolution, propagate_from};
use super::state::Arena;

/// Held keys for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub forward: bool,
    pub backward: bool,
}

impl StepInput {
    /// Net turn direction: -1 left, +1 right, 0 none or both
    fn turn(&self) -> f32 {
        match (self.turn_left, self.turn_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Net drive direction: +1 forward, -1 backward, 0 none or both
    fn drive(&self) -> f32 {
        match (self.forward, self.backward) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

/// Advance the arena by one external time step of `dt` seconds
///
/// Returns `None` when nothing was driven this step (no selection or no
/// net input), otherwise the propagation outcome.
pub fn step(arena: &mut Arena, input: &StepInput, dt: f32) -> Option<Resolution> {
    arena.advance_blinks(dt);

    let selected = arena.selected.filter(|&i| i < arena.polygons.len())?;
    let (turn, drive) = (input.turn(), input.drive());
    if turn == 0.0 && drive == 0.0 {
        return None;
    }

    let snapshot = arena.polygons.clone();

    let angular = arena.settings.angular_speed * dt;
    let linear = arena.settings.linear_speed * dt;
    let polygon = &mut arena.polygons[selected];
    if turn < 0.0 {
        polygon.turn_left(angular);
    } else if turn > 0.0 {
        polygon.turn_right(angular);
    }
    if drive > 0.0 {
        polygon.move_forward(linear);
    } else if drive < 0.0 {
        polygon.move_backward(linear);
    }

    let resolution = propagate_from(&mut arena.polygons, selected, &arena.settings, &snapshot);
    if resolution.is_rolled_back() {
        log::debug!("Step undone for polygon {}", selected);
    }
    Some(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::{Algorithm, Settings};
    use crate::sim::Polygon;
    use glam::Vec2;

    fn forward() -> StepInput {
        StepInput {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_step_without_selection() {
        let mut arena = Arena::default();
        assert_eq!(step(&mut arena, &forward(), SIM_DT), None);
    }

    #[test]
    fn test_idle_step_only_ticks_blinks() {
        let mut arena = Arena::default();
        arena.try_insert(5, true).unwrap();
        arena.polygons[0].blink.trigger();
        let timer = arena.polygons[0].blink.timer;
        let center = arena.polygons[0].center;

        assert_eq!(step(&mut arena, &StepInput::default(), SIM_DT), None);
        assert!(arena.polygons[0].blink.timer < timer);
        assert_eq!(arena.polygons[0].center, center);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut arena = Arena::default();
        arena.try_insert(4, true).unwrap();
        let before = arena.polygons[0].clone();
        let input = StepInput {
            turn_left: true,
            turn_right: true,
            forward: true,
            backward: true,
        };
        assert_eq!(step(&mut arena, &input, SIM_DT), None);
        assert_eq!(arena.polygons[0], before);
    }

    #[test]
    fn test_drive_is_time_scaled() {
        let mut arena = Arena::default();
        arena.try_insert(4, true).unwrap();
        let start = arena.polygons[0].center;

        let resolution = step(&mut arena, &forward(), 0.5).unwrap();
        assert_eq!(resolution, Resolution::Settled { checks: 1 });
        let moved = arena.polygons[0].center - start;
        assert!((moved - Vec2::new(0.0, arena.settings.linear_speed * 0.5)).length() < 1e-3);

        let turn = StepInput {
            turn_right: true,
            ..Default::default()
        };
        step(&mut arena, &turn, 0.25).unwrap();
        assert!((arena.polygons[0].rotation - arena.settings.angular_speed * 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_drive_into_pushable_shoves_it() {
        for algorithm in [Algorithm::Sat, Algorithm::Diag] {
            let mut arena = Arena::new(Settings {
                algorithm,
                ..Settings::default()
            });
            arena.polygons.push(Polygon::at(5, 50.0, Vec2::new(0.0, 95.0), 0.0, true));
            arena.polygons.push(Polygon::at(5, 50.0, Vec2::ZERO, 0.0, false));
            arena.select(1).unwrap();

            for _ in 0..30 {
                let resolution = step(&mut arena, &forward(), SIM_DT).unwrap();
                assert!(!resolution.is_rolled_back());
            }
            assert!(arena.polygons[1].center.y > 30.0);
            assert!(arena.polygons[0].center.y > 95.0);
            assert!(arena.overlapping_pairs().is_empty());
            // Driven polygon keeps its own flag
            assert!(!arena.polygons[1].pushable);
        }
    }

    #[test]
    fn test_blocked_move_is_undone() {
        let mut arena = Arena::default();
        arena.polygons.push(Polygon::at(4, 50.0, Vec2::new(-70.0, 0.0), 0.0, false));
        arena.polygons.push(Polygon::at(4, 50.0, Vec2::new(70.0, 0.0), 0.0, false));
        arena.polygons.push(Polygon::at(4, 50.0, Vec2::new(0.0, -10.0), 0.0, true));
        arena.select(2).unwrap();
        let before = arena.polygons.clone();

        let resolution = step(&mut arena, &forward(), SIM_DT).unwrap();
        assert!(resolution.is_rolled_back());
        assert_eq!(arena.polygons, before);
    }
}
