//! Arena settings
//!
//! Parsed from JSON by the native binary and the web bindings. Nothing here
//! is persisted; the UI owns storage.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ArenaError;

/// Narrow-phase collision algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Separating axis theorem
    #[default]
    Sat,
    /// Center-to-vertex spoke vs. edge intersection
    Diag,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Sat => "SAT",
            Algorithm::Diag => "DIAG",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sat" => Some(Algorithm::Sat),
            "diag" | "diagonal" | "spoke" => Some(Algorithm::Diag),
            _ => None,
        }
    }
}

/// Engine and driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Active narrow-phase algorithm
    pub algorithm: Algorithm,

    // === Driving ===
    /// Translation speed of the selected polygon (px/s)
    pub linear_speed: f32,
    /// Rotation speed of the selected polygon (rad/s)
    pub angular_speed: f32,

    // === Spawning ===
    pub min_sides: u32,
    pub max_sides: u32,
    /// Circumradius of newly spawned polygons
    pub radius: f32,

    // === Resolution ===
    /// Safety distance added to each push
    pub margin: f32,
    /// Propagation aborts after `polygon_count * guard_factor` checks
    pub guard_factor: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Sat,

            linear_speed: LINEAR_SPEED,
            angular_speed: ANGULAR_SPEED,

            min_sides: MIN_SIDES,
            max_sides: MAX_SIDES,
            radius: DEFAULT_RADIUS,

            margin: COLLISION_MARGIN,
            guard_factor: GUARD_FACTOR,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ArenaError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a JSON settings file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self, ArenaError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.min_sides < MIN_SIDES {
            return Err(ArenaError::InvalidConfig(format!(
                "min_sides must be at least {}",
                MIN_SIDES
            )));
        }
        if self.min_sides > self.max_sides {
            return Err(ArenaError::InvalidConfig(
                "min_sides must not exceed max_sides".to_string(),
            ));
        }
        if !(self.radius > 0.0) {
            return Err(ArenaError::InvalidConfig(
                "radius must be positive".to_string(),
            ));
        }
        if !(self.margin >= 0.0) {
            return Err(ArenaError::InvalidConfig(
                "margin must not be negative".to_string(),
            ));
        }
        if !(self.linear_speed >= 0.0) || !(self.angular_speed >= 0.0) {
            return Err(ArenaError::InvalidConfig(
                "speeds must not be negative".to_string(),
            ));
        }
        if self.guard_factor == 0 {
            return Err(ArenaError::InvalidConfig(
                "guard_factor must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Check a requested side count against the configured bounds
    pub fn check_sides(&self, sides: u32) -> Result<(), ArenaError> {
        if sides < self.min_sides || sides > self.max_sides {
            return Err(ArenaError::InvalidSideCount {
                sides,
                min: self.min_sides,
                max: self.max_sides,
            });
        }
        Ok(())
    }
}
