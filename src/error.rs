//! Error type shared by configuration loading and arena commands
//!
//! Spawn conflicts and non-convergent resolution are not errors: they are
//! ordinary outcomes reported by `try_insert` and `propagate`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("side count {sides} outside allowed range [{min}, {max}]")]
    InvalidSideCount { sides: u32, min: u32, max: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("no polygon at index {0}")]
    NoSuchPolygon(usize),
}
