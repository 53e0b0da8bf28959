//! Tunable generation constants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest grid side that still leaves room for a 2x2 seed room inside the
/// upper half of the anchor band plus its padding and the reserved border.
pub const MIN_GRID_SIDE: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Exclusive upper bound for the first room's sides.
    pub seed_room_max_extent: i32,
    /// Exclusive upper bound for every later room's sides.
    pub room_max_extent: i32,
    pub hall_min_length: i32,
    /// Exclusive.
    pub hall_max_length: i32,
    /// Exclusive upper bound for the number of room/corridor attempts per layer.
    pub max_system_attempts: u32,
    pub overworld_seed_mask: u64,
    pub fill_void: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 30,
            seed_room_max_extent: 15,
            room_max_extent: 10,
            hall_min_length: 2,
            hall_max_length: 14,
            max_system_attempts: 10_000,
            overworld_seed_mask: 2,
            fill_void: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid {width}x{height} is smaller than the {min}x{min} minimum", min = MIN_GRID_SIDE)]
    GridTooSmall { width: usize, height: usize },
    #[error("{name} must be at least 3, got {value}")]
    ExtentTooSmall { name: &'static str, value: i32 },
    #[error("hall length range [{min}, {max}) holds no length of at least 2")]
    EmptyHallRange { min: i32, max: i32 },
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GRID_SIDE || self.height < MIN_GRID_SIDE {
            return Err(ConfigError::GridTooSmall { width: self.width, height: self.height });
        }
        for (name, value) in [
            ("seed_room_max_extent", self.seed_room_max_extent),
            ("room_max_extent", self.room_max_extent),
        ] {
            if value < 3 {
                return Err(ConfigError::ExtentTooSmall { name, value });
            }
        }
        if self.hall_max_length <= self.hall_min_length.max(2) {
            return Err(ConfigError::EmptyHallRange {
                min: self.hall_min_length,
                max: self.hall_max_length,
            });
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
