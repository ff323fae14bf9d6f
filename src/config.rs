//! Game configuration loaded from JSON.
//!
//! Physics constants are not configurable; only the game rules around them
//! (target spread, hit radius) and presentation settings are.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FRAME_INTERVAL_MS, HIT_RADIUS_M, TARGET_MAX_X_M, TARGET_MIN_X_M};
use crate::error::ConfigError;
use crate::target::TargetRange;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub target_min_x: i32,
    pub target_max_x: i32,
    pub hit_radius: f64,
    pub frame_interval_ms: u64,
    pub plot_width: usize,
    pub plot_height: usize,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_min_x: TARGET_MIN_X_M,
            target_max_x: TARGET_MAX_X_M,
            hit_radius: HIT_RADIUS_M,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            plot_width: 72,
            plot_height: 20,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_min_x > self.target_max_x {
            return Err(ConfigError::Invalid(format!(
                "target_min_x ({}) is greater than target_max_x ({})",
                self.target_min_x, self.target_max_x
            )));
        }
        if !self.hit_radius.is_finite() || self.hit_radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "hit_radius must be a non-negative number, got {}",
                self.hit_radius
            )));
        }
        if self.plot_width < 20 || self.plot_height < 5 {
            return Err(ConfigError::Invalid(format!(
                "plot must be at least 20x5, got {}x{}",
                self.plot_width, self.plot_height
            )));
        }
        Ok(())
    }

    pub fn target_range(&self) -> TargetRange {
        TargetRange::new(self.target_min_x, self.target_max_x).unwrap_or_default()
    }
}
