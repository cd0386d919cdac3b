//! Mission configuration.
//!
//! Every field has a default, so a config file only needs to name what it
//! overrides. Parsing goes through `serde_path_to_error` so a bad value is
//! reported with the path of the offending field.

use std::path::Path;
use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Tunables for one assassination run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    /// RNG seed. Same seed = same guard counts and placements.
    pub seed: u64,
    /// Where each target is created, in slot order.
    pub target_spawns: [Vec3; TARGET_COUNT],
    pub guard_count_min: u32,
    pub guard_count_max: u32,
    /// Half-width of the square guards are scattered in around the target.
    pub guard_spread: f32,
    pub guard_armor: u32,
    pub blip_scale: f32,
    pub start_subtitle_secs: u64,
    /// Wanted level a player kill raises the player to.
    pub wanted_floor: u8,
    pub money_reward: i32,
    pub xp_reward: i32,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            target_spawns: TARGET_SPAWNS,
            guard_count_min: GUARD_COUNT_MIN,
            guard_count_max: GUARD_COUNT_MAX,
            guard_spread: GUARD_SPREAD,
            guard_armor: GUARD_ARMOR,
            blip_scale: TARGET_BLIP_SCALE,
            start_subtitle_secs: START_SUBTITLE_SECS,
            wanted_floor: WANTED_FLOOR,
            money_reward: MONEY_REWARD,
            xp_reward: XP_REWARD,
        }
    }
}

impl MissionConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let deserializer = &mut serde_json::Deserializer::from_str(json);
        let config: Self =
            serde_path_to_error::deserialize(deserializer).map_err(|err| ConfigError::Parse {
                path: err.path().to_string(),
                message: err.inner().to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.guard_count_min == 0 {
            return Err(ConfigError::Invalid(
                "guard_count_min must be at least 1".into(),
            ));
        }
        if self.guard_count_min > self.guard_count_max {
            return Err(ConfigError::Invalid(format!(
                "guard_count_min ({}) exceeds guard_count_max ({})",
                self.guard_count_min, self.guard_count_max
            )));
        }
        if self.guard_count_max > GUARD_COUNT_MAX {
            return Err(ConfigError::Invalid(format!(
                "guard_count_max ({}) exceeds the squad limit of {GUARD_COUNT_MAX}",
                self.guard_count_max
            )));
        }
        if !self.guard_spread.is_finite() || self.guard_spread < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "guard_spread must be a finite non-negative distance, got {}",
                self.guard_spread
            )));
        }
        if !self.blip_scale.is_finite() || self.blip_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "blip_scale must be positive, got {}",
                self.blip_scale
            )));
        }
        if let Some(index) = self.target_spawns.iter().position(|p| !p.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "target_spawns[{index}] is not a finite position"
            )));
        }
        Ok(())
    }

    pub fn start_subtitle_duration(&self) -> Duration {
        Duration::from_secs(self.start_subtitle_secs)
    }
}
