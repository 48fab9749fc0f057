use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, LoadConfiguration};

pub const MAX_AMOUNT_RANGE: std::ops::RangeInclusive<i32> = 1..=1000;
pub const CHANCE_PERCENT_RANGE: std::ops::RangeInclusive<i32> = 0..=100;

/// Startup values of the random drops plugin. Runtime changes made through
/// commands are never written back.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct DropsConfig {
    /// Whether drops are randomized as soon as the server starts.
    pub enabled_on_start: bool,
    /// Chance in percent that a new assignment is a creature instead of an item.
    pub mob_chance_percent: i32,
    /// Upper bound of the amount rolled for each assignment.
    pub max_amount: i32,
    /// Turn randomization off whenever a player joins.
    pub disable_on_join: bool,
    /// Fixed seed for the assignment rolls. Unset means a fresh seed each start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for DropsConfig {
    fn default() -> Self {
        Self {
            enabled_on_start: false,
            mob_chance_percent: 30,
            max_amount: 10,
            disable_on_join: true,
            seed: None,
        }
    }
}

impl LoadConfiguration for DropsConfig {
    fn get_path() -> &'static Path {
        Path::new("randomdrops.toml")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !CHANCE_PERCENT_RANGE.contains(&self.mob_chance_percent) {
            return Err(ConfigError::Invalid {
                file: "randomdrops.toml",
                message: format!(
                    "mob_chance_percent must be between 0 and 100, got {}",
                    self.mob_chance_percent
                ),
            });
        }
        if !MAX_AMOUNT_RANGE.contains(&self.max_amount) {
            return Err(ConfigError::Invalid {
                file: "randomdrops.toml",
                message: format!(
                    "max_amount must be between 1 and 1000, got {}",
                    self.max_amount
                ),
            });
        }
        Ok(())
    }
}
