//! Engine-wide switches.
//!
//! Read from the `[settings]` table on every reload and carried inside the
//! catalog, so switches and definitions are always published together.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Engine switches consumed by the tool gate, resolver and delivery.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EngineSettings {
    /// Any tool may fell any tree.
    pub ignore_required_tools: bool,
    /// Loot goes into the player's inventory instead of onto the ground.
    pub add_items_to_inventory: bool,
    /// Silk touch drops the broken block instead of rolling loot.
    pub apply_silk_touch: bool,
    /// Chance multiplier for players holding the bonus-loot capability.
    pub bonus_loot_multiplier: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            ignore_required_tools: false,
            add_items_to_inventory: false,
            apply_silk_touch: true,
            bonus_loot_multiplier: 2.0,
        }
    }
}

impl EngineSettings {
    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the bonus multiplier is below 1
    /// or not finite. A multiplier below 1 would make the bonus a penalty.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.bonus_loot_multiplier.is_finite() || self.bonus_loot_multiplier < 1.0 {
            return Err(ConfigError::invalid_value(
                "settings.bonus-loot-multiplier",
                format!("must be a finite value >= 1, got {}", self.bonus_loot_multiplier),
            ));
        }
        Ok(())
    }
}
