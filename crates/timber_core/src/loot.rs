//! # Loot Entries
//!
//! One weighted grant per entry: an item, a console command, or both, each
//! with a percentage chance. Entries are validated when built so that
//! "always drops" (100) and "never drops" (0) hold exactly.

use std::fmt;

use crate::error::{ConfigError, ConfigResult};
use crate::signature::ItemGrant;

/// Which part of a tree a block belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TreeBlockType {
    /// Trunk and branch blocks.
    Log,
    /// Foliage blocks.
    Leaf,
}

impl fmt::Display for TreeBlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Log => f.write_str("log"),
            Self::Leaf => f.write_str("leaf"),
        }
    }
}

/// Selects one of the three loot collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LootPool {
    /// Rolled per broken log.
    Log,
    /// Rolled per broken leaf.
    Leaf,
    /// Rolled once per felled tree.
    EntireTree,
}

impl From<TreeBlockType> for LootPool {
    fn from(block_type: TreeBlockType) -> Self {
        match block_type {
            TreeBlockType::Log => Self::Log,
            TreeBlockType::Leaf => Self::Leaf,
        }
    }
}

/// Lowest accepted chance.
pub const MIN_CHANCE: f64 = 0.0;
/// Highest accepted chance.
pub const MAX_CHANCE: f64 = 100.0;

/// A single entry in a loot pool.
#[derive(Clone, Debug, PartialEq)]
pub struct LootEntry {
    key: String,
    category: TreeBlockType,
    item: Option<ItemGrant>,
    command: Option<String>,
    chance: f64,
}

impl LootEntry {
    /// Creates an entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ChanceOutOfRange`] if `chance` is not within
    /// `[0, 100]` (NaN included).
    pub fn new(
        key: impl Into<String>,
        category: TreeBlockType,
        item: Option<ItemGrant>,
        command: Option<String>,
        chance: f64,
    ) -> ConfigResult<Self> {
        let key = key.into();
        if !(MIN_CHANCE..=MAX_CHANCE).contains(&chance) {
            return Err(ConfigError::ChanceOutOfRange { path: key, chance });
        }
        Ok(Self {
            key,
            category,
            item,
            command,
            chance,
        })
    }

    /// Entry key from the configuration.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Block category this entry was declared for.
    #[inline]
    #[must_use]
    pub const fn category(&self) -> TreeBlockType {
        self.category
    }

    /// Item granted on success.
    #[inline]
    #[must_use]
    pub const fn item(&self) -> Option<&ItemGrant> {
        self.item.as_ref()
    }

    /// Command template queued on success.
    #[inline]
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// Base chance in percent.
    #[inline]
    #[must_use]
    pub const fn chance(&self) -> f64 {
        self.chance
    }

    /// Whether a successful roll grants nothing.
    #[inline]
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.item.is_none() && self.command.is_none()
    }

    /// Chance in percent after the bonus multiplier, if one applies.
    #[inline]
    #[must_use]
    pub fn effective_chance(&self, bonus_multiplier: Option<f64>) -> f64 {
        match bonus_multiplier {
            Some(multiplier) => self.chance * multiplier,
            None => self.chance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chance_bounds_inclusive() {
        assert!(LootEntry::new("a", TreeBlockType::Log, None, None, 0.0).is_ok());
        assert!(LootEntry::new("b", TreeBlockType::Log, None, None, 100.0).is_ok());
    }

    #[test]
    fn test_chance_out_of_range_rejected() {
        for chance in [-0.1, 100.5, f64::NAN, f64::INFINITY] {
            let err = LootEntry::new("bad", TreeBlockType::Leaf, None, None, chance).unwrap_err();
            assert!(matches!(err, ConfigError::ChanceOutOfRange { .. }), "{chance}");
        }
    }

    #[test]
    fn test_effective_chance() {
        let entry = LootEntry::new("apple", TreeBlockType::Leaf, None, None, 10.0).unwrap();
        assert!((entry.effective_chance(None) - 10.0).abs() < f64::EPSILON);
        assert!((entry.effective_chance(Some(2.0)) - 20.0).abs() < f64::EPSILON);
        assert!(entry.effective_chance(Some(1.5)) > entry.effective_chance(None));
    }

    #[test]
    fn test_noop_entry() {
        let noop = LootEntry::new("nothing", TreeBlockType::Log, None, None, 50.0).unwrap();
        assert!(noop.is_noop());
        let cmd = LootEntry::new("cmd", TreeBlockType::Log, None, Some("say hi".into()), 50.0).unwrap();
        assert!(!cmd.is_noop());
    }
}
