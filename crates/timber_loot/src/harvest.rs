//! # Harvest Context
//!
//! What the resolver needs to know about one harvest: the acting player, the
//! block that was broken, and the modifiers in effect.

use std::fmt;

use timber_core::{BlockSignature, TreeBlockType};

/// The player (or other actor) harvesting a tree.
///
/// Implemented by the game adapter. Both predicates are asked at most once per
/// resolution.
pub trait Harvester {
    /// Name substituted for `%player%`.
    fn name(&self) -> &str;

    /// Whether this harvester holds the bonus-loot capability.
    fn has_bonus_loot(&self) -> bool;

    /// Whether a double-drops effect is active for this harvester.
    fn double_drops_active(&self) -> bool;
}

/// Integer block coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlockPosition {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl BlockPosition {
    /// Creates a position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for BlockPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One harvested block, or the base block of a felled tree.
#[derive(Clone, Debug, PartialEq)]
pub struct HarvestRequest {
    /// The block as it stood before breaking.
    pub block: BlockSignature,
    /// Whether the block is a log or a leaf.
    pub block_type: TreeBlockType,
    /// Where the block stood.
    pub position: BlockPosition,
    /// The tool carries silk touch.
    pub has_silk_touch: bool,
    /// Roll the once-per-tree pool instead of the per-block pool.
    pub entire_tree: bool,
}

impl HarvestRequest {
    /// A per-block harvest without silk touch.
    #[must_use]
    pub fn block(block: BlockSignature, block_type: TreeBlockType, position: BlockPosition) -> Self {
        Self {
            block,
            block_type,
            position,
            has_silk_touch: false,
            entire_tree: false,
        }
    }

    /// A once-per-tree harvest anchored at the broken base log.
    #[must_use]
    pub fn entire_tree(block: BlockSignature, position: BlockPosition) -> Self {
        Self {
            block,
            block_type: TreeBlockType::Log,
            position,
            has_silk_touch: false,
            entire_tree: true,
        }
    }

    /// Marks the tool as carrying silk touch.
    #[must_use]
    pub fn with_silk_touch(mut self, has_silk_touch: bool) -> Self {
        self.has_silk_touch = has_silk_touch;
        self
    }
}

/// A fixed harvester, for tests and server-side actors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticHarvester {
    /// Name substituted for `%player%`.
    pub name: String,
    /// Holds the bonus-loot capability.
    pub bonus_loot: bool,
    /// Double drops are active.
    pub double_drops: bool,
}

impl StaticHarvester {
    /// A harvester with neither modifier.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    /// Sets the bonus-loot capability.
    #[must_use]
    pub fn with_bonus_loot(mut self, bonus_loot: bool) -> Self {
        self.bonus_loot = bonus_loot;
        self
    }

    /// Sets the double-drops effect.
    #[must_use]
    pub fn with_double_drops(mut self, double_drops: bool) -> Self {
        self.double_drops = double_drops;
        self
    }
}

impl Harvester for StaticHarvester {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_bonus_loot(&self) -> bool {
        self.bonus_loot
    }

    fn double_drops_active(&self) -> bool {
        self.double_drops
    }
}
