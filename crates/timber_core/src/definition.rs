//! # Tree Definitions
//!
//! A configured tree species: which blocks make it up, how far the detector may
//! search, what it drops, and which tools may fell it.
//!
//! Definitions are assembled once while a catalog is built and are read-only
//! afterwards. The `with_*` methods consume the value, so nothing can change a
//! definition after it has been published in a catalog.

use crate::loot::{LootEntry, LootPool, TreeBlockType};
use crate::signature::{BlockSignature, ToolSignature};

/// A configured tree species.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeDefinition {
    key: String,
    logs: Vec<BlockSignature>,
    leaves: Vec<BlockSignature>,
    sapling: BlockSignature,
    plantable_soil: Vec<BlockSignature>,
    max_log_distance_from_trunk: f64,
    max_leaf_distance_from_log: u32,
    detect_leaves_diagonally: bool,
    drop_original_log: bool,
    drop_original_leaf: bool,
    log_loot: Vec<LootEntry>,
    leaf_loot: Vec<LootEntry>,
    entire_tree_loot: Vec<LootEntry>,
    required_tools: Vec<ToolSignature>,
}

impl TreeDefinition {
    /// Creates a definition with no loot, no tools and zero search distances.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        logs: Vec<BlockSignature>,
        leaves: Vec<BlockSignature>,
        sapling: BlockSignature,
    ) -> Self {
        Self {
            key: key.into(),
            logs: dedup(logs),
            leaves: dedup(leaves),
            sapling,
            plantable_soil: Vec::new(),
            max_log_distance_from_trunk: 0.0,
            max_leaf_distance_from_log: 0,
            detect_leaves_diagonally: false,
            drop_original_log: false,
            drop_original_leaf: false,
            log_loot: Vec::new(),
            leaf_loot: Vec::new(),
            entire_tree_loot: Vec::new(),
            required_tools: Vec::new(),
        }
    }

    /// Sets the soil a sapling of this species may be replanted on.
    #[must_use]
    pub fn with_plantable_soil(mut self, soil: Vec<BlockSignature>) -> Self {
        self.plantable_soil = dedup(soil);
        self
    }

    /// Sets the detector's search limits.
    #[must_use]
    pub fn with_geometry(
        mut self,
        max_log_distance_from_trunk: f64,
        max_leaf_distance_from_log: u32,
        detect_leaves_diagonally: bool,
    ) -> Self {
        self.max_log_distance_from_trunk = max_log_distance_from_trunk;
        self.max_leaf_distance_from_log = max_leaf_distance_from_log;
        self.detect_leaves_diagonally = detect_leaves_diagonally;
        self
    }

    /// Sets whether broken logs and leaves drop themselves.
    #[must_use]
    pub fn with_original_drops(mut self, log: bool, leaf: bool) -> Self {
        self.drop_original_log = log;
        self.drop_original_leaf = leaf;
        self
    }

    /// Sets one of the three loot collections.
    #[must_use]
    pub fn with_loot(mut self, pool: LootPool, entries: Vec<LootEntry>) -> Self {
        match pool {
            LootPool::Log => self.log_loot = entries,
            LootPool::Leaf => self.leaf_loot = entries,
            LootPool::EntireTree => self.entire_tree_loot = entries,
        }
        self
    }

    /// Sets the tools allowed to fell this species.
    #[must_use]
    pub fn with_required_tools(mut self, tools: Vec<ToolSignature>) -> Self {
        self.required_tools = dedup(tools);
        self
    }

    /// Unique key of this species.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Log signatures.
    #[inline]
    #[must_use]
    pub fn logs(&self) -> &[BlockSignature] {
        &self.logs
    }

    /// Leaf signatures.
    #[inline]
    #[must_use]
    pub fn leaves(&self) -> &[BlockSignature] {
        &self.leaves
    }

    /// Signatures for a block category.
    #[inline]
    #[must_use]
    pub fn signatures(&self, block_type: TreeBlockType) -> &[BlockSignature] {
        match block_type {
            TreeBlockType::Log => &self.logs,
            TreeBlockType::Leaf => &self.leaves,
        }
    }

    /// Sapling placed when replanting.
    #[inline]
    #[must_use]
    pub const fn sapling(&self) -> &BlockSignature {
        &self.sapling
    }

    /// Species-specific plantable soil, without the global overlay.
    #[inline]
    #[must_use]
    pub fn plantable_soil(&self) -> &[BlockSignature] {
        &self.plantable_soil
    }

    /// How far a log may be from the trunk and still count as part of the tree.
    #[inline]
    #[must_use]
    pub const fn max_log_distance_from_trunk(&self) -> f64 {
        self.max_log_distance_from_trunk
    }

    /// How far a leaf may be from the nearest log.
    #[inline]
    #[must_use]
    pub const fn max_leaf_distance_from_log(&self) -> u32 {
        self.max_leaf_distance_from_log
    }

    /// Whether the leaf search includes diagonal neighbours.
    #[inline]
    #[must_use]
    pub const fn detect_leaves_diagonally(&self) -> bool {
        self.detect_leaves_diagonally
    }

    /// Whether the broken block itself drops for this category.
    #[inline]
    #[must_use]
    pub const fn drops_original(&self, block_type: TreeBlockType) -> bool {
        match block_type {
            TreeBlockType::Log => self.drop_original_log,
            TreeBlockType::Leaf => self.drop_original_leaf,
        }
    }

    /// Species-specific loot, without the global overlay.
    #[inline]
    #[must_use]
    pub fn loot(&self, pool: LootPool) -> &[LootEntry] {
        match pool {
            LootPool::Log => &self.log_loot,
            LootPool::Leaf => &self.leaf_loot,
            LootPool::EntireTree => &self.entire_tree_loot,
        }
    }

    /// Species-specific required tools, without the global overlay.
    #[inline]
    #[must_use]
    pub fn required_tools(&self) -> &[ToolSignature] {
        &self.required_tools
    }
}

fn dedup<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}
