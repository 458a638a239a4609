//! # Definition Catalog
//!
//! The complete set of tree definitions plus the global overlays that apply to
//! every one of them. A catalog is a plain value: it is built off to the side,
//! then published as a whole by [`crate::CatalogStore`].
//!
//! ## Overlay Rule
//!
//! ```text
//! effective(def, X) = def.X ∪ global.X
//! ```
//!
//! Overlays only ever add. Every call site that needs a union goes through
//! [`Catalog::effective_pool`], [`Catalog::effective_plantable_soil`] or
//! [`Catalog::effective_required_tools`].

use std::collections::HashSet;
use std::sync::Arc;

use crate::definition::TreeDefinition;
use crate::error::{ConfigError, ConfigResult};
use crate::loot::{LootEntry, LootPool};
use crate::settings::EngineSettings;
use crate::signature::{BlockSignature, ToolSignature};

/// Catalog-wide rules added to every definition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlobalOverlays {
    /// Soil every sapling may be replanted on.
    pub plantable_soil: Vec<BlockSignature>,
    /// Loot rolled for every broken log.
    pub log_loot: Vec<LootEntry>,
    /// Loot rolled for every broken leaf.
    pub leaf_loot: Vec<LootEntry>,
    /// Loot rolled once for every felled tree.
    pub entire_tree_loot: Vec<LootEntry>,
    /// Tools that may fell any tree.
    pub required_tools: Vec<ToolSignature>,
}

impl GlobalOverlays {
    /// The overlay pool for `pool`.
    #[inline]
    #[must_use]
    pub fn loot(&self, pool: LootPool) -> &[LootEntry] {
        match pool {
            LootPool::Log => &self.log_loot,
            LootPool::Leaf => &self.leaf_loot,
            LootPool::EntireTree => &self.entire_tree_loot,
        }
    }
}

/// Counts reported after a reload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CatalogStats {
    /// Number of tree definitions.
    pub definitions: usize,
    /// Number of global loot entries across the three overlay pools.
    pub global_loot_entries: usize,
    /// Number of global required tools.
    pub global_required_tools: usize,
    /// Number of global plantable soil signatures.
    pub global_plantable_soil: usize,
}

/// All tree definitions, the global overlays and the engine switches.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    definitions: Vec<Arc<TreeDefinition>>,
    overlays: GlobalOverlays,
    settings: EngineSettings,
}

impl Catalog {
    /// Assembles a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if two definitions share a key.
    pub fn new(
        definitions: Vec<TreeDefinition>,
        overlays: GlobalOverlays,
        settings: EngineSettings,
    ) -> ConfigResult<Self> {
        let mut seen = HashSet::with_capacity(definitions.len());
        for def in &definitions {
            if !seen.insert(def.key()) {
                return Err(ConfigError::invalid_value(
                    format!("trees.{}", def.key()),
                    "duplicate tree key",
                ));
            }
        }

        Ok(Self {
            definitions: definitions.into_iter().map(Arc::new).collect(),
            overlays,
            settings,
        })
    }

    /// A catalog with no definitions, no overlays and default switches.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the catalog has no definitions.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// All definitions.
    #[inline]
    #[must_use]
    pub fn definitions(&self) -> &[Arc<TreeDefinition>] {
        &self.definitions
    }

    /// Looks up a definition by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<TreeDefinition>> {
        self.definitions.iter().find(|def| def.key() == key)
    }

    /// The global overlays.
    #[inline]
    #[must_use]
    pub const fn overlays(&self) -> &GlobalOverlays {
        &self.overlays
    }

    /// Engine switches this catalog was built with.
    #[inline]
    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// A definition's pool followed by the matching global pool.
    pub fn effective_pool<'a>(
        &'a self,
        definition: &'a TreeDefinition,
        pool: LootPool,
    ) -> impl Iterator<Item = &'a LootEntry> + 'a {
        definition
            .loot(pool)
            .iter()
            .chain(self.overlays.loot(pool).iter())
    }

    /// A definition's plantable soil unioned with the global soil.
    #[must_use]
    pub fn effective_plantable_soil<'a>(
        &'a self,
        definition: &'a TreeDefinition,
    ) -> Vec<&'a BlockSignature> {
        union(definition.plantable_soil(), &self.overlays.plantable_soil)
    }

    /// A definition's required tools unioned with the global tools.
    #[must_use]
    pub fn effective_required_tools<'a>(
        &'a self,
        definition: &'a TreeDefinition,
    ) -> Vec<&'a ToolSignature> {
        union(definition.required_tools(), &self.overlays.required_tools)
    }

    /// Counts for logging.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            definitions: self.definitions.len(),
            global_loot_entries: self.overlays.log_loot.len()
                + self.overlays.leaf_loot.len()
                + self.overlays.entire_tree_loot.len(),
            global_required_tools: self.overlays.required_tools.len(),
            global_plantable_soil: self.overlays.plantable_soil.len(),
        }
    }
}

fn union<'a, T: PartialEq>(own: &'a [T], global: &'a [T]) -> Vec<&'a T> {
    let mut merged: Vec<&T> = own.iter().collect();
    for item in global {
        if !merged.contains(&item) {
            merged.push(item);
        }
    }
    merged
}
