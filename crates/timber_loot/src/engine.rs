//! # Timber Engine
//!
//! The single point of contact for the game adapter.
//!
//! ## The Golden Path: Tree Felled
//!
//! ```text
//! block broken ──> definitions_for_log() ──> detector (external)
//!                                                 │
//!                          is_tool_valid() <──────┤
//!                                                 ▼
//!                  resolve_loot() per block + once with entire_tree
//!                                                 │
//!                                                 ▼
//!                            deliver() via LootRealizer (external)
//! ```
//!
//! ## Thread Safety
//!
//! `TimberEngine` is `Send + Sync` when its random source is `Send`. Every
//! call takes one catalog snapshot up front and uses it throughout, so a
//! concurrent reload is observed entirely or not at all. The random stream is
//! behind a mutex, so draws never interleave within one resolution.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use timber_core::{
    BlockSignature, Catalog, CatalogStore, ConfigResult, EngineSettings, SignatureParser,
    TextSignatureParser, TimberConfig, ToolSignature, TreeBlockType, TreeDefinition,
};

use crate::delivery::{deliver, DeliveryReport, DeliveryTarget, LootRealizer};
use crate::harvest::{HarvestRequest, Harvester};
use crate::random::{RandomSource, SeededRandom};
use crate::resolver::{LootOutcome, LootResolver};

/// Catalog store, signature parser and loot resolver behind one API.
pub struct TimberEngine<R> {
    store: CatalogStore,
    parser: Box<dyn SignatureParser>,
    resolver: Mutex<LootResolver<R>>,
}

impl TimberEngine<SeededRandom> {
    /// An engine with an OS-seeded stream and the default text parser.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(SeededRandom::from_entropy())
    }
}

impl<R: RandomSource> TimberEngine<R> {
    /// An engine drawing from `rng`, using the default text parser.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self::with_parser(rng, Box::new(TextSignatureParser))
    }

    /// An engine drawing from `rng`, using the adapter's `parser`.
    #[must_use]
    pub fn with_parser(rng: R, parser: Box<dyn SignatureParser>) -> Self {
        Self {
            store: CatalogStore::new(),
            parser,
            resolver: Mutex::new(LootResolver::new(rng)),
        }
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Rebuilds the catalog from `config` and publishes it.
    ///
    /// # Errors
    ///
    /// Returns the build error; the previous catalog stays live.
    pub fn reload(&self, config: &TimberConfig) -> ConfigResult<()> {
        self.store.reload(config, self.parser.as_ref())
    }

    /// Rebuilds the catalog from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns the parse or build error; the previous catalog stays live.
    pub fn reload_from_str(&self, source: &str) -> ConfigResult<()> {
        self.store.reload_from_str(source, self.parser.as_ref())
    }

    /// Rebuilds the catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns the I/O, parse or build error; the previous catalog stays live.
    pub fn reload_from_file(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        self.store.reload_from_file(path, self.parser.as_ref())
    }

    /// Clears the catalog. Later queries return empty results.
    pub fn disable(&self) {
        self.store.disable();
    }

    /// The live catalog.
    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        self.store.snapshot()
    }

    /// The live engine switches.
    #[must_use]
    pub fn settings(&self) -> EngineSettings {
        *self.store.snapshot().settings()
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Definitions with a `block_type` signature matching `observed`.
    #[must_use]
    pub fn match_definitions(
        &self,
        observed: &BlockSignature,
        block_type: TreeBlockType,
    ) -> Vec<Arc<TreeDefinition>> {
        self.store.snapshot().match_definitions(observed, block_type)
    }

    /// Definitions that could own `observed` as a log.
    #[must_use]
    pub fn definitions_for_log(&self, observed: &BlockSignature) -> Vec<Arc<TreeDefinition>> {
        self.store.snapshot().definitions_for_log(observed)
    }

    /// Whether `tool` may fell the tree `tree_key`, or any tree when `None`.
    ///
    /// An unknown key fails the gate unless required tools are ignored.
    #[must_use]
    pub fn is_tool_valid(&self, tree_key: Option<&str>, tool: &ToolSignature) -> bool {
        let catalog = self.store.snapshot();
        match tree_key {
            None => catalog.is_tool_valid(None, tool),
            Some(key) => match catalog.get(key) {
                Some(def) => catalog.is_tool_valid(Some(def.as_ref()), tool),
                None => catalog.settings().ignore_required_tools,
            },
        }
    }

    /// Whether `tool` may fell at least one configured tree.
    #[must_use]
    pub fn is_tool_valid_for_any(&self, tool: &ToolSignature) -> bool {
        self.store.snapshot().is_tool_valid_for_any(tool)
    }

    /// Plantable soil for `tree_key`, including the global soil.
    ///
    /// Empty for an unknown key.
    #[must_use]
    pub fn effective_plantable_soil(&self, tree_key: &str) -> Vec<BlockSignature> {
        let catalog = self.store.snapshot();
        catalog
            .get(tree_key)
            .map(|def| {
                catalog
                    .effective_plantable_soil(def)
                    .into_iter()
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Loot
    // ------------------------------------------------------------------------

    /// Resolves one harvest of the tree `tree_key`.
    ///
    /// Returns an empty outcome for an unknown key.
    pub fn resolve_loot(
        &self,
        tree_key: &str,
        request: &HarvestRequest,
        harvester: &dyn Harvester,
    ) -> LootOutcome {
        let catalog = self.store.snapshot();
        self.resolve_in(&catalog, tree_key, request, harvester)
    }

    /// Resolves one harvest and realizes it through `realizer`.
    ///
    /// Resolution and delivery use the same catalog snapshot.
    pub fn harvest(
        &self,
        tree_key: &str,
        request: &HarvestRequest,
        harvester: &dyn Harvester,
        same_world: bool,
        realizer: &mut dyn LootRealizer,
    ) -> DeliveryReport {
        let catalog = self.store.snapshot();
        let outcome = self.resolve_in(&catalog, tree_key, request, harvester);
        let target = DeliveryTarget {
            position: request.position,
            same_world,
        };
        deliver(&outcome, catalog.settings(), target, realizer)
    }

    fn resolve_in(
        &self,
        catalog: &Catalog,
        tree_key: &str,
        request: &HarvestRequest,
        harvester: &dyn Harvester,
    ) -> LootOutcome {
        let Some(def) = catalog.get(tree_key) else {
            tracing::debug!(tree = tree_key, "no such tree definition, nothing to resolve");
            return LootOutcome::default();
        };
        self.resolver.lock().resolve(catalog, def, request, harvester)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harvest::{BlockPosition, StaticHarvester};
    use crate::random::FixedRandom;

    const OAK: &str = r#"
        [trees.oak]
        logs = ["oak_log"]
        leaves = ["oak_leaves"]
        sapling = "oak_sapling"
        max-log-distance-from-trunk = 6
        max-leaf-distance-from-log = 6
        drop-original-log = true
        required-tools = ["wooden_axe"]
    "#;

    #[test]
    fn test_disable_empties_everything() {
        let engine = TimberEngine::new(FixedRandom::new(0.0));
        engine.reload_from_str(OAK).unwrap();
        assert_eq!(engine.definitions_for_log(&BlockSignature::new("oak_log")).len(), 1);

        engine.disable();
        assert!(engine.definitions_for_log(&BlockSignature::new("oak_log")).is_empty());
        assert!(!engine.is_tool_valid(Some("oak"), &ToolSignature::new("wooden_axe")));
        assert!(engine.effective_plantable_soil("oak").is_empty());

        let request = HarvestRequest::block(
            BlockSignature::new("oak_log"),
            TreeBlockType::Log,
            BlockPosition::default(),
        );
        assert!(engine
            .resolve_loot("oak", &request, &StaticHarvester::named("Alex"))
            .is_empty());
    }

    #[test]
    fn test_unknown_tree_key() {
        let engine = TimberEngine::new(FixedRandom::new(0.0));
        engine.reload_from_str(OAK).unwrap();
        assert!(!engine.is_tool_valid(Some("maple"), &ToolSignature::new("wooden_axe")));
        assert!(engine.is_tool_valid(Some("oak"), &ToolSignature::new("wooden_axe")));
    }
}
