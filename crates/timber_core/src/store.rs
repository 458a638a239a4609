//! # Catalog Store
//!
//! Owns the live catalog and replaces it wholesale.
//!
//! ## Publication
//!
//! ```text
//! reload():  parse ──> validate ──> build Catalog ──> swap Arc  (success)
//!                 └──────────────┴────────────────> keep old    (any error)
//!
//! reader:    snapshot() ──> Arc<Catalog>   (old or new, never a mixture)
//! ```
//!
//! The write lock is held only for the pointer swap. Readers clone the `Arc`
//! and keep using their snapshot even if a reload lands mid-call.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::catalog::Catalog;
use crate::config::{build_catalog, TimberConfig};
use crate::error::{ConfigError, ConfigResult};
use crate::signature::SignatureParser;

/// Holds the currently published catalog.
#[derive(Debug, Default)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    /// Creates a store holding an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `catalog`.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The live catalog.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().clone()
    }

    /// Publishes a fully built catalog.
    pub fn publish(&self, catalog: Catalog) {
        let stats = catalog.stats();
        *self.current.write() = Arc::new(catalog);
        tracing::info!(
            definitions = stats.definitions,
            global_loot = stats.global_loot_entries,
            global_tools = stats.global_required_tools,
            global_soil = stats.global_plantable_soil,
            "tree catalog published"
        );
    }

    /// Rebuilds the catalog from a parsed document and publishes it.
    ///
    /// # Errors
    ///
    /// Returns the build error; the previous catalog stays live.
    pub fn reload(&self, config: &TimberConfig, parser: &dyn SignatureParser) -> ConfigResult<()> {
        match build_catalog(config, parser) {
            Ok(catalog) => {
                self.publish(catalog);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "tree catalog rejected, keeping previous catalog");
                Err(err)
            }
        }
    }

    /// Parses a TOML document, then behaves like [`CatalogStore::reload`].
    ///
    /// # Errors
    ///
    /// Returns the parse or build error; the previous catalog stays live.
    pub fn reload_from_str(&self, source: &str, parser: &dyn SignatureParser) -> ConfigResult<()> {
        let config = TimberConfig::from_toml_str(source).map_err(unreadable)?;
        self.reload(&config, parser)
    }

    /// Reads a TOML file, then behaves like [`CatalogStore::reload`].
    ///
    /// # Errors
    ///
    /// Returns the I/O, parse or build error; the previous catalog stays live.
    pub fn reload_from_file(
        &self,
        path: impl AsRef<Path>,
        parser: &dyn SignatureParser,
    ) -> ConfigResult<()> {
        let config = TimberConfig::from_file(path).map_err(unreadable)?;
        self.reload(&config, parser)
    }

    /// Replaces the live catalog with an empty one.
    pub fn disable(&self) {
        *self.current.write() = Arc::new(Catalog::empty());
        tracing::info!("tree catalog cleared");
    }
}

fn unreadable(err: ConfigError) -> ConfigError {
    tracing::warn!(error = %err, "tree configuration unreadable, keeping previous catalog");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::TextSignatureParser;

    const GOOD: &str = r#"
        [trees.oak]
        logs = ["oak_log"]
        leaves = ["oak_leaves"]
        sapling = "oak_sapling"
        max-log-distance-from-trunk = 6
        max-leaf-distance-from-log = 6
    "#;

    #[test]
    fn test_reload_publishes() {
        let store = CatalogStore::new();
        assert!(store.snapshot().is_empty());
        store.reload_from_str(GOOD, &TextSignatureParser).unwrap();
        assert!(store.snapshot().get("oak").is_some());
    }

    #[test]
    fn test_failed_reload_keeps_previous() {
        let store = CatalogStore::new();
        store.reload_from_str(GOOD, &TextSignatureParser).unwrap();

        let broken = GOOD.replace("sapling = \"oak_sapling\"", "");
        let err = store.reload_from_str(&broken, &TextSignatureParser).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { .. }));
        assert!(store.snapshot().get("oak").is_some());

        assert!(store.reload_from_str("[[", &TextSignatureParser).is_err());
        assert!(store.snapshot().get("oak").is_some());
    }

    #[test]
    fn test_snapshot_survives_reload() {
        let store = CatalogStore::new();
        store.reload_from_str(GOOD, &TextSignatureParser).unwrap();
        let before = store.snapshot();

        store.disable();
        assert!(store.snapshot().is_empty());
        assert!(before.get("oak").is_some());
    }
}
