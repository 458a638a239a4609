//! # Matching Engine
//!
//! Narrows a set of candidate definitions to the ones whose signatures for a
//! block category match an observed block. Used first to classify a freshly
//! broken block as a possible log, then again by the tree detector to confirm
//! that connected leaves belong to the same species.
//!
//! Cost is `O(definitions × signatures)` per call. Catalogs are small and
//! calls happen per broken block, not per tick.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::definition::TreeDefinition;
use crate::loot::TreeBlockType;
use crate::signature::BlockSignature;

/// Returns the candidates with at least one `block_type` signature matching
/// `observed`.
///
/// The result holds no duplicate keys; candidate order is kept otherwise.
#[must_use]
pub fn narrow<'a, I>(
    candidates: I,
    observed: &BlockSignature,
    block_type: TreeBlockType,
) -> Vec<Arc<TreeDefinition>>
where
    I: IntoIterator<Item = &'a Arc<TreeDefinition>>,
{
    let mut matched: Vec<Arc<TreeDefinition>> = Vec::new();
    for def in candidates {
        if matched.iter().any(|m| m.key() == def.key()) {
            continue;
        }
        if def
            .signatures(block_type)
            .iter()
            .any(|signature| signature.matches(observed))
        {
            matched.push(Arc::clone(def));
        }
    }
    matched
}

impl Catalog {
    /// Narrows every definition in the catalog.
    #[must_use]
    pub fn match_definitions(
        &self,
        observed: &BlockSignature,
        block_type: TreeBlockType,
    ) -> Vec<Arc<TreeDefinition>> {
        narrow(self.definitions(), observed, block_type)
    }

    /// Definitions that could own `observed` as a log.
    #[must_use]
    pub fn definitions_for_log(&self, observed: &BlockSignature) -> Vec<Arc<TreeDefinition>> {
        self.match_definitions(observed, TreeBlockType::Log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GlobalOverlays;
    use crate::settings::EngineSettings;

    fn species(key: &str, logs: &[&str], leaves: &[&str]) -> TreeDefinition {
        TreeDefinition::new(
            key,
            logs.iter().map(|l| BlockSignature::new(l)).collect(),
            leaves.iter().map(|l| BlockSignature::new(l)).collect(),
            BlockSignature::new("oak_sapling"),
        )
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                species("oak", &["oak_log", "oak_wood"], &["oak_leaves"]),
                species("dark_oak", &["dark_oak_log"], &["dark_oak_leaves", "oak_leaves"]),
                species("birch", &["birch_log"], &["birch_leaves"]),
            ],
            GlobalOverlays::default(),
            EngineSettings::default(),
        )
        .unwrap()
    }

    fn keys(defs: &[Arc<TreeDefinition>]) -> Vec<&str> {
        let mut keys: Vec<&str> = defs.iter().map(|d| d.key()).collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn test_log_classification() {
        let catalog = catalog();
        let observed = BlockSignature::new("oak_wood").with_property("axis", "y");
        assert_eq!(keys(&catalog.definitions_for_log(&observed)), vec!["oak"]);
    }

    #[test]
    fn test_leaf_shared_by_two_species() {
        let catalog = catalog();
        let matched = catalog.match_definitions(&BlockSignature::new("oak_leaves"), TreeBlockType::Leaf);
        assert_eq!(keys(&matched), vec!["dark_oak", "oak"]);
    }

    #[test]
    fn test_category_is_respected() {
        let catalog = catalog();
        let matched = catalog.match_definitions(&BlockSignature::new("oak_leaves"), TreeBlockType::Log);
        assert!(matched.is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = catalog();
        assert!(catalog.definitions_for_log(&BlockSignature::new("stone")).is_empty());
        assert!(Catalog::empty().definitions_for_log(&BlockSignature::new("oak_log")).is_empty());
    }

    #[test]
    fn test_narrowing_is_duplicate_free_and_order_independent() {
        let catalog = catalog();
        let defs = catalog.definitions();
        let doubled: Vec<&Arc<TreeDefinition>> = defs.iter().chain(defs.iter()).collect();
        let reversed: Vec<&Arc<TreeDefinition>> = defs.iter().rev().collect();

        let observed = BlockSignature::new("oak_leaves");
        let a = narrow(doubled, &observed, TreeBlockType::Leaf);
        let b = narrow(reversed, &observed, TreeBlockType::Leaf);
        assert_eq!(a.len(), 2);
        assert_eq!(keys(&a), keys(&b));
    }

    #[test]
    fn test_second_pass_narrows_shortlist() {
        let catalog = catalog();
        let shortlist = catalog.match_definitions(&BlockSignature::new("oak_leaves"), TreeBlockType::Leaf);
        let confirmed = narrow(&shortlist, &BlockSignature::new("dark_oak_log"), TreeBlockType::Log);
        assert_eq!(keys(&confirmed), vec!["dark_oak"]);
    }
}
