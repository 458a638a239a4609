//! # Configuration Schema
//!
//! TOML layout consumed on every reload:
//!
//! ```toml
//! global-plantable-soil = ["dirt", "grass_block"]
//! global-required-tools = ["wooden_axe", "stone_axe"]
//!
//! [settings]
//! ignore-required-tools = false
//! bonus-loot-multiplier = 2.0
//!
//! [global-log-loot.coin]
//! material = "gold_nugget"
//! chance = 10
//!
//! [trees.oak]
//! logs = ["oak_log", "stripped_oak_log"]
//! leaves = ["oak_leaves"]
//! sapling = "oak_sapling"
//! max-log-distance-from-trunk = 6
//! max-leaf-distance-from-log = 6
//! drop-original-log = true
//!
//! [trees.oak.leaf-loot.apple]
//! material = "apple"
//! chance = 0.5
//! ```
//!
//! Deserialization checks shape and rejects unknown keys, so a misspelled
//! flag never silently falls back to its default. [`build_catalog`] checks required keys,
//! signature strings, chances and geometry, and reports the dotted path of the
//! first offending value.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{Catalog, GlobalOverlays};
use crate::definition::TreeDefinition;
use crate::error::{ConfigError, ConfigResult};
use crate::loot::{LootEntry, LootPool, TreeBlockType};
use crate::settings::EngineSettings;
use crate::signature::{BlockSignature, SignatureParser, ToolSignature};

/// The whole configuration document.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TimberConfig {
    /// Engine switches.
    #[serde(default)]
    pub settings: EngineSettings,
    /// Soil every sapling may be replanted on.
    #[serde(default)]
    pub global_plantable_soil: Vec<String>,
    /// Tools that may fell any tree.
    #[serde(default)]
    pub global_required_tools: Vec<String>,
    /// Loot rolled for every broken log.
    #[serde(default)]
    pub global_log_loot: BTreeMap<String, LootSection>,
    /// Loot rolled for every broken leaf.
    #[serde(default)]
    pub global_leaf_loot: BTreeMap<String, LootSection>,
    /// Loot rolled once for every felled tree.
    #[serde(default)]
    pub global_entire_tree_loot: BTreeMap<String, LootSection>,
    /// Tree species by key.
    pub trees: Option<BTreeMap<String, TreeSection>>,
}

/// One `[trees.<key>]` table.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TreeSection {
    /// Log block signatures.
    pub logs: Option<Vec<String>>,
    /// Leaf block signatures.
    pub leaves: Option<Vec<String>>,
    /// Sapling block signature.
    pub sapling: Option<String>,
    /// Species-specific plantable soil.
    #[serde(default)]
    pub plantable_soil: Vec<String>,
    /// Detector limit for logs.
    pub max_log_distance_from_trunk: Option<f64>,
    /// Detector limit for leaves.
    pub max_leaf_distance_from_log: Option<i64>,
    /// Detector leaf search includes diagonals.
    #[serde(default)]
    pub search_for_leaves_diagonally: bool,
    /// Broken logs drop themselves.
    #[serde(default)]
    pub drop_original_log: bool,
    /// Broken leaves drop themselves.
    #[serde(default)]
    pub drop_original_leaf: bool,
    /// Per-log loot.
    #[serde(default)]
    pub log_loot: BTreeMap<String, LootSection>,
    /// Per-leaf loot.
    #[serde(default)]
    pub leaf_loot: BTreeMap<String, LootSection>,
    /// Per-tree loot.
    #[serde(default)]
    pub entire_tree_loot: BTreeMap<String, LootSection>,
    /// Tools allowed to fell this species.
    #[serde(default)]
    pub required_tools: Vec<String>,
}

/// One loot entry table.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LootSection {
    /// Item string, parsed by the signature parser.
    pub material: Option<String>,
    /// Console command template.
    pub command: Option<String>,
    /// Chance in percent.
    pub chance: Option<f64>,
}

impl TimberConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on syntax or shape errors.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is malformed.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }
}

/// Builds a catalog from a parsed document.
///
/// Nothing is published here; the caller decides whether to swap the result in.
///
/// # Errors
///
/// Returns the first validation failure found, walking trees in key order and
/// then the global overlays.
pub fn build_catalog(config: &TimberConfig, parser: &dyn SignatureParser) -> ConfigResult<Catalog> {
    config.settings.validate()?;

    let trees = config.trees.as_ref().ok_or_else(|| ConfigError::missing("trees"))?;
    let mut definitions = Vec::with_capacity(trees.len());
    for (key, section) in trees {
        let def = build_definition(key, section, parser)?;
        tracing::debug!(
            tree = key.as_str(),
            logs = def.logs().len(),
            leaves = def.leaves().len(),
            "tree definition built"
        );
        definitions.push(def);
    }

    let overlays = GlobalOverlays {
        plantable_soil: parse_blocks("global-plantable-soil", &config.global_plantable_soil, parser)?,
        log_loot: build_loot("global-log-loot", TreeBlockType::Log, &config.global_log_loot, parser)?,
        leaf_loot: build_loot("global-leaf-loot", TreeBlockType::Leaf, &config.global_leaf_loot, parser)?,
        entire_tree_loot: build_loot(
            "global-entire-tree-loot",
            TreeBlockType::Log,
            &config.global_entire_tree_loot,
            parser,
        )?,
        required_tools: parse_tools("global-required-tools", &config.global_required_tools, parser)?,
    };

    Catalog::new(definitions, overlays, config.settings)
}

fn build_definition(
    key: &str,
    section: &TreeSection,
    parser: &dyn SignatureParser,
) -> ConfigResult<TreeDefinition> {
    let base = format!("trees.{key}");
    let path = |field: &str| format!("{base}.{field}");

    let logs = section.logs.as_ref().ok_or_else(|| ConfigError::missing(path("logs")))?;
    let leaves = section.leaves.as_ref().ok_or_else(|| ConfigError::missing(path("leaves")))?;
    let sapling = section.sapling.as_ref().ok_or_else(|| ConfigError::missing(path("sapling")))?;

    let max_log_distance = section
        .max_log_distance_from_trunk
        .ok_or_else(|| ConfigError::missing(path("max-log-distance-from-trunk")))?;
    if !max_log_distance.is_finite() || max_log_distance < 0.0 {
        return Err(ConfigError::invalid_value(
            path("max-log-distance-from-trunk"),
            format!("must be a finite value >= 0, got {max_log_distance}"),
        ));
    }

    let max_leaf_distance = section
        .max_leaf_distance_from_log
        .ok_or_else(|| ConfigError::missing(path("max-leaf-distance-from-log")))?;
    let max_leaf_distance = u32::try_from(max_leaf_distance).map_err(|_| {
        ConfigError::invalid_value(
            path("max-leaf-distance-from-log"),
            format!("must be an integer in 0..={}, got {max_leaf_distance}", u32::MAX),
        )
    })?;

    let sapling = parser
        .parse_block(sapling)
        .ok_or_else(|| ConfigError::invalid_signature(path("sapling"), sapling.as_str()))?;

    let def = TreeDefinition::new(
        key,
        parse_blocks(&path("logs"), logs, parser)?,
        parse_blocks(&path("leaves"), leaves, parser)?,
        sapling,
    )
    .with_plantable_soil(parse_blocks(&path("plantable-soil"), &section.plantable_soil, parser)?)
    .with_geometry(max_log_distance, max_leaf_distance, section.search_for_leaves_diagonally)
    .with_original_drops(section.drop_original_log, section.drop_original_leaf)
    .with_loot(
        LootPool::Log,
        build_loot(&path("log-loot"), TreeBlockType::Log, &section.log_loot, parser)?,
    )
    .with_loot(
        LootPool::Leaf,
        build_loot(&path("leaf-loot"), TreeBlockType::Leaf, &section.leaf_loot, parser)?,
    )
    .with_loot(
        LootPool::EntireTree,
        build_loot(&path("entire-tree-loot"), TreeBlockType::Log, &section.entire_tree_loot, parser)?,
    )
    .with_required_tools(parse_tools(&path("required-tools"), &section.required_tools, parser)?);

    Ok(def)
}

fn parse_blocks(
    path: &str,
    raw: &[String],
    parser: &dyn SignatureParser,
) -> ConfigResult<Vec<BlockSignature>> {
    raw.iter()
        .enumerate()
        .map(|(i, value)| {
            parser
                .parse_block(value)
                .ok_or_else(|| ConfigError::invalid_signature(format!("{path}[{i}]"), value.as_str()))
        })
        .collect()
}

fn parse_tools(
    path: &str,
    raw: &[String],
    parser: &dyn SignatureParser,
) -> ConfigResult<Vec<ToolSignature>> {
    raw.iter()
        .enumerate()
        .map(|(i, value)| {
            parser
                .parse_tool(value)
                .ok_or_else(|| ConfigError::invalid_signature(format!("{path}[{i}]"), value.as_str()))
        })
        .collect()
}

fn build_loot(
    path: &str,
    category: TreeBlockType,
    sections: &BTreeMap<String, LootSection>,
    parser: &dyn SignatureParser,
) -> ConfigResult<Vec<LootEntry>> {
    let mut entries = Vec::with_capacity(sections.len());
    for (key, section) in sections {
        let entry_path = format!("{path}.{key}");

        let chance = section
            .chance
            .ok_or_else(|| ConfigError::missing(format!("{entry_path}.chance")))?;

        let item = match &section.material {
            Some(material) => Some(parser.parse_item(material).ok_or_else(|| {
                ConfigError::invalid_signature(format!("{entry_path}.material"), material.as_str())
            })?),
            None => None,
        };

        let entry = LootEntry::new(key.as_str(), category, item, section.command.clone(), chance)
            .map_err(|_| ConfigError::ChanceOutOfRange {
                path: format!("{entry_path}.chance"),
                chance,
            })?;
        entries.push(entry);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::TextSignatureParser;

    const OAK: &str = r#"
        global-plantable-soil = ["podzol"]
        global-required-tools = ["golden_axe"]

        [settings]
        ignore-required-tools = true
        bonus-loot-multiplier = 3

        [global-log-loot.coin]
        material = "gold_nugget"
        chance = 10

        [global-entire-tree-loot.bonus]
        command = "say %player% felled a %type%"
        chance = 100

        [trees.oak]
        logs = ["oak_log", "oak_wood"]
        leaves = ["oak_leaves"]
        sapling = "oak_sapling"
        plantable-soil = ["dirt", "grass_block"]
        max-log-distance-from-trunk = 6
        max-leaf-distance-from-log = 6
        search-for-leaves-diagonally = true
        drop-original-log = true
        required-tools = ["wooden_axe"]

        [trees.oak.log-loot.stick]
        material = "stick 2"
        chance = 50

        [trees.oak.leaf-loot.apple]
        material = "apple"
        chance = 0.5
    "#;

    fn build(source: &str) -> ConfigResult<Catalog> {
        build_catalog(&TimberConfig::from_toml_str(source)?, &TextSignatureParser)
    }

    #[test]
    fn test_full_document() {
        let catalog = build(OAK).unwrap();
        assert!(catalog.settings().ignore_required_tools);
        assert!((catalog.settings().bonus_loot_multiplier - 3.0).abs() < f64::EPSILON);

        let oak = catalog.get("oak").unwrap();
        assert_eq!(oak.logs().len(), 2);
        assert_eq!(oak.sapling().material(), "minecraft:oak_sapling");
        assert!(oak.detect_leaves_diagonally());
        assert!(oak.drops_original(TreeBlockType::Log));
        assert!(!oak.drops_original(TreeBlockType::Leaf));
        assert_eq!(oak.max_leaf_distance_from_log(), 6);
        assert_eq!(oak.loot(LootPool::Log)[0].item().unwrap().amount(), 2);
        assert_eq!(oak.required_tools(), &[ToolSignature::new("wooden_axe")]);

        let overlays = catalog.overlays();
        assert_eq!(overlays.log_loot.len(), 1);
        assert!(overlays.leaf_loot.is_empty());
        assert_eq!(overlays.entire_tree_loot[0].command(), Some("say %player% felled a %type%"));
        assert_eq!(overlays.required_tools, vec![ToolSignature::new("golden_axe")]);
    }

    #[test]
    fn test_missing_trees_table() {
        assert_eq!(build("").unwrap_err(), ConfigError::missing("trees"));
    }

    #[test]
    fn test_missing_sapling() {
        let err = build(
            r#"
            [trees.oak]
            logs = ["oak_log"]
            leaves = ["oak_leaves"]
            max-log-distance-from-trunk = 6
            max-leaf-distance-from-log = 6
            "#,
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::missing("trees.oak.sapling"));
    }

    #[test]
    fn test_missing_chance() {
        let source = OAK.replace("chance = 0.5", "");
        assert_eq!(
            build(&source).unwrap_err(),
            ConfigError::missing("trees.oak.leaf-loot.apple.chance")
        );
    }

    #[test]
    fn test_chance_out_of_range() {
        let source = OAK.replace("chance = 50", "chance = 150");
        assert_eq!(
            build(&source).unwrap_err(),
            ConfigError::ChanceOutOfRange {
                path: "trees.oak.log-loot.stick.chance".into(),
                chance: 150.0,
            }
        );
    }

    #[test]
    fn test_invalid_log_signature() {
        let source = OAK.replace(r#"["oak_log", "oak_wood"]"#, r#"["oak_log", "oak wood"]"#);
        assert_eq!(
            build(&source).unwrap_err(),
            ConfigError::invalid_signature("trees.oak.logs[1]", "oak wood")
        );
    }

    #[test]
    fn test_negative_leaf_distance() {
        let source = OAK.replace("max-leaf-distance-from-log = 6", "max-leaf-distance-from-log = -1");
        assert!(matches!(build(&source), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(build("[trees.oak"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_setting_rejected() {
        let source = "[settings]\nignore-required-tool = true\n[trees]\n";
        assert!(matches!(build(source), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_misspelled_tree_key_rejected() {
        let source = OAK.replace("drop-original-log = true", "drop-original-logs = true");
        match build(&source) {
            Err(ConfigError::Parse(message)) => assert!(message.contains("drop-original-logs"), "{message}"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_misspelled_loot_key_rejected() {
        let source = format!("{OAK}\n[trees.oak.log-loot.gem]\nmateral = \"diamond\"\nchance = 5\n");
        match build(&source) {
            Err(ConfigError::Parse(message)) => assert!(message.contains("materal"), "{message}"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let source = OAK.replace("global-required-tools", "global-required-axes");
        assert!(matches!(build(&source), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_penalising_bonus_multiplier_rejected() {
        let source = OAK.replace("bonus-loot-multiplier = 3", "bonus-loot-multiplier = 0.5");
        assert!(matches!(build(&source), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_missing_file() {
        let err = TimberConfig::from_file("/nonexistent/timber/trees.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
