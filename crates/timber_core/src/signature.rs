//! # Block, Item and Tool Signatures
//!
//! Opaque identifiers supplied by the game adapter. The catalog never compares
//! raw strings: configured block signatures are *patterns* matched against
//! observed blocks, and tools are compared by item type only.
//!
//! ## Text Format
//!
//! ```text
//! block:  [namespace:]material[key=value,key=value]   e.g. oak_log[axis=y]
//! item:   [namespace:]material [amount]               e.g. minecraft:apple 2
//! tool:   same as item, everything after the type is ignored
//! ```
//!
//! The `minecraft` namespace is implied and all names are case-insensitive,
//! so `OAK_LOG`, `oak_log` and `minecraft:oak_log` are the same block.

use std::collections::BTreeMap;
use std::fmt;

/// Namespace assumed when a string carries none.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A block material plus the state properties it pins down.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockSignature {
    material: String,
    properties: BTreeMap<String, String>,
}

impl BlockSignature {
    /// Creates a signature with no state properties.
    #[must_use]
    pub fn new(material: &str) -> Self {
        Self {
            material: normalize_name(material),
            properties: BTreeMap::new(),
        }
    }

    /// Pins a state property.
    #[must_use]
    pub fn with_property(mut self, key: &str, value: &str) -> Self {
        self.properties
            .insert(key.trim().to_ascii_lowercase(), value.trim().to_ascii_lowercase());
        self
    }

    /// Namespaced material name.
    #[inline]
    #[must_use]
    pub fn material(&self) -> &str {
        &self.material
    }

    /// State properties pinned by this signature.
    #[inline]
    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Whether `observed` is this block.
    ///
    /// The materials must be equal and every property this signature pins must
    /// hold the same value on `observed`. Properties this signature leaves open
    /// are ignored, so `oak_log` matches `oak_log[axis=x]` but not the reverse.
    #[must_use]
    pub fn matches(&self, observed: &BlockSignature) -> bool {
        self.material == observed.material
            && self
                .properties
                .iter()
                .all(|(key, value)| observed.properties.get(key) == Some(value))
    }
}

impl fmt::Display for BlockSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.material)?;
        if !self.properties.is_empty() {
            f.write_str("[")?;
            for (i, (key, value)) in self.properties.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{key}={value}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// An item payload granted by a loot entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemGrant {
    item_type: String,
    amount: u32,
}

impl ItemGrant {
    /// Creates a grant of `amount` items of `item_type`.
    #[must_use]
    pub fn new(item_type: &str, amount: u32) -> Self {
        Self {
            item_type: normalize_name(item_type),
            amount,
        }
    }

    /// Namespaced item type.
    #[inline]
    #[must_use]
    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    /// Stack size.
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.amount
    }
}

impl fmt::Display for ItemGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.item_type, self.amount)
    }
}

/// A tool category.
///
/// Only the item type is retained: durability, enchantments and stack size are
/// dropped on construction, so two pickaxes with different wear compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToolSignature {
    item_type: String,
}

impl ToolSignature {
    /// Creates a tool signature for `item_type`.
    #[must_use]
    pub fn new(item_type: &str) -> Self {
        Self {
            item_type: normalize_name(item_type),
        }
    }

    /// Narrows an item to its tool category.
    #[must_use]
    pub fn from_item(item: &ItemGrant) -> Self {
        Self {
            item_type: item.item_type.clone(),
        }
    }

    /// Namespaced item type.
    #[inline]
    #[must_use]
    pub fn item_type(&self) -> &str {
        &self.item_type
    }
}

impl fmt::Display for ToolSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.item_type)
    }
}

// ============================================================================
// Parser seam
// ============================================================================

/// Turns configuration strings into signatures.
///
/// The game adapter implements this when its block/item encoding differs from
/// the default text format. `None` means the string is not a valid signature.
pub trait SignatureParser: Send + Sync {
    /// Parses a block signature.
    fn parse_block(&self, raw: &str) -> Option<BlockSignature>;

    /// Parses an item payload.
    fn parse_item(&self, raw: &str) -> Option<ItemGrant>;

    /// Parses a tool category.
    fn parse_tool(&self, raw: &str) -> Option<ToolSignature> {
        self.parse_item(raw).map(|item| ToolSignature::from_item(&item))
    }
}

/// Parser for the text format described in the module docs.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextSignatureParser;

impl SignatureParser for TextSignatureParser {
    fn parse_block(&self, raw: &str) -> Option<BlockSignature> {
        let raw = raw.trim();
        let (name, state) = match raw.find('[') {
            Some(open) => {
                let inner = raw[open + 1..].strip_suffix(']')?;
                (&raw[..open], Some(inner))
            }
            None => (raw, None),
        };

        if !is_valid_name(name) {
            return None;
        }
        let mut signature = BlockSignature::new(name);

        if let Some(state) = state {
            for pair in state.split(',').filter(|p| !p.trim().is_empty()) {
                let (key, value) = pair.split_once('=')?;
                if !is_valid_token(key.trim()) || !is_valid_token(value.trim()) {
                    return None;
                }
                signature = signature.with_property(key, value);
            }
        }

        Some(signature)
    }

    fn parse_item(&self, raw: &str) -> Option<ItemGrant> {
        let mut parts = raw.split_whitespace();
        let name = parts.next()?;
        if !is_valid_name(name) {
            return None;
        }
        let amount = match parts.next() {
            Some(amount) => amount.parse::<u32>().ok().filter(|a| *a > 0)?,
            None => 1,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(ItemGrant::new(name, amount))
    }

    fn parse_tool(&self, raw: &str) -> Option<ToolSignature> {
        // Tools only care about the type; trailing metadata is discarded.
        let name = raw.split_whitespace().next()?;
        is_valid_name(name).then(|| ToolSignature::new(name))
    }
}

fn normalize_name(name: &str) -> String {
    let name = name.trim().to_ascii_lowercase();
    if name.contains(':') {
        name
    } else {
        format!("{DEFAULT_NAMESPACE}:{name}")
    }
}

fn is_valid_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/'))
}

fn is_valid_name(name: &str) -> bool {
    let mut parts = name.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(material), None, None) => is_valid_token(material),
        (Some(namespace), Some(material), None) => {
            is_valid_token(namespace) && is_valid_token(material)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_names_are_normalized() {
        let parser = TextSignatureParser;
        let a = parser.parse_block("OAK_LOG").unwrap();
        let b = parser.parse_block("minecraft:oak_log").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.material(), "minecraft:oak_log");
    }

    #[test]
    fn test_block_properties_parse() {
        let parser = TextSignatureParser;
        let sig = parser.parse_block("oak_leaves[persistent=false, distance=3]").unwrap();
        assert_eq!(sig.properties().get("persistent").map(String::as_str), Some("false"));
        assert_eq!(sig.properties().get("distance").map(String::as_str), Some("3"));
        assert_eq!(sig.to_string(), "minecraft:oak_leaves[distance=3,persistent=false]");
    }

    #[test]
    fn test_configured_pattern_matches_more_specific_block() {
        let pattern = BlockSignature::new("oak_log");
        let observed = BlockSignature::new("oak_log").with_property("axis", "x");
        assert!(pattern.matches(&observed));
        assert!(!observed.matches(&pattern));
        assert!(!pattern.matches(&BlockSignature::new("birch_log")));
    }

    #[test]
    fn test_pinned_property_must_agree() {
        let pattern = BlockSignature::new("mushroom_stem").with_property("up", "true");
        let same = BlockSignature::new("mushroom_stem")
            .with_property("up", "true")
            .with_property("down", "false");
        let different = BlockSignature::new("mushroom_stem").with_property("up", "false");
        assert!(pattern.matches(&same));
        assert!(!pattern.matches(&different));
    }

    #[test]
    fn test_invalid_block_strings_rejected() {
        let parser = TextSignatureParser;
        for raw in ["", "  ", "oak log", "oak_log[axis=y", "oak_log[axis]", "a:b:c", "oak_log[=y]"] {
            assert!(parser.parse_block(raw).is_none(), "{raw:?} should not parse");
        }
    }

    #[test]
    fn test_item_amounts() {
        let parser = TextSignatureParser;
        assert_eq!(parser.parse_item("apple").unwrap().amount(), 1);
        assert_eq!(parser.parse_item("minecraft:stick 4").unwrap().amount(), 4);
        assert!(parser.parse_item("stick 0").is_none());
        assert!(parser.parse_item("stick four").is_none());
        assert!(parser.parse_item("stick 1 2").is_none());
    }

    #[test]
    fn test_tool_ignores_metadata() {
        let parser = TextSignatureParser;
        let plain = parser.parse_tool("diamond_axe").unwrap();
        let with_meta = parser.parse_tool("DIAMOND_AXE sharpness=5 damage=200").unwrap();
        assert_eq!(plain, with_meta);

        let from_item = ToolSignature::from_item(&ItemGrant::new("diamond_axe", 1));
        assert_eq!(plain, from_item);
    }
}
