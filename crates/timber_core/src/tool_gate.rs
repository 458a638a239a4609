//! # Tool Gate
//!
//! Decides whether a tool may fell a tree. A `false` answer tells the caller to
//! leave the block as a normal break, without toppling.

use crate::catalog::Catalog;
use crate::definition::TreeDefinition;
use crate::signature::ToolSignature;

impl Catalog {
    /// Whether `tool` may fell `definition`, or any tree when `definition` is
    /// `None`.
    ///
    /// Always `true` while `ignore-required-tools` is on. Otherwise the tool
    /// must appear in the definition's required tools or the global ones.
    #[must_use]
    pub fn is_tool_valid(&self, definition: Option<&TreeDefinition>, tool: &ToolSignature) -> bool {
        if self.settings().ignore_required_tools {
            tracing::debug!(tool = %tool, "required tools ignored");
            return true;
        }

        let global = self.overlays().required_tools.contains(tool);
        match definition {
            Some(def) => global || def.required_tools().contains(tool),
            None => {
                global
                    || self
                        .definitions()
                        .iter()
                        .any(|def| def.required_tools().contains(tool))
            }
        }
    }

    /// Whether `tool` may fell at least one configured tree.
    #[inline]
    #[must_use]
    pub fn is_tool_valid_for_any(&self, tool: &ToolSignature) -> bool {
        self.is_tool_valid(None, tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GlobalOverlays;
    use crate::settings::EngineSettings;
    use crate::signature::BlockSignature;

    fn species(key: &str, tools: &[&str]) -> TreeDefinition {
        TreeDefinition::new(
            key,
            vec![BlockSignature::new(&format!("{key}_log"))],
            vec![BlockSignature::new(&format!("{key}_leaves"))],
            BlockSignature::new(&format!("{key}_sapling")),
        )
        .with_required_tools(tools.iter().map(|t| ToolSignature::new(t)).collect())
    }

    fn catalog(global_tools: &[&str], ignore: bool) -> Catalog {
        Catalog::new(
            vec![species("oak", &["wooden_axe"]), species("jungle", &[])],
            GlobalOverlays {
                required_tools: global_tools.iter().map(|t| ToolSignature::new(t)).collect(),
                ..GlobalOverlays::default()
            },
            EngineSettings {
                ignore_required_tools: ignore,
                ..EngineSettings::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_own_tool_accepted() {
        let catalog = catalog(&[], false);
        let oak: &TreeDefinition = catalog.get("oak").unwrap();
        assert!(catalog.is_tool_valid(Some(oak), &ToolSignature::new("wooden_axe")));
        assert!(!catalog.is_tool_valid(Some(oak), &ToolSignature::new("stick")));
    }

    #[test]
    fn test_global_tool_accepted_with_empty_own_set() {
        let catalog = catalog(&["diamond_axe"], false);
        let jungle: &TreeDefinition = catalog.get("jungle").unwrap();
        assert!(jungle.required_tools().is_empty());
        assert!(catalog.is_tool_valid(Some(jungle), &ToolSignature::new("diamond_axe")));
        assert!(!catalog.is_tool_valid(Some(jungle), &ToolSignature::new("wooden_axe")));
    }

    #[test]
    fn test_ignore_switch_bypasses_everything() {
        let catalog = catalog(&[], true);
        let oak: &TreeDefinition = catalog.get("oak").unwrap();
        let unknown = ToolSignature::new("fishing_rod");
        assert!(catalog.is_tool_valid(Some(oak), &unknown));
        assert!(catalog.is_tool_valid(None, &unknown));
    }

    #[test]
    fn test_any_definition() {
        let catalog = catalog(&["golden_axe"], false);
        assert!(catalog.is_tool_valid_for_any(&ToolSignature::new("wooden_axe")));
        assert!(catalog.is_tool_valid_for_any(&ToolSignature::new("golden_axe")));
        assert!(!catalog.is_tool_valid_for_any(&ToolSignature::new("shears")));
        assert!(!Catalog::empty().is_tool_valid_for_any(&ToolSignature::new("wooden_axe")));
    }
}
