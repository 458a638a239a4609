//! # Command Templates
//!
//! Placeholders expanded in every queued command:
//!
//! | Token      | Value                         |
//! |------------|-------------------------------|
//! | `%player%` | harvester name                |
//! | `%type%`   | tree definition key           |
//! | `%xPos%`   | block X                       |
//! | `%yPos%`   | block Y                       |
//! | `%zPos%`   | block Z                       |
//!
//! Anything else is literal text: `say 50% off` and `tellraw %player% 100%bonus%`
//! both pass through with only the known tokens replaced.

use crate::error::TemplateError;
use crate::harvest::BlockPosition;

/// Values for one expansion.
#[derive(Clone, Copy, Debug)]
pub struct TemplateContext<'a> {
    /// Harvester name.
    pub player: &'a str,
    /// Tree definition key.
    pub tree_key: &'a str,
    /// Harvested block position.
    pub position: BlockPosition,
}

impl TemplateContext<'_> {
    fn lookup(&self, token: &str) -> Option<String> {
        match token {
            "player" => Some(self.player.to_owned()),
            "type" => Some(self.tree_key.to_owned()),
            "xPos" => Some(self.position.x.to_string()),
            "yPos" => Some(self.position.y.to_string()),
            "zPos" => Some(self.position.z.to_string()),
            _ => None,
        }
    }
}

/// Expands every known placeholder in `template`.
///
/// Any other `%...%` text is kept as written.
///
/// # Errors
///
/// Returns [`TemplateError::Empty`] for a blank template.
pub fn expand(template: &str, ctx: &TemplateContext<'_>) -> Result<String, TemplateError> {
    if template.trim().is_empty() {
        return Err(TemplateError::Empty);
    }

    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let token_len = after
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(after.len());
        let value = if after[token_len..].starts_with('%') {
            ctx.lookup(&after[..token_len])
        } else {
            None
        };

        match value {
            Some(value) => {
                out.push_str(&value);
                rest = &after[token_len + 1..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    Ok(out)
}
