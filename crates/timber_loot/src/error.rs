//! # Loot Error Types
//!
//! Errors local to a single grant. They are logged and the grant is skipped;
//! the rest of the roll still runs.

use thiserror::Error;

/// A command template that cannot be expanded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template has nothing to run.
    #[error("command template is empty")]
    Empty,
}
