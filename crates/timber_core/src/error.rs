//! # Catalog Error Types
//!
//! All errors that can occur while building a catalog from configuration.
//!
//! Narrowing to an empty set or a tool that matches nothing are normal
//! outcomes and are never reported through these types.

use thiserror::Error;

/// Errors raised while building a catalog.
///
/// Any of these aborts the rebuild; the previously published catalog stays live.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required key is absent.
    #[error("missing configuration key: {path}")]
    MissingKey {
        /// Dotted path of the missing key.
        path: String,
    },

    /// A block, item or tool string could not be parsed.
    #[error("invalid signature at {path}: {value:?}")]
    InvalidSignature {
        /// Dotted path of the offending value.
        path: String,
        /// The raw string that failed to parse.
        value: String,
    },

    /// A loot chance is outside `[0, 100]`.
    #[error("chance out of range at {path}: {chance} (expected 0..=100)")]
    ChanceOutOfRange {
        /// Dotted path of the loot entry.
        path: String,
        /// The configured chance.
        chance: f64,
    },

    /// A value has the right type but an unusable magnitude.
    #[error("invalid value at {path}: {reason}")]
    InvalidValue {
        /// Dotted path of the offending value.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The document is not valid TOML or has the wrong shape.
    #[error("malformed configuration: {0}")]
    Parse(String),

    /// The configuration file could not be read.
    #[error("cannot read configuration: {0}")]
    Io(String),
}

impl ConfigError {
    /// Shorthand for [`ConfigError::MissingKey`].
    pub fn missing(path: impl Into<String>) -> Self {
        Self::MissingKey { path: path.into() }
    }

    /// Shorthand for [`ConfigError::InvalidSignature`].
    pub fn invalid_signature(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidSignature {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Shorthand for [`ConfigError::InvalidValue`].
    pub fn invalid_value(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type for catalog building.
pub type ConfigResult<T> = Result<T, ConfigError>;
