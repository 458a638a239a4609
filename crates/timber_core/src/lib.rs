//! # Timber Core
//!
//! Tree definitions and the policy that surrounds them, for a tree-felling
//! feature that needs to know *which* tree a block belongs to and *whether* a
//! tool may fell it.
//!
//! ## Design Principles
//!
//! 1. **Immutable definitions** - built once per reload, never edited in place
//! 2. **Additive overlays** - global rules union with each definition's own
//! 3. **Build then swap** - a broken config never replaces the live catalog
//! 4. **External configuration** - all species and loot live in TOML
//!
//! ## Example
//!
//! ```rust,ignore
//! use timber_core::{CatalogStore, TextSignatureParser, BlockSignature};
//!
//! let store = CatalogStore::new();
//! store.reload_from_file("data/trees.toml", &TextSignatureParser)?;
//!
//! let catalog = store.snapshot();
//! let candidates = catalog.definitions_for_log(&BlockSignature::new("oak_log"));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod config;
pub mod definition;
pub mod error;
pub mod loot;
pub mod matching;
pub mod settings;
pub mod signature;
pub mod store;
pub mod tool_gate;

pub use catalog::{Catalog, CatalogStats, GlobalOverlays};
pub use config::{build_catalog, LootSection, TimberConfig, TreeSection};
pub use definition::TreeDefinition;
pub use error::{ConfigError, ConfigResult};
pub use loot::{LootEntry, LootPool, TreeBlockType};
pub use matching::narrow;
pub use settings::EngineSettings;
pub use signature::{
    BlockSignature, ItemGrant, SignatureParser, TextSignatureParser, ToolSignature,
};
pub use store::CatalogStore;
