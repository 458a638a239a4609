//! # Timber Loot
//!
//! Loot resolution for felled trees, and the engine facade the game adapter
//! talks to.
//!
//! ## Design Principles
//!
//! 1. **Injected randomness** - every roll draws from a [`RandomSource`]
//! 2. **One snapshot per call** - a reload never tears a resolution in half
//! 3. **Local failures** - a broken command template skips that command only
//! 4. **Game-agnostic** - players, inventories and the console sit behind traits
//!
//! ## Example
//!
//! ```rust,ignore
//! use timber_loot::{TimberEngine, HarvestRequest, BlockPosition, StaticHarvester};
//! use timber_core::{BlockSignature, TreeBlockType};
//!
//! let engine = TimberEngine::from_entropy();
//! engine.reload_from_file("data/trees.toml")?;
//!
//! let request = HarvestRequest::block(
//!     BlockSignature::new("oak_leaves"),
//!     TreeBlockType::Leaf,
//!     BlockPosition::new(12, 70, -3),
//! );
//! let outcome = engine.resolve_loot("oak", &request, &StaticHarvester::named("Alex"));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod delivery;
pub mod engine;
pub mod error;
pub mod harvest;
pub mod random;
pub mod resolver;
pub mod template;

pub use delivery::{deliver, DeliveryReport, DeliveryTarget, LootRealizer};
pub use engine::TimberEngine;
pub use error::TemplateError;
pub use harvest::{BlockPosition, HarvestRequest, Harvester, StaticHarvester};
pub use random::{FixedRandom, RandomSource, SeededRandom, SequenceRandom};
pub use resolver::{ItemDrop, LootOutcome, LootResolver, ResolveMode};
pub use template::{expand, TemplateContext};
