//! # Loot Resolver
//!
//! Decides what a harvest grants. It never touches inventories, the world or
//! the command console. It returns two lists for the caller to realize.
//!
//! ## Pool Selection
//!
//! ```text
//!                     ┌──────────────────────┐
//!   entire_tree ────> │ EntireTree           │  def.entire ∪ global.entire
//!                     └──────────────────────┘
//!                     ┌──────────────────────┐
//!   silk touch  ────> │ SilkTouch            │  original block only, no roll
//!   (and allowed)     └──────────────────────┘
//!                     ┌──────────────────────┐
//!   otherwise   ────> │ Normal               │  def.<type> ∪ global.<type>
//!                     │                      │  + original block if flagged
//!                     └──────────────────────┘
//! ```
//!
//! ## Roll
//!
//! One draw per entry from the resolver's stream:
//!
//! ```text
//! effective = chance × bonus_multiplier   (harvester holds bonus loot)
//!           = chance                      (otherwise)
//! success   ⇔ draw < effective / 100
//! ```
//!
//! A successful entry grants its item and its command together. Double drops
//! duplicate every grant after the roll and never change the roll itself.

use timber_core::{BlockSignature, Catalog, EngineSettings, ItemGrant, LootEntry, LootPool, TreeDefinition};

use crate::harvest::{HarvestRequest, Harvester};
use crate::random::RandomSource;
use crate::template::{expand, TemplateContext};

/// An item to hand over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemDrop {
    /// The broken block's own drop, resolved by the game adapter.
    OriginalBlock(BlockSignature),
    /// A configured loot item.
    Item(ItemGrant),
}

/// Everything one harvest grants.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LootOutcome {
    /// Items, in grant order.
    pub items: Vec<ItemDrop>,
    /// Fully expanded console commands, in grant order.
    pub commands: Vec<String>,
}

impl LootOutcome {
    /// Whether nothing was granted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.commands.is_empty()
    }
}

/// Which branch a harvest takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveMode {
    /// Once-per-tree pool.
    EntireTree,
    /// Silk touch: the original block, nothing rolled.
    SilkTouch,
    /// Per-block pool plus the optional original block.
    Normal,
}

impl ResolveMode {
    /// Picks the branch for `request` under `settings`.
    #[must_use]
    pub fn select(settings: &EngineSettings, request: &HarvestRequest) -> Self {
        if request.entire_tree {
            Self::EntireTree
        } else if request.has_silk_touch && settings.apply_silk_touch {
            Self::SilkTouch
        } else {
            Self::Normal
        }
    }
}

/// Rolls loot against a single owned random stream.
#[derive(Debug)]
pub struct LootResolver<R> {
    rng: R,
}

impl<R: RandomSource> LootResolver<R> {
    /// Creates a resolver drawing from `rng`.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// The random stream.
    #[must_use]
    pub const fn rng(&self) -> &R {
        &self.rng
    }

    /// Gives the random stream back.
    #[must_use]
    pub fn into_rng(self) -> R {
        self.rng
    }

    /// Resolves one harvest of `definition`.
    ///
    /// `catalog` supplies the global overlays and switches and must be the
    /// catalog `definition` came from.
    pub fn resolve(
        &mut self,
        catalog: &Catalog,
        definition: &TreeDefinition,
        request: &HarvestRequest,
        harvester: &dyn Harvester,
    ) -> LootOutcome {
        let settings = catalog.settings();
        let copies = if harvester.double_drops_active() { 2 } else { 1 };
        let mut outcome = LootOutcome::default();

        let pool = match ResolveMode::select(settings, request) {
            ResolveMode::EntireTree => Some(LootPool::EntireTree),
            ResolveMode::SilkTouch => {
                push_copies(&mut outcome.items, &ItemDrop::OriginalBlock(request.block.clone()), copies);
                None
            }
            ResolveMode::Normal => {
                if definition.drops_original(request.block_type) {
                    push_copies(&mut outcome.items, &ItemDrop::OriginalBlock(request.block.clone()), copies);
                }
                Some(LootPool::from(request.block_type))
            }
        };

        if let Some(pool) = pool {
            let bonus = harvester
                .has_bonus_loot()
                .then_some(settings.bonus_loot_multiplier);
            let ctx = TemplateContext {
                player: harvester.name(),
                tree_key: definition.key(),
                position: request.position,
            };

            for entry in catalog.effective_pool(definition, pool) {
                if self.roll(entry, bonus) {
                    grant(&mut outcome, entry, &ctx, copies);
                }
            }
        }

        outcome
    }

    /// Draws once for `entry`.
    ///
    /// `bonus_multiplier` is `Some` when the harvester holds the bonus-loot
    /// capability.
    pub fn roll(&mut self, entry: &LootEntry, bonus_multiplier: Option<f64>) -> bool {
        let effective = entry.effective_chance(bonus_multiplier);
        let draw = self.rng.next_unit();
        let success = draw < effective / 100.0;
        tracing::debug!(entry = entry.key(), effective, draw, success, "loot roll");
        success
    }
}

fn grant(outcome: &mut LootOutcome, entry: &LootEntry, ctx: &TemplateContext<'_>, copies: usize) {
    if let Some(item) = entry.item() {
        push_copies(&mut outcome.items, &ItemDrop::Item(item.clone()), copies);
    }

    if let Some(template) = entry.command() {
        for _ in 0..copies {
            match expand(template, ctx) {
                Ok(command) => outcome.commands.push(command),
                Err(err) => {
                    tracing::warn!(
                        entry = entry.key(),
                        tree = ctx.tree_key,
                        error = %err,
                        "skipping loot command"
                    );
                    break;
                }
            }
        }
    }
}

fn push_copies(items: &mut Vec<ItemDrop>, item: &ItemDrop, copies: usize) {
    for _ in 0..copies {
        items.push(item.clone());
    }
}
