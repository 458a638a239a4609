//! # Delivery
//!
//! Hands a [`LootOutcome`] to the game through a [`LootRealizer`]. The
//! resolver decides *what*; this module only decides *where*:
//!
//! ```text
//! add-items-to-inventory && same world ──> inventory, overflow at the player
//! otherwise                            ──> dropped at the harvested block
//! commands                             ──> console, in grant order, after items
//! ```

use timber_core::EngineSettings;

use crate::harvest::BlockPosition;
use crate::resolver::{ItemDrop, LootOutcome};

/// The game-side collaborator that realizes grants.
pub trait LootRealizer {
    /// Puts `item` into the harvester's inventory. Returns whatever did not fit.
    fn add_to_inventory(&mut self, item: &ItemDrop) -> Option<ItemDrop>;

    /// Drops `item` at the harvester's feet.
    fn drop_at_harvester(&mut self, item: &ItemDrop);

    /// Drops `item` at the harvested block.
    fn drop_at_block(&mut self, position: BlockPosition, item: &ItemDrop);

    /// Runs `command` as the console.
    fn dispatch_command(&mut self, command: &str);
}

/// Where the harvester stands relative to the harvested block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeliveryTarget {
    /// The harvested block.
    pub position: BlockPosition,
    /// The harvester is in the same world as the block.
    pub same_world: bool,
}

/// Counts of what was realized.
///
/// Counts are per grant, not per item. A grant the inventory took only part of
/// counts once, under `overflowed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Grants placed in the inventory whole.
    pub to_inventory: usize,
    /// Grants that did not fit, in whole or in part. The remainder was dropped
    /// at the harvester.
    pub overflowed: usize,
    /// Grants dropped at the block.
    pub dropped: usize,
    /// Commands dispatched.
    pub commands: usize,
}

/// Realizes `outcome`.
pub fn deliver(
    outcome: &LootOutcome,
    settings: &EngineSettings,
    target: DeliveryTarget,
    realizer: &mut dyn LootRealizer,
) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    if settings.add_items_to_inventory && target.same_world {
        let mut overflow = Vec::new();
        for item in &outcome.items {
            match realizer.add_to_inventory(item) {
                Some(rest) => overflow.push(rest),
                None => report.to_inventory += 1,
            }
        }
        for item in &overflow {
            realizer.drop_at_harvester(item);
        }
        report.overflowed = overflow.len();
    } else {
        for item in &outcome.items {
            realizer.drop_at_block(target.position, item);
        }
        report.dropped = outcome.items.len();
    }

    for command in &outcome.commands {
        realizer.dispatch_command(command);
    }
    report.commands = outcome.commands.len();

    tracing::debug!(
        position = %target.position,
        to_inventory = report.to_inventory,
        overflowed = report.overflowed,
        dropped = report.dropped,
        commands = report.commands,
        "loot delivered"
    );
    report
}
