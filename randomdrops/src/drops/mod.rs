use std::collections::HashMap;

use rand::{Rng, SeedableRng, rngs::StdRng};
use randomdrops_data::{Block, EntityType, Item, MobCategory};

pub mod commands;
pub mod plugin;
pub mod settings;

pub use plugin::RandomDropsPlugin;
pub use settings::{DropSettings, SettingsError};

/// Largest stack spawned for a single item outcome.
pub const MAX_ITEM_STACK: u8 = 64;

/// What a block drops once both pools have run dry.
pub const FALLBACK_DROP: DropOutcome = DropOutcome::Item {
    item: Item::DIRT,
    count: 1,
};

/// The fixed drop bound to a block type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    Item { item: Item, count: u32 },
    Creature { entity_type: EntityType, count: u32 },
}

impl DropOutcome {
    #[must_use]
    pub const fn count(&self) -> u32 {
        match self {
            Self::Item { count, .. } | Self::Creature { count, .. } => *count,
        }
    }

    #[must_use]
    pub const fn is_creature(&self) -> bool {
        matches!(self, Self::Creature { .. })
    }
}

/// Every item and creature type that may be handed out as a drop.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub items: Vec<Item>,
    pub creatures: Vec<EntityType>,
}

impl Catalog {
    #[must_use]
    pub fn new(items: Vec<Item>, creatures: Vec<EntityType>) -> Self {
        Self { items, creatures }
    }

    /// The full registries minus air, players and everything in the `misc`
    /// category (projectiles, vehicles, effects). Bosses stay in.
    #[must_use]
    pub fn vanilla() -> Self {
        let items = Item::ALL
            .iter()
            .filter(|item| **item != Item::AIR)
            .copied()
            .collect();
        let creatures = EntityType::ALL
            .iter()
            .filter(|entity| entity.category != MobCategory::Misc && **entity != EntityType::PLAYER)
            .copied()
            .collect();
        Self { items, creatures }
    }
}

/// Assigns each block type a drop the first time it is broken, drawing from
/// the item and creature pools without replacement.
pub struct DropTable {
    catalog: Catalog,
    available_items: Vec<Item>,
    available_creatures: Vec<EntityType>,
    assignments: HashMap<Block, DropOutcome>,
    rng: StdRng,
}

impl DropTable {
    #[must_use]
    pub fn new(catalog: Catalog, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            available_items: catalog.items.clone(),
            available_creatures: catalog.creatures.clone(),
            catalog,
            assignments: HashMap::new(),
            rng,
        }
    }

    /// Returns the drop of `block`, assigning one on first use.
    pub fn resolve(&mut self, block: Block, settings: &DropSettings) -> DropOutcome {
        if let Some(outcome) = self.assignments.get(&block) {
            return *outcome;
        }
        let outcome = self.assign(block, settings);
        self.assignments.insert(block, outcome);
        outcome
    }

    fn assign(&mut self, block: Block, settings: &DropSettings) -> DropOutcome {
        let count = self.rng.gen_range(1..=settings.max_amount().max(1));

        let choose_creature = match (
            !self.available_creatures.is_empty(),
            !self.available_items.is_empty(),
        ) {
            (false, false) => {
                log::warn!(
                    "[RandomDrops] pools exhausted, {} falls back to dirt",
                    block.name
                );
                return FALLBACK_DROP;
            }
            (true, false) => true,
            (false, true) => false,
            (true, true) => self.rng.gen::<f64>() < settings.mob_chance(),
        };

        if choose_creature {
            let index = self.rng.gen_range(0..self.available_creatures.len());
            let entity_type = self.available_creatures.swap_remove(index);
            log::info!(
                "[RandomDrops] {} -> {count}x entity {}",
                block.name,
                entity_type.resource_name
            );
            DropOutcome::Creature { entity_type, count }
        } else {
            let index = self.rng.gen_range(0..self.available_items.len());
            let item = self.available_items.swap_remove(index);
            log::info!(
                "[RandomDrops] {} -> {count}x item {}",
                block.name,
                item.registry_key
            );
            DropOutcome::Item { item, count }
        }
    }

    /// Forgets every assignment and refills both pools from the catalog.
    pub fn reset(&mut self) {
        self.assignments.clear();
        self.available_items.clone_from(&self.catalog.items);
        self.available_creatures.clone_from(&self.catalog.creatures);
    }

    #[must_use]
    pub fn assigned(&self, block: &Block) -> Option<&DropOutcome> {
        self.assignments.get(block)
    }

    pub fn assignments(&self) -> impl Iterator<Item = (&Block, &DropOutcome)> {
        self.assignments.iter()
    }

    #[must_use]
    pub fn available_items(&self) -> usize {
        self.available_items.len()
    }

    #[must_use]
    pub fn available_creatures(&self) -> usize {
        self.available_creatures.len()
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

/// The seam between the host's block break handling and drop assignment.
pub trait DropResolver: Send {
    fn resolve(&mut self, block: Block) -> DropOutcome;

    fn reset(&mut self);

    fn settings(&self) -> &DropSettings;

    fn settings_mut(&mut self) -> &mut DropSettings;
}

/// Settings and assignment table owned together, as the plugin holds them.
pub struct RandomDrops {
    settings: DropSettings,
    table: DropTable,
}

impl RandomDrops {
    #[must_use]
    pub fn new(settings: DropSettings, table: DropTable) -> Self {
        Self { settings, table }
    }

    #[must_use]
    pub const fn table(&self) -> &DropTable {
        &self.table
    }
}

impl DropResolver for RandomDrops {
    fn resolve(&mut self, block: Block) -> DropOutcome {
        self.table.resolve(block, &self.settings)
    }

    fn reset(&mut self) {
        self.table.reset();
    }

    fn settings(&self) -> &DropSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut DropSettings {
        &mut self.settings
    }
}
