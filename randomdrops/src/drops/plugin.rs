use std::sync::Arc;

use async_trait::async_trait;
use randomdrops_config::DropsConfig;
use randomdrops_util::PermissionLvl;
use randomdrops_util::math::position::BlockPos;
use randomdrops_util::text::TextComponent;
use randomdrops_util::text::color::NamedColor;
use tokio::sync::Mutex;

use crate::item::ItemStack;
use crate::plugin::events::block::{BlockEvent, block_break::BlockBreakEvent};
use crate::plugin::events::player::{PlayerEvent, player_join::PlayerJoinEvent};
use crate::plugin::{Context, EventHandler, EventPriority, Plugin, PluginMetadata};
use crate::server::Server;
use crate::world::World;

use super::commands::command_trees;
use super::{Catalog, DropOutcome, DropResolver, DropSettings, DropTable, MAX_ITEM_STACK, RandomDrops, SettingsError};

/// Drop state shared between the break handler and the commands.
pub type SharedDrops = Arc<Mutex<RandomDrops>>;

pub const METADATA: PluginMetadata<'static> = PluginMetadata {
    name: "randomdrops",
    version: env!("CARGO_PKG_VERSION"),
    authors: "randomdrops contributors",
    description: "Every block type drops its own random item or creature.",
};

pub struct RandomDropsPlugin {
    drops: SharedDrops,
    disable_on_join: bool,
    commands: Vec<String>,
}

impl RandomDropsPlugin {
    pub fn new(config: &DropsConfig) -> Result<Self, SettingsError> {
        let settings = DropSettings::from_config(config)?;
        let table = DropTable::new(Catalog::vanilla(), config.seed);
        log::debug!(
            "[RandomDrops] {} items and {} creatures available",
            table.available_items(),
            table.available_creatures()
        );
        Ok(Self::with_drops(
            Arc::new(Mutex::new(RandomDrops::new(settings, table))),
            config.disable_on_join,
        ))
    }

    #[must_use]
    pub fn with_drops(drops: SharedDrops, disable_on_join: bool) -> Self {
        Self {
            drops,
            disable_on_join,
            commands: Vec::new(),
        }
    }

    /// A handle on the drop state, e.g. to inspect assignments.
    #[must_use]
    pub fn drops(&self) -> SharedDrops {
        self.drops.clone()
    }
}

#[async_trait]
impl Plugin for RandomDropsPlugin {
    async fn on_load(&mut self, context: &Context) -> Result<(), String> {
        context
            .register_event(
                Arc::new(BlockBreakHandler(self.drops.clone())),
                EventPriority::Normal,
                true,
            )
            .await;
        context
            .register_event(
                Arc::new(JoinHandler {
                    drops: self.drops.clone(),
                    disable_on_join: self.disable_on_join,
                }),
                EventPriority::Normal,
                true,
            )
            .await;

        for tree in command_trees(&self.drops) {
            self.commands.push(tree.names[0].clone());
            context.register_command(tree, PermissionLvl::Two).await;
        }

        log::info!("[RandomDrops] Mod initialized! (v{})", context.metadata().version);
        Ok(())
    }

    async fn on_unload(&mut self, context: &Context) -> Result<(), String> {
        for name in self.commands.drain(..) {
            context.unregister_command(&name).await;
        }
        Ok(())
    }
}

/// Spawns `outcome` at `pos`: one item stack capped at [`MAX_ITEM_STACK`], or
/// `count` creatures. Creatures that cannot be spawned are skipped.
pub async fn apply_outcome(world: &World, pos: &BlockPos, outcome: DropOutcome) {
    match outcome {
        DropOutcome::Item { item, count } => {
            let count = count.min(u32::from(MAX_ITEM_STACK)) as u8;
            world.spawn_item(ItemStack::new(count, item), pos).await;
        }
        DropOutcome::Creature { entity_type, count } => {
            for _ in 0..count {
                if let Err(err) = world.spawn_entity(entity_type, pos).await {
                    log::debug!("[RandomDrops] {err}");
                }
            }
        }
    }
}

struct BlockBreakHandler(SharedDrops);

#[async_trait]
impl EventHandler<BlockBreakEvent> for BlockBreakHandler {
    async fn handle_blocking(&self, _server: &Arc<Server>, event: &mut BlockBreakEvent) {
        let block = *event.get_block();
        if event.cancelled || block.is_air() {
            return;
        }
        let outcome = {
            let mut drops = self.0.lock().await;
            if !drops.settings().enabled() {
                return;
            }
            drops.resolve(block)
        };
        event.drop = false;
        apply_outcome(&event.world, &event.position, outcome).await;
    }
}

struct JoinHandler {
    drops: SharedDrops,
    disable_on_join: bool,
}

#[async_trait]
impl EventHandler<PlayerJoinEvent> for JoinHandler {
    async fn handle_blocking(&self, _server: &Arc<Server>, event: &mut PlayerJoinEvent) {
        if self.disable_on_join {
            self.drops.lock().await.settings_mut().set_enabled(false);
        }
        event
            .get_player()
            .send_system_message(
                &TextComponent::text("RandomDrops initialized, run /rd_start to enable it")
                    .color_named(NamedColor::Green),
            )
            .await;
    }
}
