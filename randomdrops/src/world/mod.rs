use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicI32, Ordering},
    },
};

use randomdrops_data::{Block, EntityType};
use randomdrops_util::{math::position::BlockPos, text::TextComponent};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::{
    entity::{Entity, ItemEntity, player::Player},
    item::ItemStack,
    plugin::events::block::block_break::BlockBreakEvent,
    server::Server,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpawnError {
    #[error("{0} cannot be summoned")]
    NotSummonable(&'static str),
}

/// A single dimension: the blocks that were placed, and what lives on top of them.
///
/// Positions that were never set read as air.
pub struct World {
    pub name: String,
    blocks: RwLock<HashMap<BlockPos, Block>>,
    pub players: RwLock<HashMap<String, Arc<Player>>>,
    entities: RwLock<Vec<Arc<Entity>>>,
    items: RwLock<Vec<ItemEntity>>,
    next_entity_id: AtomicI32,
}

impl World {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: RwLock::new(HashMap::new()),
            players: RwLock::new(HashMap::new()),
            entities: RwLock::new(Vec::new()),
            items: RwLock::new(Vec::new()),
            next_entity_id: AtomicI32::new(1),
        }
    }

    pub async fn get_block(&self, pos: &BlockPos) -> Block {
        self.blocks
            .read()
            .await
            .get(pos)
            .copied()
            .unwrap_or(Block::AIR)
    }

    /// Places `block` and returns what was there before.
    pub async fn set_block(&self, pos: &BlockPos, block: Block) -> Block {
        let mut blocks = self.blocks.write().await;
        let old = if block.is_air() {
            blocks.remove(pos)
        } else {
            blocks.insert(*pos, block)
        };
        old.unwrap_or(Block::AIR)
    }

    /// Breaks the block at `pos` the way a player (or the console, when
    /// `player` is `None`) would. Returns `false` when a plugin cancelled it.
    pub async fn break_block(
        self: &Arc<Self>,
        server: &Arc<Server>,
        pos: &BlockPos,
        player: Option<Arc<Player>>,
    ) -> bool {
        let block = self.get_block(pos).await;
        let event = server
            .plugin_manager
            .fire(
                server,
                BlockBreakEvent::new(player, self.clone(), block, *pos, true),
            )
            .await;

        if event.cancelled {
            log::debug!("Breaking {} at {pos} was cancelled", block.name);
            return false;
        }

        self.set_block(pos, Block::AIR).await;

        if event.drop {
            if let Some(item) = block.item {
                self.spawn_item(ItemStack::new(1, item), pos).await;
            }
        }
        true
    }

    pub async fn spawn_item(&self, stack: ItemStack, pos: &BlockPos) -> ItemEntity {
        let item = ItemEntity {
            entity_id: self.new_entity_id(),
            stack,
            pos: pos.to_centered_f64(),
        };
        self.items.write().await.push(item.clone());
        item
    }

    pub async fn spawn_entity(
        &self,
        entity_type: EntityType,
        pos: &BlockPos,
    ) -> Result<Arc<Entity>, SpawnError> {
        if !entity_type.summonable {
            return Err(SpawnError::NotSummonable(entity_type.resource_name));
        }
        let entity = Arc::new(Entity::new(
            self.new_entity_id(),
            entity_type,
            pos.to_f64(),
        ));
        self.entities.write().await.push(entity.clone());
        Ok(entity)
    }

    pub async fn items(&self) -> Vec<ItemEntity> {
        self.items.read().await.clone()
    }

    pub async fn entities(&self) -> Vec<Arc<Entity>> {
        self.entities.read().await.clone()
    }

    pub async fn broadcast_system_message(&self, text: &TextComponent) {
        for player in self.players.read().await.values() {
            player.send_system_message(text).await;
        }
    }

    fn new_entity_id(&self) -> i32 {
        self.next_entity_id.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use randomdrops_config::AdvancedConfiguration;
    use randomdrops_data::{Block, EntityType, Item};
    use randomdrops_util::math::position::BlockPos;

    use super::{SpawnError, World};
    use crate::server::Server;

    #[tokio::test]
    async fn unset_positions_are_air() {
        let world = World::new("world");
        assert_eq!(world.get_block(&BlockPos::new(1, 2, 3)).await, Block::AIR);
        assert_eq!(
            world.set_block(&BlockPos::new(1, 2, 3), Block::STONE).await,
            Block::AIR
        );
        assert_eq!(world.get_block(&BlockPos::new(1, 2, 3)).await, Block::STONE);
    }

    #[tokio::test]
    async fn breaking_drops_the_block_item() {
        let server = Arc::new(Server::new(&AdvancedConfiguration::default()));
        let world = server.default_world().await;
        let pos = BlockPos::new(0, 64, 0);
        world.set_block(&pos, Block::STONE).await;

        assert!(world.break_block(&server, &pos, None).await);
        assert_eq!(world.get_block(&pos).await, Block::AIR);

        let items = world.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].stack.item, Item::COBBLESTONE);
        assert_eq!(items[0].stack.item_count, 1);
        assert_eq!(items[0].pos, pos.to_centered_f64());
    }

    #[tokio::test]
    async fn blocks_without_item_drop_nothing() {
        let server = Arc::new(Server::new(&AdvancedConfiguration::default()));
        let world = server.default_world().await;
        let pos = BlockPos::new(4, 10, -4);
        world.set_block(&pos, Block::GLASS).await;

        assert!(world.break_block(&server, &pos, None).await);
        assert!(world.items().await.is_empty());
    }

    #[tokio::test]
    async fn non_summonable_entities_fail_to_spawn() {
        let world = World::new("world");
        let pos = BlockPos::new(0, 0, 0);
        assert_eq!(
            world.spawn_entity(EntityType::PLAYER, &pos).await.err(),
            Some(SpawnError::NotSummonable("player"))
        );
        let zombie = world.spawn_entity(EntityType::ZOMBIE, &pos).await.unwrap();
        assert_eq!(zombie.entity_type, EntityType::ZOMBIE);
        assert_eq!(world.entities().await.len(), 1);
    }
}
