use randomdrops_data::Block;
use randomdrops_macros::{Event, cancellable};
use randomdrops_util::math::position::BlockPos;
use std::sync::Arc;

use crate::{entity::player::Player, world::World};

use super::BlockEvent;

/// An event that occurs right before a block is broken.
///
/// Cancelling it keeps the block in place. Clearing `drop` still breaks the
/// block but suppresses the block's own item drop.
#[cancellable]
#[derive(Event, Clone)]
pub struct BlockBreakEvent {
    /// The player who is breaking the block, if applicable.
    pub player: Option<Arc<Player>>,

    /// The world the block is in.
    pub world: Arc<World>,

    /// The block that is being broken.
    pub block: Block,

    /// Where the block is.
    pub position: BlockPos,

    /// A boolean indicating whether the block should drop items.
    pub drop: bool,
}

impl BlockBreakEvent {
    #[must_use]
    pub fn new(
        player: Option<Arc<Player>>,
        world: Arc<World>,
        block: Block,
        position: BlockPos,
        drop: bool,
    ) -> Self {
        Self {
            player,
            world,
            block,
            position,
            drop,
            cancelled: false,
        }
    }
}

impl BlockEvent for BlockBreakEvent {
    fn get_block(&self) -> &Block {
        &self.block
    }
}
