use randomdrops_data::Block;

use super::Cancellable;

pub mod block_break;

pub trait BlockEvent: Cancellable {
    fn get_block(&self) -> &Block;
}
