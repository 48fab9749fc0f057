use std::sync::Arc;

use crate::entity::player::Player;

pub mod player_join;

pub trait PlayerEvent: Send + Sync {
    fn get_player(&self) -> &Arc<Player>;
}
