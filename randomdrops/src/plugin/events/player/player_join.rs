use randomdrops_macros::{Event, cancellable};
use randomdrops_util::text::TextComponent;
use std::sync::Arc;

use crate::entity::player::Player;

use super::PlayerEvent;

/// An event that occurs when a player joins the game.
///
/// Cancelling it suppresses the join broadcast.
#[cancellable]
#[derive(Event, Clone)]
pub struct PlayerJoinEvent {
    /// The player who is joining the game.
    pub player: Arc<Player>,

    /// The message to display when the player joins.
    pub join_message: TextComponent,
}

impl PlayerJoinEvent {
    pub fn new(player: Arc<Player>, join_message: TextComponent) -> Self {
        Self {
            player,
            join_message,
            cancelled: false,
        }
    }
}

impl PlayerEvent for PlayerJoinEvent {
    fn get_player(&self) -> &Arc<Player> {
        &self.player
    }
}
