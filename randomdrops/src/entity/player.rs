use std::collections::VecDeque;
use std::sync::Arc;

use crossbeam::atomic::AtomicCell;
use randomdrops_util::{PermissionLvl, math::vector3::Vector3, text::TextComponent};
use tokio::sync::Mutex;

use crate::world::World;

/// How many system messages a player keeps before the oldest are dropped.
pub const INBOX_CAPACITY: usize = 100;

pub struct Player {
    pub name: String,
    pub permission_lvl: AtomicCell<PermissionLvl>,
    pub world: Arc<World>,
    pub pos: AtomicCell<Vector3<f64>>,
    /// The latest system messages sent to this player, oldest first.
    inbox: Mutex<VecDeque<TextComponent>>,
}

impl Player {
    #[must_use]
    pub fn new(name: String, world: Arc<World>, permission_lvl: PermissionLvl) -> Self {
        Self {
            name,
            permission_lvl: AtomicCell::new(permission_lvl),
            world,
            pos: AtomicCell::new(Vector3::new(0.5, 64.0, 0.5)),
            inbox: Mutex::new(VecDeque::with_capacity(INBOX_CAPACITY)),
        }
    }

    pub async fn send_system_message(&self, text: &TextComponent) {
        log::debug!("[{}] {}", self.name, text.get_text());
        let mut inbox = self.inbox.lock().await;
        if inbox.len() == INBOX_CAPACITY {
            inbox.pop_front();
        }
        inbox.push_back(text.clone());
    }

    pub async fn received_messages(&self) -> Vec<TextComponent> {
        self.inbox.lock().await.iter().cloned().collect()
    }

    pub fn set_permission_lvl(&self, lvl: PermissionLvl) {
        self.permission_lvl.store(lvl);
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use randomdrops_util::{PermissionLvl, text::TextComponent};

    use super::{INBOX_CAPACITY, Player};
    use crate::world::World;

    #[tokio::test]
    async fn inbox_keeps_only_the_latest_messages() {
        let player = Player::new(
            "Steve".to_string(),
            Arc::new(World::new("world")),
            PermissionLvl::Zero,
        );
        for i in 0..INBOX_CAPACITY + 5 {
            player
                .send_system_message(&TextComponent::text(i.to_string()))
                .await;
        }
        let messages = player.received_messages().await;
        assert_eq!(messages.len(), INBOX_CAPACITY);
        assert_eq!(messages[0].get_text(), "5");
        assert_eq!(
            messages[INBOX_CAPACITY - 1].get_text(),
            (INBOX_CAPACITY + 4).to_string()
        );
    }
}
