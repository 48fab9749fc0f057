use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use randomdrops_config::AdvancedConfiguration;
use randomdrops_util::{
    PermissionLvl,
    text::{TextComponent, color::NamedColor},
};
use tokio::sync::RwLock;

use crate::{
    command::{CommandSender, default_dispatcher, dispatcher::CommandDispatcher},
    entity::player::Player,
    plugin::{PluginManager, events::player::player_join::PlayerJoinEvent},
    world::World,
};

/// The in-process host: worlds, commands and the plugin event bus.
pub struct Server {
    pub worlds: RwLock<Vec<Arc<World>>>,
    pub command_dispatcher: RwLock<CommandDispatcher>,
    pub plugin_manager: PluginManager,
    default_op_level: PermissionLvl,
    log_console: bool,
    stopping: AtomicBool,
}

impl Server {
    #[must_use]
    pub fn new(config: &AdvancedConfiguration) -> Self {
        Self {
            worlds: RwLock::new(vec![Arc::new(World::new("world"))]),
            command_dispatcher: RwLock::new(default_dispatcher()),
            plugin_manager: PluginManager::new(),
            default_op_level: config.commands.default_op_level,
            log_console: config.commands.log_console,
            stopping: AtomicBool::new(false),
        }
    }

    /// The world console commands act on.
    pub async fn default_world(&self) -> Arc<World> {
        let mut worlds = self.worlds.write().await;
        if let Some(world) = worlds.first() {
            return world.clone();
        }
        let world = Arc::new(World::new("world"));
        worlds.push(world.clone());
        world
    }

    /// Puts a new player into the default world and announces the join.
    pub async fn add_player(self: &Arc<Self>, name: &str) -> Arc<Player> {
        let world = self.default_world().await;
        let player = Arc::new(Player::new(
            name.to_string(),
            world.clone(),
            self.default_op_level,
        ));
        world
            .players
            .write()
            .await
            .insert(player.name.clone(), player.clone());

        let event = self
            .plugin_manager
            .fire(
                self,
                PlayerJoinEvent::new(
                    player.clone(),
                    TextComponent::text(format!("{name} joined the game"))
                        .color_named(NamedColor::Yellow),
                ),
            )
            .await;

        if !event.cancelled {
            log::info!("{}", event.join_message.get_text());
            world.broadcast_system_message(&event.join_message).await;
        }
        player
    }

    /// Runs a command line as `sender`, replying with any error.
    pub async fn handle_command(self: &Arc<Self>, sender: &mut CommandSender, cmd: &str) {
        if self.log_console && sender.is_player() {
            log::info!("{sender} issued server command: {cmd}");
        }
        let dispatcher = self.command_dispatcher.read().await;
        dispatcher.handle_command(sender, self, cmd).await;
    }

    pub fn stop(&self) {
        log::info!("Stopping Server");
        self.stopping.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_stopping(&self) -> bool {
        self.stopping.load(Ordering::Relaxed)
    }
}
