use std::fmt;
use std::sync::Arc;

use crate::command::dispatcher::CommandDispatcher;
use crate::entity::player::Player;
use crate::server::Server;
use crate::world::World;
use args::ConsumedArgs;
use async_trait::async_trait;
use commands::{break_block, setblock, stop};
use dispatcher::CommandError;
use randomdrops_util::math::vector3::Vector3;
use randomdrops_util::permission::PermissionLvl;
use randomdrops_util::text::TextComponent;

pub mod args;
mod commands;
pub mod dispatcher;
pub mod tree;

pub enum CommandSender {
    Console,
    Player(Arc<Player>),
}

impl fmt::Display for CommandSender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CommandSender::Console => "Server",
                CommandSender::Player(p) => &p.name,
            }
        )
    }
}

impl CommandSender {
    pub async fn send_message(&self, text: TextComponent) {
        match self {
            CommandSender::Console => log::info!("{}", text.to_pretty_console()),
            CommandSender::Player(c) => c.send_system_message(&text).await,
        }
    }

    #[must_use]
    pub const fn is_player(&self) -> bool {
        matches!(self, CommandSender::Player(_))
    }

    #[must_use]
    pub fn as_player(&self) -> Option<Arc<Player>> {
        match self {
            CommandSender::Player(player) => Some(player.clone()),
            CommandSender::Console => None,
        }
    }

    /// prefer using `has_permission_lvl(lvl)`
    #[must_use]
    pub fn permission_lvl(&self) -> PermissionLvl {
        match self {
            CommandSender::Console => PermissionLvl::Four,
            CommandSender::Player(p) => p.permission_lvl.load(),
        }
    }

    #[must_use]
    pub fn has_permission_lvl(&self, lvl: PermissionLvl) -> bool {
        match self {
            CommandSender::Console => true,
            CommandSender::Player(p) => p.permission_lvl.load().ge(&lvl),
        }
    }

    #[must_use]
    pub fn position(&self) -> Option<Vector3<f64>> {
        match self {
            CommandSender::Console => None,
            CommandSender::Player(p) => Some(p.pos.load()),
        }
    }

    /// The sender's world, or the server's default world for the console.
    pub async fn world(&self, server: &Server) -> Arc<World> {
        match self {
            CommandSender::Console => server.default_world().await,
            CommandSender::Player(p) => p.world.clone(),
        }
    }
}

#[must_use]
pub fn default_dispatcher() -> CommandDispatcher {
    let mut dispatcher = CommandDispatcher::default();

    dispatcher.register(setblock::init_command_tree(), PermissionLvl::Two);
    dispatcher.register(break_block::init_command_tree(), PermissionLvl::Two);
    dispatcher.register(stop::init_command_tree(), PermissionLvl::Four);

    dispatcher
}

#[async_trait]
pub trait CommandExecutor: Sync + Send {
    async fn execute<'a>(
        &self,
        sender: &mut CommandSender,
        server: &Arc<Server>,
        args: &ConsumedArgs<'a>,
    ) -> Result<(), CommandError>;
}
