use std::sync::Arc;

use randomdrops_util::PermissionLvl;
use tokio::sync::RwLock;

use crate::{
    command::tree::CommandTree,
    plugin::{EventHandler, HandlerMap, register_handler},
    server::Server,
};

use super::{Event, EventPriority, PluginMetadata};

/// What a plugin gets to see of the server while it is being loaded.
pub struct Context {
    metadata: PluginMetadata<'static>,
    pub server: Arc<Server>,
    handlers: Arc<RwLock<HandlerMap>>,
}

impl Context {
    #[must_use]
    pub fn new(
        metadata: PluginMetadata<'static>,
        server: Arc<Server>,
        handlers: Arc<RwLock<HandlerMap>>,
    ) -> Self {
        Self {
            metadata,
            server,
            handlers,
        }
    }

    #[must_use]
    pub fn metadata(&self) -> &PluginMetadata<'static> {
        &self.metadata
    }

    /// Registers a command with the server.
    pub async fn register_command(&self, tree: CommandTree, permission: PermissionLvl) {
        let mut dispatcher_lock = self.server.command_dispatcher.write().await;
        dispatcher_lock.register(tree, permission);
    }

    pub async fn unregister_command(&self, name: &str) {
        let mut dispatcher_lock = self.server.command_dispatcher.write().await;
        dispatcher_lock.unregister(name);
    }

    /// Registers an event handler for a specific event type.
    pub async fn register_event<E: Event + 'static, H>(
        &self,
        handler: Arc<H>,
        priority: EventPriority,
        blocking: bool,
    ) where
        H: EventHandler<E> + 'static,
    {
        register_handler(
            &self.handlers,
            handler,
            priority,
            blocking,
            Some(self.metadata.name),
        )
        .await;
    }
}
