use async_trait::async_trait;
use futures::future::join_all;
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

pub mod context;
pub mod events;

use crate::server::Server;
pub use context::Context;
pub use events::{Cancellable, Event, EventPriority};

/// Struct representing metadata for a plugin.
#[derive(Debug, Clone)]
pub struct PluginMetadata<'s> {
    /// The name of the plugin.
    pub name: &'s str,
    /// The version of the plugin.
    pub version: &'s str,
    /// The authors of the plugin.
    pub authors: &'s str,
    /// A description of the plugin.
    pub description: &'s str,
}

/// Trait representing a plugin with asynchronous lifecycle methods.
///
/// Plugins are compiled into the server and handed to
/// [`PluginManager::load_plugin`]; `on_load` is where they register their
/// commands and event handlers.
#[async_trait]
pub trait Plugin: Send + Sync + 'static {
    /// Called once when the plugin is loaded. An `Err` aborts loading.
    async fn on_load(&mut self, _context: &Context) -> Result<(), String> {
        Ok(())
    }

    /// Called when the plugin is removed from the server.
    async fn on_unload(&mut self, _context: &Context) -> Result<(), String> {
        Ok(())
    }
}

/// A trait for handling events dynamically.
#[async_trait]
pub trait DynEventHandler: Send + Sync {
    async fn handle_dyn(&self, server: &Arc<Server>, event: &(dyn Event + Send + Sync));

    async fn handle_blocking_dyn(&self, server: &Arc<Server>, event: &mut (dyn Event + Send + Sync));

    fn is_blocking(&self) -> bool;

    fn get_priority(&self) -> EventPriority;

    /// The plugin that registered this handler, `None` for the server itself.
    fn owner(&self) -> Option<&'static str>;
}

/// A trait for handling specific events.
///
/// Blocking handlers receive the event mutably and run one after another
/// before the host acts on it. Non-blocking handlers only observe it.
#[async_trait]
pub trait EventHandler<E: Event>: Send + Sync {
    async fn handle(&self, _server: &Arc<Server>, _event: &E) {}

    async fn handle_blocking(&self, _server: &Arc<Server>, _event: &mut E) {}
}

struct TypedEventHandler<E, H>
where
    E: Event + Send + Sync + 'static,
    H: EventHandler<E> + Send + Sync,
{
    handler: Arc<H>,
    priority: EventPriority,
    blocking: bool,
    owner: Option<&'static str>,
    _phantom: std::marker::PhantomData<E>,
}

#[async_trait]
impl<E, H> DynEventHandler for TypedEventHandler<E, H>
where
    E: Event + Send + Sync + 'static,
    H: EventHandler<E> + Send + Sync,
{
    async fn handle_blocking_dyn(
        &self,
        server: &Arc<Server>,
        event: &mut (dyn Event + Send + Sync),
    ) {
        if let Some(event) = event.as_any_mut().downcast_mut::<E>() {
            self.handler.handle_blocking(server, event).await;
        }
    }

    async fn handle_dyn(&self, server: &Arc<Server>, event: &(dyn Event + Send + Sync)) {
        if let Some(event) = event.as_any().downcast_ref::<E>() {
            self.handler.handle(server, event).await;
        }
    }

    fn is_blocking(&self) -> bool {
        self.blocking
    }

    fn get_priority(&self) -> EventPriority {
        self.priority.clone()
    }

    fn owner(&self) -> Option<&'static str> {
        self.owner
    }
}

pub(crate) type HandlerMap = HashMap<&'static str, Vec<Box<dyn DynEventHandler>>>;

/// Error types for plugin management
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("Plugin already loaded: {0}")]
    AlreadyLoaded(String),

    #[error("Plugin not found: {0}")]
    PluginNotFound(String),

    #[error("Plugin {name} failed to initialize: {reason}")]
    InitializationFailed { name: String, reason: String },
}

struct LoadedPlugin {
    metadata: PluginMetadata<'static>,
    instance: Box<dyn Plugin>,
}

/// Holds the loaded plugins and the handlers they registered.
#[derive(Default)]
pub struct PluginManager {
    plugins: Mutex<Vec<LoadedPlugin>>,
    handlers: Arc<RwLock<HandlerMap>>,
}

impl PluginManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load_plugin(
        &self,
        server: &Arc<Server>,
        metadata: PluginMetadata<'static>,
        mut instance: Box<dyn Plugin>,
    ) -> Result<(), ManagerError> {
        let mut plugins = self.plugins.lock().await;
        if plugins.iter().any(|p| p.metadata.name == metadata.name) {
            return Err(ManagerError::AlreadyLoaded(metadata.name.to_string()));
        }

        let context = Context::new(
            metadata.clone(),
            Arc::clone(server),
            Arc::clone(&self.handlers),
        );
        if let Err(reason) = instance.on_load(&context).await {
            if let Err(e) = instance.on_unload(&context).await {
                log::warn!("Plugin {} failed to clean up after a failed load: {e}", metadata.name);
            }
            self.remove_handlers_of(metadata.name).await;
            return Err(ManagerError::InitializationFailed {
                name: metadata.name.to_string(),
                reason,
            });
        }

        log::info!("Loaded plugin {} v{}", metadata.name, metadata.version);
        plugins.push(LoadedPlugin { metadata, instance });
        Ok(())
    }

    pub async fn unload_plugin(&self, server: &Arc<Server>, name: &str) -> Result<(), ManagerError> {
        let mut plugins = self.plugins.lock().await;
        let index = plugins
            .iter()
            .position(|p| p.metadata.name == name)
            .ok_or_else(|| ManagerError::PluginNotFound(name.to_string()))?;
        let mut plugin = plugins.remove(index);

        let context = Context::new(
            plugin.metadata.clone(),
            Arc::clone(server),
            Arc::clone(&self.handlers),
        );
        if let Err(e) = plugin.instance.on_unload(&context).await {
            log::warn!("Plugin {name} failed to unload cleanly: {e}");
        }
        self.remove_handlers_of(plugin.metadata.name).await;
        log::info!("Unloaded plugin {name}");
        Ok(())
    }

    async fn remove_handlers_of(&self, plugin: &str) {
        let mut handlers = self.handlers.write().await;
        for list in handlers.values_mut() {
            list.retain(|h| h.owner() != Some(plugin));
        }
        handlers.retain(|_, list| !list.is_empty());
    }

    pub async fn is_plugin_loaded(&self, name: &str) -> bool {
        self.plugins
            .lock()
            .await
            .iter()
            .any(|p| p.metadata.name == name)
    }

    pub async fn loaded_plugins(&self) -> Vec<PluginMetadata<'static>> {
        self.plugins
            .lock()
            .await
            .iter()
            .map(|p| p.metadata.clone())
            .collect()
    }

    /// Register an event handler owned by the server rather than a plugin
    pub async fn register<E, H>(&self, handler: Arc<H>, priority: EventPriority, blocking: bool)
    where
        E: Event + Send + Sync + 'static,
        H: EventHandler<E> + 'static,
    {
        register_handler(&self.handlers, handler, priority, blocking, None).await;
    }

    /// Fire an event to all registered handlers
    pub async fn fire<E: Event + Send + Sync + 'static>(&self, server: &Arc<Server>, mut event: E) -> E {
        let handlers = self.handlers.read().await;
        if let Some(handlers) = handlers.get(&E::get_name_static()) {
            let (blocking, non_blocking): (Vec<_>, Vec<_>) =
                handlers.iter().partition(|h| h.is_blocking());

            // Process blocking handlers first
            for handler in blocking {
                handler.handle_blocking_dyn(server, &mut event).await;
            }

            join_all(
                non_blocking
                    .into_iter()
                    .map(|h| h.handle_dyn(server, &event)),
            )
            .await;
        }
        event
    }
}

pub(crate) async fn register_handler<E, H>(
    handlers: &RwLock<HandlerMap>,
    handler: Arc<H>,
    priority: EventPriority,
    blocking: bool,
    owner: Option<&'static str>,
) where
    E: Event + Send + Sync + 'static,
    H: EventHandler<E> + 'static,
{
    let mut handlers = handlers.write().await;
    let typed_handler = TypedEventHandler {
        handler,
        priority,
        blocking,
        owner,
        _phantom: std::marker::PhantomData,
    };

    let handlers_vec = handlers.entry(E::get_name_static()).or_default();
    handlers_vec.push(Box::new(typed_handler));
    // Lowest runs first so higher priorities get the last word
    handlers_vec.sort_by_key(|h| std::cmp::Reverse(h.get_priority()));
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use async_trait::async_trait;
    use randomdrops_config::AdvancedConfiguration;
    use tokio::sync::Mutex;

    use super::{Cancellable, Context, EventHandler, EventPriority, ManagerError, Plugin, PluginMetadata};
    use crate::{plugin::events::player::player_join::PlayerJoinEvent, server::Server};

    const METADATA: PluginMetadata<'static> = PluginMetadata {
        name: "recorder",
        version: "0.0.1",
        authors: "tests",
        description: "records handler order",
    };

    struct Recorder {
        tag: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
        cancel: bool,
    }

    #[async_trait]
    impl EventHandler<PlayerJoinEvent> for Recorder {
        async fn handle_blocking(&self, _server: &Arc<Server>, event: &mut PlayerJoinEvent) {
            self.log.lock().await.push(self.tag);
            if self.cancel {
                event.set_cancelled(true);
            }
        }

        async fn handle(&self, _server: &Arc<Server>, _event: &PlayerJoinEvent) {
            self.log.lock().await.push(self.tag);
        }
    }

    struct FailingPlugin {
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Plugin for FailingPlugin {
        async fn on_load(&mut self, context: &Context) -> Result<(), String> {
            context
                .register_event::<PlayerJoinEvent, _>(
                    Arc::new(Recorder {
                        tag: "half-loaded",
                        log: self.log.clone(),
                        cancel: false,
                    }),
                    EventPriority::Normal,
                    true,
                )
                .await;
            Err("no".to_string())
        }
    }

    struct ListeningPlugin {
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Plugin for ListeningPlugin {
        async fn on_load(&mut self, context: &Context) -> Result<(), String> {
            context
                .register_event::<PlayerJoinEvent, _>(
                    Arc::new(Recorder {
                        tag: "plugin",
                        log: self.log.clone(),
                        cancel: false,
                    }),
                    EventPriority::Normal,
                    true,
                )
                .await;
            Ok(())
        }
    }

    struct EmptyPlugin;

    impl Plugin for EmptyPlugin {}

    #[tokio::test]
    async fn blocking_handlers_run_lowest_priority_first() {
        let server = Arc::new(Server::new(&AdvancedConfiguration::default()));
        let log = Arc::new(Mutex::new(Vec::new()));
        let manager = &server.plugin_manager;

        for (tag, priority) in [
            ("highest", EventPriority::Highest),
            ("lowest", EventPriority::Lowest),
            ("normal", EventPriority::Normal),
        ] {
            manager
                .register::<PlayerJoinEvent, _>(
                    Arc::new(Recorder {
                        tag,
                        log: log.clone(),
                        cancel: tag == "normal",
                    }),
                    priority,
                    true,
                )
                .await;
        }

        let player = server.add_player("Steve").await;
        assert_eq!(*log.lock().await, vec!["lowest", "normal", "highest"]);
        // the normal handler cancelled the join broadcast
        assert!(player.received_messages().await.is_empty());
    }

    #[tokio::test]
    async fn non_blocking_handlers_observe() {
        let server = Arc::new(Server::new(&AdvancedConfiguration::default()));
        let log = Arc::new(Mutex::new(Vec::new()));
        server
            .plugin_manager
            .register::<PlayerJoinEvent, _>(
                Arc::new(Recorder {
                    tag: "observer",
                    log: log.clone(),
                    cancel: false,
                }),
                EventPriority::Normal,
                false,
            )
            .await;

        server.add_player("Alex").await;
        assert_eq!(*log.lock().await, vec!["observer"]);
    }

    #[tokio::test]
    async fn failed_load_is_reported_and_not_kept() {
        let server = Arc::new(Server::new(&AdvancedConfiguration::default()));
        let log = Arc::new(Mutex::new(Vec::new()));
        let result = server
            .plugin_manager
            .load_plugin(&server, METADATA, Box::new(FailingPlugin { log: log.clone() }))
            .await;
        assert!(matches!(
            result,
            Err(ManagerError::InitializationFailed { .. })
        ));
        assert!(!server.plugin_manager.is_plugin_loaded("recorder").await);

        // handlers registered before the failure are gone too
        server.add_player("Steve").await;
        assert!(log.lock().await.is_empty());
    }

    #[tokio::test]
    async fn unloading_removes_only_that_plugins_handlers() {
        let server = Arc::new(Server::new(&AdvancedConfiguration::default()));
        let log = Arc::new(Mutex::new(Vec::new()));
        let manager = &server.plugin_manager;
        manager
            .register::<PlayerJoinEvent, _>(
                Arc::new(Recorder {
                    tag: "server",
                    log: log.clone(),
                    cancel: false,
                }),
                EventPriority::Normal,
                true,
            )
            .await;
        manager
            .load_plugin(&server, METADATA, Box::new(ListeningPlugin { log: log.clone() }))
            .await
            .unwrap();

        server.add_player("Steve").await;
        assert_eq!(log.lock().await.len(), 2);

        manager.unload_plugin(&server, "recorder").await.unwrap();
        log.lock().await.clear();
        server.add_player("Alex").await;
        assert_eq!(*log.lock().await, vec!["server"]);
    }

    #[tokio::test]
    async fn plugins_load_once_and_unload() {
        let server = Arc::new(Server::new(&AdvancedConfiguration::default()));
        let manager = &server.plugin_manager;
        manager
            .load_plugin(&server, METADATA, Box::new(EmptyPlugin))
            .await
            .unwrap();
        assert!(matches!(
            manager.load_plugin(&server, METADATA, Box::new(EmptyPlugin)).await,
            Err(ManagerError::AlreadyLoaded(_))
        ));
        assert_eq!(manager.loaded_plugins().await.len(), 1);

        manager.unload_plugin(&server, "recorder").await.unwrap();
        assert!(!manager.is_plugin_loaded("recorder").await);
        assert!(matches!(
            manager.unload_plugin(&server, "recorder").await,
            Err(ManagerError::PluginNotFound(_))
        ));
    }
}
