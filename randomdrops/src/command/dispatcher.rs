use std::collections::HashMap;
use std::sync::Arc;

use randomdrops_util::permission::PermissionLvl;
use randomdrops_util::text::TextComponent;
use randomdrops_util::text::color::NamedColor;

use super::args::ConsumedArgs;

use crate::command::CommandSender;
use crate::command::dispatcher::CommandError::{
    GeneralCommandIssue, InvalidConsumption, InvalidRequirement, PermissionDenied,
};
use crate::command::tree::{CommandTree, Node, NodeType, RawArgs};
use crate::server::Server;

#[derive(Debug, PartialEq, Eq)]
pub enum CommandError {
    /// This error means that there was an error while parsing a previously consumed argument.
    /// That only happens when consumption is wrongly implemented, as it should ensure parsing may
    /// never fail.
    InvalidConsumption(Option<String>),

    /// Return this if the sender is not of the kind an executor needs.
    InvalidRequirement,

    PermissionDenied,

    GeneralCommandIssue(String),
}

impl CommandError {
    /// The text shown to the sender. Internal errors are logged and replaced by a generic line.
    #[must_use]
    pub fn into_message(self, cmd: &str) -> String {
        match self {
            InvalidConsumption(s) => {
                log::error!(
                    "Error while parsing command \"{cmd}\": {s:?} was consumed, but couldn't be parsed"
                );
                "Internal error (See logs for details)".into()
            }
            InvalidRequirement => {
                log::error!(
                    "Error while parsing command \"{cmd}\": a requirement that was expected was not met."
                );
                "Internal error (See logs for details)".into()
            }
            PermissionDenied => {
                log::warn!("Permission denied for command \"{cmd}\"");
                "I'm sorry, but you do not have permission to perform this command. Please contact the server administrator if you believe this is an error.".into()
            }
            GeneralCommandIssue(s) => s,
        }
    }
}

pub enum Command {
    Tree(CommandTree),
    Alias(String),
}

/// Stores registered [`CommandTree`]s and dispatches commands to them.
#[derive(Default)]
pub struct CommandDispatcher {
    pub(crate) commands: HashMap<String, Command>,
    pub(crate) permissions: HashMap<String, PermissionLvl>,
}

impl CommandDispatcher {
    /// Runs `cmd` and reports any failure back to the sender in red.
    pub async fn handle_command<'a>(
        &'a self,
        sender: &mut CommandSender,
        server: &'a Arc<Server>,
        cmd: &'a str,
    ) {
        if let Err(e) = self.dispatch(sender, server, cmd).await {
            let message = e.into_message(cmd);
            sender
                .send_message(TextComponent::text(message).color_named(NamedColor::Red))
                .await;
        }
    }

    pub(crate) fn split_parts(cmd: &str) -> Result<(&str, RawArgs<'_>), CommandError> {
        let cmd = cmd.trim();
        let cmd = cmd.strip_prefix('/').unwrap_or(cmd);
        let mut parts = cmd.split_whitespace();
        let Some(key) = parts.next() else {
            return Err(GeneralCommandIssue("Empty Command".to_string()));
        };
        Ok((key, parts.rev().collect()))
    }

    /// Execute a command using its corresponding [`CommandTree`].
    pub(crate) async fn dispatch<'a>(
        &'a self,
        src: &mut CommandSender,
        server: &'a Arc<Server>,
        cmd: &'a str,
    ) -> Result<(), CommandError> {
        let (key, raw_args) = Self::split_parts(cmd)?;

        if !self.commands.contains_key(key) {
            return Err(GeneralCommandIssue(format!("Command {key} does not exist")));
        }

        let Some(permission) = self.permissions.get(key) else {
            return Err(GeneralCommandIssue(
                "Permission for Command not found".to_string(),
            ));
        };

        if !src.has_permission_lvl(*permission) {
            return Err(PermissionDenied);
        }

        let tree = self.get_tree(key)?;

        // try paths until fitting path is found
        for path in tree.iter_paths() {
            if Self::try_is_fitting_path(src, server, &path, &mut raw_args.clone()).await? {
                return Ok(());
            }
        }
        Err(GeneralCommandIssue(format!(
            "Invalid Syntax. Usage: {tree}"
        )))
    }

    pub(crate) fn get_tree<'a>(&'a self, key: &str) -> Result<&'a CommandTree, CommandError> {
        let command = self
            .commands
            .get(key)
            .ok_or(GeneralCommandIssue("Command not found".to_string()))?;

        match command {
            Command::Tree(tree) => Ok(tree),
            Command::Alias(target) => {
                let Some(Command::Tree(tree)) = self.commands.get(target) else {
                    log::error!(
                        "Error while parsing command alias \"{key}\": pointing to \"{target}\" which is not a valid tree"
                    );
                    return Err(GeneralCommandIssue(
                        "Internal Error (See logs for details)".into(),
                    ));
                };
                Ok(tree)
            }
        }
    }

    #[must_use]
    pub fn get_permission_lvl(&self, key: &str) -> Option<PermissionLvl> {
        self.permissions.get(key).copied()
    }

    async fn try_is_fitting_path<'a>(
        src: &mut CommandSender,
        server: &'a Arc<Server>,
        path: &[&'a Node],
        raw_args: &mut RawArgs<'a>,
    ) -> Result<bool, CommandError> {
        let mut parsed_args: ConsumedArgs = HashMap::new();

        for node in path {
            match &node.node_type {
                NodeType::ExecuteLeaf { executor } => {
                    return if raw_args.is_empty() {
                        executor.execute(src, server, &parsed_args).await?;
                        Ok(true)
                    } else {
                        log::debug!(
                            "Error while parsing command: {raw_args:?} was not consumed, but should have been"
                        );
                        Ok(false)
                    };
                }
                NodeType::Argument { consumer, name } => {
                    if let Some(consumed) = consumer.consume(src, server, raw_args).await {
                        parsed_args.insert(name, consumed);
                    } else {
                        log::debug!(
                            "Error while parsing command: {raw_args:?}: cannot parse argument {name}"
                        );
                        return Ok(false);
                    }
                }
            }
        }

        log::debug!(
            "Error while parsing command: {raw_args:?} was not consumed, but should have been"
        );
        Ok(false)
    }

    /// Register a command with the dispatcher. Later names become aliases of the first.
    pub fn register(&mut self, tree: CommandTree, permission: PermissionLvl) {
        let mut names = tree.names.iter();

        let Some(primary_name) = names.next().cloned() else {
            log::warn!("Refusing to register a command without a name");
            return;
        };

        for name in names {
            self.commands
                .insert(name.to_string(), Command::Alias(primary_name.clone()));
            self.permissions.insert(name.to_string(), permission);
        }

        self.permissions.insert(primary_name.clone(), permission);
        self.commands.insert(primary_name, Command::Tree(tree));
    }

    /// Remove a command from the dispatcher by its primary name.
    pub fn unregister(&mut self, name: &str) {
        let mut to_remove = Vec::new();
        for (key, value) in &self.commands {
            if key == name {
                to_remove.push(key.clone());
            } else if let Command::Alias(target) = value {
                if target == name {
                    to_remove.push(key.clone());
                }
            }
        }

        for key in to_remove {
            self.commands.remove(&key);
            self.permissions.remove(&key);
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use async_trait::async_trait;
    use randomdrops_config::AdvancedConfiguration;
    use randomdrops_util::permission::PermissionLvl;
    use tokio::sync::Mutex;

    use super::{CommandDispatcher, CommandError};
    use crate::command::args::bounded_num::BoundedNumArgumentConsumer;
    use crate::command::args::{ConsumedArgs, FindArg};
    use crate::command::tree::CommandTree;
    use crate::command::tree::builder::argument;
    use crate::command::{CommandExecutor, CommandSender, default_dispatcher};
    use crate::server::Server;

    struct Record(Arc<Mutex<Vec<i32>>>);

    #[async_trait]
    impl CommandExecutor for Record {
        async fn execute<'a>(
            &self,
            _sender: &mut CommandSender,
            _server: &Arc<Server>,
            args: &ConsumedArgs<'a>,
        ) -> Result<(), CommandError> {
            let value = match BoundedNumArgumentConsumer::find_arg(args, "n") {
                Ok(Ok(value)) => value,
                Ok(Err(_)) => return Err(CommandError::GeneralCommandIssue("bounds".into())),
                Err(_) => -1,
            };
            self.0.lock().await.push(value);
            Ok(())
        }
    }

    fn dispatcher_with_record(seen: &Arc<Mutex<Vec<i32>>>) -> CommandDispatcher {
        let mut dispatcher = CommandDispatcher::default();
        let tree = CommandTree::new(["record", "rec"], "records a number")
            .execute(Record(seen.clone()))
            .then(
                argument("n", BoundedNumArgumentConsumer::new().min(0).max(10))
                    .execute(Record(seen.clone())),
            );
        dispatcher.register(tree, PermissionLvl::Two);
        dispatcher
    }

    #[test]
    fn test_dynamic_command() {
        let mut dispatcher = default_dispatcher();
        let tree = CommandTree::new(["test"], "test_desc");
        dispatcher.register(tree, PermissionLvl::Zero);
        assert_eq!(dispatcher.get_permission_lvl("test"), Some(PermissionLvl::Zero));
        dispatcher.unregister("test");
        assert!(dispatcher.get_tree("test").is_err());
    }

    #[test]
    fn split_strips_slash_and_reverses() {
        let (key, args) = CommandDispatcher::split_parts("/rd_maxamount  5 6").unwrap();
        assert_eq!(key, "rd_maxamount");
        assert_eq!(args, vec!["6", "5"]);
        assert!(CommandDispatcher::split_parts("   ").is_err());
    }

    #[tokio::test]
    async fn paths_and_aliases() {
        let server = Arc::new(Server::new(&AdvancedConfiguration::default()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = dispatcher_with_record(&seen);
        let mut console = CommandSender::Console;

        dispatcher.dispatch(&mut console, &server, "record").await.unwrap();
        dispatcher.dispatch(&mut console, &server, "/rec 7").await.unwrap();
        assert_eq!(*seen.lock().await, vec![-1, 7]);

        assert_eq!(
            dispatcher.dispatch(&mut console, &server, "record 11").await,
            Err(CommandError::GeneralCommandIssue("bounds".into()))
        );
        assert_eq!(
            dispatcher.dispatch(&mut console, &server, "record x").await,
            Err(CommandError::GeneralCommandIssue(
                "Invalid Syntax. Usage: /record | /record <n>".into()
            ))
        );
        assert_eq!(
            dispatcher.dispatch(&mut console, &server, "nope").await,
            Err(CommandError::GeneralCommandIssue(
                "Command nope does not exist".into()
            ))
        );
    }

    #[tokio::test]
    async fn permission_is_checked_before_running() {
        let server = Arc::new(Server::new(&AdvancedConfiguration::default()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = dispatcher_with_record(&seen);
        let player = server.add_player("Steve").await;
        player.set_permission_lvl(PermissionLvl::Zero);
        let mut sender = CommandSender::Player(player.clone());

        assert_eq!(
            dispatcher.dispatch(&mut sender, &server, "record 1").await,
            Err(CommandError::PermissionDenied)
        );
        assert!(seen.lock().await.is_empty());

        dispatcher.handle_command(&mut sender, &server, "record 1").await;
        let last = player.received_messages().await.pop().unwrap();
        assert!(last.get_text().starts_with("I'm sorry"));
    }
}
