use std::sync::Arc;

use async_trait::async_trait;
use randomdrops_util::text::TextComponent;
use randomdrops_util::text::color::NamedColor;

use crate::command::args::bounded_num::BoundedNumArgumentConsumer;
use crate::command::args::{ConsumedArgs, FindArgDefaultName};
use crate::command::dispatcher::CommandError;
use crate::command::tree::CommandTree;
use crate::command::tree::builder::argument;
use crate::command::{CommandExecutor, CommandSender};
use crate::server::Server;

use super::DropResolver;
use super::plugin::SharedDrops;

const ARG_VALUE: &str = "value";

fn max_amount_consumer() -> BoundedNumArgumentConsumer {
    BoundedNumArgumentConsumer::new()
        .name(ARG_VALUE)
        .min(*randomdrops_config::drops::MAX_AMOUNT_RANGE.start())
        .max(*randomdrops_config::drops::MAX_AMOUNT_RANGE.end())
}

fn chance_consumer() -> BoundedNumArgumentConsumer {
    BoundedNumArgumentConsumer::new()
        .name(ARG_VALUE)
        .min(*randomdrops_config::drops::CHANCE_PERCENT_RANGE.start())
        .max(*randomdrops_config::drops::CHANCE_PERCENT_RANGE.end())
}

/// Reads the bounded `value` argument. Out of range input is reported to the
/// sender and yields `None`.
async fn bounded_value(
    consumer: &BoundedNumArgumentConsumer,
    sender: &CommandSender,
    args: &ConsumedArgs<'_>,
) -> Result<Option<i32>, CommandError> {
    match consumer.find_arg_default_name(args)? {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            sender
                .send_message(
                    TextComponent::text(format!("[RandomDrops] {err}"))
                        .color_named(NamedColor::Red),
                )
                .await;
            Ok(None)
        }
    }
}

struct StartExecutor(SharedDrops);

#[async_trait]
impl CommandExecutor for StartExecutor {
    async fn execute<'a>(
        &self,
        sender: &mut CommandSender,
        _server: &Arc<Server>,
        _args: &ConsumedArgs<'a>,
    ) -> Result<(), CommandError> {
        self.0.lock().await.settings_mut().set_enabled(true);
        log::info!("[RandomDrops] enabled by {sender}");
        sender
            .send_message(TextComponent::text("[RandomDrops] Enabled.").color_named(NamedColor::Green))
            .await;
        Ok(())
    }
}

struct StopExecutor(SharedDrops);

#[async_trait]
impl CommandExecutor for StopExecutor {
    async fn execute<'a>(
        &self,
        sender: &mut CommandSender,
        _server: &Arc<Server>,
        _args: &ConsumedArgs<'a>,
    ) -> Result<(), CommandError> {
        self.0.lock().await.settings_mut().set_enabled(false);
        log::info!("[RandomDrops] disabled by {sender}");
        sender
            .send_message(TextComponent::text("[RandomDrops] Disabled.").color_named(NamedColor::Red))
            .await;
        Ok(())
    }
}

struct MaxAmountExecutor(SharedDrops);

#[async_trait]
impl CommandExecutor for MaxAmountExecutor {
    async fn execute<'a>(
        &self,
        sender: &mut CommandSender,
        _server: &Arc<Server>,
        args: &ConsumedArgs<'a>,
    ) -> Result<(), CommandError> {
        let Some(value) = bounded_value(&max_amount_consumer(), sender, args).await? else {
            return Ok(());
        };
        self.0
            .lock()
            .await
            .settings_mut()
            .set_max_amount(value)
            .map_err(|err| CommandError::GeneralCommandIssue(err.to_string()))?;
        sender
            .send_message(TextComponent::text(format!(
                "[RandomDrops] Max amount set to {value}"
            )))
            .await;
        Ok(())
    }
}

struct ResetExecutor(SharedDrops);

#[async_trait]
impl CommandExecutor for ResetExecutor {
    async fn execute<'a>(
        &self,
        sender: &mut CommandSender,
        _server: &Arc<Server>,
        _args: &ConsumedArgs<'a>,
    ) -> Result<(), CommandError> {
        self.0.lock().await.reset();
        log::info!("[RandomDrops] drops reset by {sender}");
        sender
            .send_message(
                TextComponent::text("[RandomDrops] Drops reset.").color_named(NamedColor::Yellow),
            )
            .await;
        Ok(())
    }
}

struct MobChanceExecutor(SharedDrops);

#[async_trait]
impl CommandExecutor for MobChanceExecutor {
    async fn execute<'a>(
        &self,
        sender: &mut CommandSender,
        _server: &Arc<Server>,
        args: &ConsumedArgs<'a>,
    ) -> Result<(), CommandError> {
        let Some(value) = bounded_value(&chance_consumer(), sender, args).await? else {
            return Ok(());
        };
        let (mob, item) = {
            let mut drops = self.0.lock().await;
            let settings = drops.settings_mut();
            settings
                .set_mob_chance_percent(value)
                .map_err(|err| CommandError::GeneralCommandIssue(err.to_string()))?;
            (settings.mob_chance_percent(), settings.item_chance_percent())
        };
        sender
            .send_message(
                TextComponent::text(format!(
                    "[RandomDrops] Mob chance = {mob}%, Item chance = {item}%"
                ))
                .color_named(NamedColor::Aqua),
            )
            .await;
        Ok(())
    }
}

pub fn start_command_tree(drops: SharedDrops) -> CommandTree {
    CommandTree::new(["rd_start"], "Start randomizing block drops.").execute(StartExecutor(drops))
}

pub fn stop_command_tree(drops: SharedDrops) -> CommandTree {
    CommandTree::new(["rd_stop"], "Stop randomizing block drops.").execute(StopExecutor(drops))
}

pub fn max_amount_command_tree(drops: SharedDrops) -> CommandTree {
    CommandTree::new(
        ["rd_maxamount"],
        "Set the largest amount rolled for new drops.",
    )
    .then(argument(ARG_VALUE, max_amount_consumer()).execute(MaxAmountExecutor(drops)))
}

pub fn reset_command_tree(drops: SharedDrops) -> CommandTree {
    CommandTree::new(["rd_resetdrops"], "Forget every assigned drop.")
        .execute(ResetExecutor(drops))
}

pub fn mob_chance_command_tree(drops: SharedDrops) -> CommandTree {
    CommandTree::new(
        ["rd_mobspawnchance"],
        "Set the chance in percent that a new drop is a creature.",
    )
    .then(argument(ARG_VALUE, chance_consumer()).execute(MobChanceExecutor(drops)))
}

/// Every randomizer command, each bound to the same shared state.
pub fn command_trees(drops: &SharedDrops) -> [CommandTree; 5] {
    [
        start_command_tree(drops.clone()),
        stop_command_tree(drops.clone()),
        max_amount_command_tree(drops.clone()),
        reset_command_tree(drops.clone()),
        mob_chance_command_tree(drops.clone()),
    ]
}
