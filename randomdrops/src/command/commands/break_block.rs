use std::sync::Arc;

use async_trait::async_trait;
use randomdrops_util::text::TextComponent;
use randomdrops_util::text::color::NamedColor;

use crate::command::args::position_block::BlockPosArgumentConsumer;
use crate::command::args::{ConsumedArgs, FindArg};
use crate::command::dispatcher::CommandError;
use crate::command::tree::CommandTree;
use crate::command::tree::builder::argument;
use crate::command::{CommandExecutor, CommandSender};
use crate::server::Server;

const NAMES: [&str; 2] = ["breakblock", "break"];

const DESCRIPTION: &str = "Break a block as if the sender mined it.";

const ARG_BLOCK_POS: &str = "pos";

struct Executor;

#[async_trait]
impl CommandExecutor for Executor {
    async fn execute<'a>(
        &self,
        sender: &mut CommandSender,
        server: &Arc<Server>,
        args: &ConsumedArgs<'a>,
    ) -> Result<(), CommandError> {
        let pos = BlockPosArgumentConsumer::find_arg(args, ARG_BLOCK_POS)?;
        let world = sender.world(server).await;

        let block = world.get_block(&pos).await;
        if block.is_air() {
            return Err(CommandError::GeneralCommandIssue(format!(
                "There is no block at {pos}"
            )));
        }

        let message = if world.break_block(server, &pos, sender.as_player()).await {
            TextComponent::text(format!("Broke {} at {pos}", block.name))
        } else {
            TextComponent::text(format!("Breaking {} at {pos} was cancelled", block.name))
                .color_named(NamedColor::Gray)
        };
        sender.send_message(message).await;

        Ok(())
    }
}

pub fn init_command_tree() -> CommandTree {
    CommandTree::new(NAMES, DESCRIPTION)
        .then(argument(ARG_BLOCK_POS, BlockPosArgumentConsumer).execute(Executor))
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use randomdrops_config::AdvancedConfiguration;
    use randomdrops_data::{Block, Item};
    use randomdrops_util::math::position::BlockPos;

    use crate::command::CommandSender;
    use crate::server::Server;

    #[tokio::test]
    async fn console_places_and_breaks() {
        let server = Arc::new(Server::new(&AdvancedConfiguration::default()));
        let dispatcher = server.command_dispatcher.read().await;
        let mut console = CommandSender::Console;

        dispatcher
            .dispatch(&mut console, &server, "setblock 1 2 3 minecraft:stone")
            .await
            .unwrap();
        let world = server.default_world().await;
        let pos = BlockPos::new(1, 2, 3);
        assert_eq!(world.get_block(&pos).await, Block::STONE);

        dispatcher
            .dispatch(&mut console, &server, "break 1 2 3")
            .await
            .unwrap();
        assert_eq!(world.get_block(&pos).await, Block::AIR);
        assert_eq!(world.items().await[0].stack.item, Item::COBBLESTONE);

        assert!(
            dispatcher
                .dispatch(&mut console, &server, "break 1 2 3")
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn unknown_block_is_reported() {
        let server = Arc::new(Server::new(&AdvancedConfiguration::default()));
        let dispatcher = server.command_dispatcher.read().await;
        let result = dispatcher
            .dispatch(&mut CommandSender::Console, &server, "setblock 0 0 0 nothing")
            .await;
        assert_eq!(
            result,
            Err(crate::command::dispatcher::CommandError::GeneralCommandIssue(
                "Block nothing does not exist.".into()
            ))
        );
    }
}
