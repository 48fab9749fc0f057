use async_trait::async_trait;
use randomdrops_data::Block;

use crate::{command::dispatcher::CommandError, server::Server};

use super::{
    super::{CommandSender, tree::RawArgs},
    Arg, ArgumentConsumer, ConsumedArgs, DefaultNameArgConsumer, FindArg,
};

pub struct BlockArgumentConsumer;

#[async_trait]
impl ArgumentConsumer for BlockArgumentConsumer {
    async fn consume<'a>(
        &'a self,
        _sender: &CommandSender,
        _server: &'a Server,
        args: &mut RawArgs<'a>,
    ) -> Option<Arg<'a>> {
        let s = args.pop()?;
        Some(Arg::Block(s))
    }
}

impl DefaultNameArgConsumer for BlockArgumentConsumer {
    fn default_name(&self) -> &'static str {
        "block"
    }
}

impl<'a> FindArg<'a> for BlockArgumentConsumer {
    type Data = Block;

    fn find_arg(args: &'a ConsumedArgs, name: &str) -> Result<Self::Data, CommandError> {
        match args.get(name) {
            Some(Arg::Block(name)) => Block::from_registry_key(name).ok_or_else(|| {
                CommandError::GeneralCommandIssue(format!("Block {name} does not exist."))
            }),
            _ => Err(CommandError::InvalidConsumption(Some(name.to_string()))),
        }
    }
}
