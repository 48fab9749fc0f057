use std::collections::HashMap;

use async_trait::async_trait;
use bounded_num::NotInBounds;
use randomdrops_util::math::position::BlockPos;

use super::{CommandSender, dispatcher::CommandError, tree::RawArgs};
use crate::server::Server;

pub mod block;
pub mod bounded_num;
pub mod position_block;

/// see [`crate::command::tree::builder::argument`]
#[async_trait]
pub trait ArgumentConsumer: Sync + Send {
    /// Takes what this argument needs off the end of `args`. `None` means the
    /// input does not fit this argument, so the path is not taken.
    async fn consume<'a>(
        &'a self,
        sender: &CommandSender,
        server: &'a Server,
        args: &mut RawArgs<'a>,
    ) -> Option<Arg<'a>>;
}

pub trait DefaultNameArgConsumer: ArgumentConsumer {
    fn default_name(&self) -> &str;
}

#[derive(Clone, Debug, PartialEq)]
pub enum Arg<'a> {
    BlockPos(BlockPos),
    Block(&'a str),
    Num(Result<i32, NotInBounds>),
}

/// see [`crate::command::tree::builder::argument`] and [`crate::command::tree::CommandTree::execute`]
pub type ConsumedArgs<'a> = HashMap<&'a str, Arg<'a>>;

pub trait FindArg<'a> {
    type Data;

    fn find_arg(args: &'a ConsumedArgs, name: &str) -> Result<Self::Data, CommandError>;
}

pub(crate) trait FindArgDefaultName<'a, T> {
    fn find_arg_default_name(&self, args: &'a ConsumedArgs) -> Result<T, CommandError>;
}

impl<'a, T, C: FindArg<'a, Data = T> + DefaultNameArgConsumer> FindArgDefaultName<'a, T> for C {
    fn find_arg_default_name(&self, args: &'a ConsumedArgs) -> Result<T, CommandError> {
        C::find_arg(args, self.default_name())
    }
}
