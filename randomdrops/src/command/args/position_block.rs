use async_trait::async_trait;
use randomdrops_util::math::position::BlockPos;

use crate::command::CommandSender;
use crate::command::dispatcher::CommandError;
use crate::command::tree::RawArgs;
use crate::server::Server;

use super::{Arg, ArgumentConsumer, ConsumedArgs, DefaultNameArgConsumer, FindArg};

/// Consumes three block coordinates. Each one is either absolute (`12`) or
/// relative to the sender (`~`, `~-3`); the console has no position, so
/// relative coordinates never match for it.
pub struct BlockPosArgumentConsumer;

#[async_trait]
impl ArgumentConsumer for BlockPosArgumentConsumer {
    async fn consume<'a>(
        &'a self,
        sender: &CommandSender,
        _server: &'a Server,
        args: &mut RawArgs<'a>,
    ) -> Option<Arg<'a>> {
        let origin = sender
            .position()
            .map(|pos| BlockPos::floored(pos.x, pos.y, pos.z));
        let x = parse_coordinate(args.pop()?, origin.map(|o| o.0.x))?;
        let y = parse_coordinate(args.pop()?, origin.map(|o| o.0.y))?;
        let z = parse_coordinate(args.pop()?, origin.map(|o| o.0.z))?;
        Some(Arg::BlockPos(BlockPos::new(x, y, z)))
    }
}

fn parse_coordinate(s: &str, origin: Option<i32>) -> Option<i32> {
    match s.strip_prefix('~') {
        Some("") => origin,
        Some(offset) => origin?.checked_add(offset.parse().ok()?),
        None => s.parse().ok(),
    }
}

impl DefaultNameArgConsumer for BlockPosArgumentConsumer {
    fn default_name(&self) -> &'static str {
        "pos"
    }
}

impl<'a> FindArg<'a> for BlockPosArgumentConsumer {
    type Data = BlockPos;

    fn find_arg(args: &'a ConsumedArgs, name: &str) -> Result<Self::Data, CommandError> {
        match args.get(name) {
            Some(Arg::BlockPos(data)) => Ok(*data),
            _ => Err(CommandError::InvalidConsumption(Some(name.to_string()))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::parse_coordinate;

    #[test]
    fn absolute_and_relative() {
        assert_eq!(parse_coordinate("12", None), Some(12));
        assert_eq!(parse_coordinate("-7", Some(3)), Some(-7));
        assert_eq!(parse_coordinate("~", Some(3)), Some(3));
        assert_eq!(parse_coordinate("~-5", Some(3)), Some(-2));
        assert_eq!(parse_coordinate("~2", None), None);
        assert_eq!(parse_coordinate("x", Some(1)), None);
    }
}
