use std::fmt;

use async_trait::async_trait;

use crate::command::CommandSender;
use crate::command::dispatcher::CommandError;
use crate::command::tree::RawArgs;
use crate::server::Server;

use super::{Arg, ArgumentConsumer, ConsumedArgs, DefaultNameArgConsumer, FindArg};

/// Consumes an integer, optionally limited to an inclusive range.
///
/// Input that is not an integer does not match. An integer outside the range
/// does match, and reports [`NotInBounds`] so the executor can tell the user why.
#[derive(Clone, Default)]
pub struct BoundedNumArgumentConsumer {
    min_inclusive: Option<i32>,
    max_inclusive: Option<i32>,
    name: Option<&'static str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotInBounds {
    LowerBound { min: i32, found: i32 },
    UpperBound { max: i32, found: i32 },
}

impl fmt::Display for NotInBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowerBound { min, found } => {
                write!(f, "Integer must not be less than {min}, found {found}")
            }
            Self::UpperBound { max, found } => {
                write!(f, "Integer must not be more than {max}, found {found}")
            }
        }
    }
}

impl BoundedNumArgumentConsumer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_inclusive: None,
            max_inclusive: None,
            name: None,
        }
    }

    #[must_use]
    pub const fn min(mut self, min_inclusive: i32) -> Self {
        self.min_inclusive = Some(min_inclusive);
        self
    }

    #[must_use]
    pub const fn max(mut self, max_inclusive: i32) -> Self {
        self.max_inclusive = Some(max_inclusive);
        self
    }

    #[must_use]
    pub const fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    fn check_bounds(&self, x: i32) -> Result<i32, NotInBounds> {
        if let Some(min) = self.min_inclusive {
            if x < min {
                return Err(NotInBounds::LowerBound { min, found: x });
            }
        }
        if let Some(max) = self.max_inclusive {
            if x > max {
                return Err(NotInBounds::UpperBound { max, found: x });
            }
        }
        Ok(x)
    }
}

#[async_trait]
impl ArgumentConsumer for BoundedNumArgumentConsumer {
    async fn consume<'a>(
        &'a self,
        _sender: &CommandSender,
        _server: &'a Server,
        args: &mut RawArgs<'a>,
    ) -> Option<Arg<'a>> {
        let x = args.pop()?.parse::<i32>().ok()?;
        Some(Arg::Num(self.check_bounds(x)))
    }
}

impl DefaultNameArgConsumer for BoundedNumArgumentConsumer {
    fn default_name(&self) -> &str {
        self.name.unwrap_or("value")
    }
}

impl<'a> FindArg<'a> for BoundedNumArgumentConsumer {
    type Data = Result<i32, NotInBounds>;

    fn find_arg(args: &'a ConsumedArgs, name: &str) -> Result<Self::Data, CommandError> {
        match args.get(name) {
            Some(Arg::Num(result)) => Ok(*result),
            _ => Err(CommandError::InvalidConsumption(Some(name.to_string()))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{BoundedNumArgumentConsumer, NotInBounds};

    #[test]
    fn bounds_are_inclusive() {
        let consumer = BoundedNumArgumentConsumer::new().min(1).max(1000);
        assert_eq!(consumer.check_bounds(1), Ok(1));
        assert_eq!(consumer.check_bounds(1000), Ok(1000));
        assert_eq!(
            consumer.check_bounds(0),
            Err(NotInBounds::LowerBound { min: 1, found: 0 })
        );
        assert_eq!(
            consumer.check_bounds(1001),
            Err(NotInBounds::UpperBound {
                max: 1000,
                found: 1001
            })
        );
    }

    #[test]
    fn unbounded_accepts_anything() {
        let consumer = BoundedNumArgumentConsumer::new();
        assert_eq!(consumer.check_bounds(i32::MIN), Ok(i32::MIN));
        assert_eq!(consumer.check_bounds(i32::MAX), Ok(i32::MAX));
    }
}
