use std::{borrow::Cow, sync::Arc};

use super::{CommandTree, Node, NodeType};
use crate::command::{CommandExecutor, args::ArgumentConsumer};

impl CommandTree {
    /// Add a child [Node] to the root of this [`CommandTree`].
    #[must_use]
    pub fn then(mut self, child: NonLeafNodeBuilder) -> Self {
        self.children.push(child.build());
        self
    }

    /// provide at least one name
    pub fn new<const N: usize, D: Into<Cow<'static, str>>>(names: [&str; N], description: D) -> Self {
        assert!(N > 0);
        let names_vec = names.into_iter().map(|s| s.to_string()).collect();

        Self {
            names: names_vec,
            description: description.into(),
            children: Vec::new(),
        }
    }

    /// Executes if a command terminates at this [Node], i.e. without any arguments.
    #[must_use]
    pub fn execute(mut self, executor: impl CommandExecutor + 'static) -> Self {
        self.children.push(Node {
            node_type: NodeType::ExecuteLeaf {
                executor: Arc::new(executor),
            },
            children: Vec::new(),
        });
        self
    }
}

pub struct NonLeafNodeBuilder {
    node_type: NodeType,
    children: Vec<Node>,
}

impl NonLeafNodeBuilder {
    fn build(self) -> Node {
        Node {
            node_type: self.node_type,
            children: self.children,
        }
    }

    /// Add a child [Node] to this one.
    #[must_use]
    pub fn then(mut self, child: Self) -> Self {
        self.children.push(child.build());
        self
    }

    /// Executes if a command terminates at this [Node].
    #[must_use]
    pub fn execute(mut self, executor: impl CommandExecutor + 'static) -> Self {
        self.children.push(Node {
            node_type: NodeType::ExecuteLeaf {
                executor: Arc::new(executor),
            },
            children: Vec::new(),
        });
        self
    }
}

/// Consumes a single argument and stores it under `name`, so the executor can
/// look it up with [`crate::command::args::FindArg`].
#[must_use]
pub fn argument(name: &str, consumer: impl ArgumentConsumer + 'static) -> NonLeafNodeBuilder {
    NonLeafNodeBuilder {
        node_type: NodeType::Argument {
            name: name.to_string(),
            consumer: Arc::new(consumer),
        },
        children: Vec::new(),
    }
}
