use std::{borrow::Cow, fmt, sync::Arc};

use super::{CommandExecutor, args::ArgumentConsumer};

pub mod builder;

/// Arguments still to be consumed, in reverse order so the next one can be popped off the end.
pub type RawArgs<'a> = Vec<&'a str>;

#[derive(Clone)]
pub struct Node {
    pub(crate) node_type: NodeType,
    pub(crate) children: Vec<Node>,
}

#[derive(Clone)]
pub enum NodeType {
    ExecuteLeaf {
        executor: Arc<dyn CommandExecutor>,
    },
    Argument {
        name: String,
        consumer: Arc<dyn ArgumentConsumer>,
    },
}

/// A command and every way of invoking it.
#[derive(Clone)]
pub struct CommandTree {
    /// The first name is the command itself, the rest are aliases.
    pub names: Vec<String>,
    pub description: Cow<'static, str>,
    pub(crate) children: Vec<Node>,
}

impl CommandTree {
    /// Every root-to-leaf path that ends in an executor.
    #[must_use]
    pub fn iter_paths(&self) -> Vec<Vec<&Node>> {
        let mut paths = Vec::new();
        let mut current = Vec::new();
        for child in &self.children {
            collect_paths(child, &mut current, &mut paths);
        }
        paths
    }

    /// One usage line per path, e.g. `/rd_maxamount <value>`.
    #[must_use]
    pub fn usages(&self) -> Vec<String> {
        self.iter_paths()
            .into_iter()
            .map(|path| {
                let mut usage = format!("/{}", self.names[0]);
                for node in path {
                    match &node.node_type {
                        NodeType::Argument { name, .. } => {
                            usage.push_str(&format!(" <{name}>"));
                        }
                        NodeType::ExecuteLeaf { .. } => {}
                    }
                }
                usage
            })
            .collect()
    }
}

fn collect_paths<'a>(node: &'a Node, current: &mut Vec<&'a Node>, paths: &mut Vec<Vec<&'a Node>>) {
    current.push(node);
    if matches!(node.node_type, NodeType::ExecuteLeaf { .. }) {
        paths.push(current.clone());
    }
    for child in &node.children {
        collect_paths(child, current, paths);
    }
    current.pop();
}

impl fmt::Display for CommandTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.usages().join(" | "))
    }
}
