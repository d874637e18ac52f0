//! Compiled, immutable command nodes.

use std::rc::Rc;

use serde::Serialize;

use quill_types::error::Result;

use crate::argument::{Argument, CommandArgs};
use crate::executor::Resolution;
use crate::sender::CommandSender;

/// A registration-ready command, produced by `CommandBuilder::compile`.
#[derive(Debug, Clone)]
pub struct CommandNode {
    pub(crate) name: String,
    pub(crate) namespace: String,
    pub(crate) permission: Option<String>,
    pub(crate) aliases: Vec<String>,
    pub(crate) arguments: Vec<Rc<dyn Argument>>,
    pub(crate) description: Option<String>,
    pub(crate) usage: Option<String>,
    pub(crate) resolution: Resolution,
    pub(crate) subcommands: Vec<CommandNode>,
}

impl CommandNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the owning plugin.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Argument descriptors in positional order.
    pub fn arguments(&self) -> &[Rc<dyn Argument>] {
        &self.arguments
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Explicit usage text, or one derived from the arguments and subcommands.
    pub fn usage(&self) -> String {
        if let Some(usage) = &self.usage {
            return usage.clone();
        }
        let mut out = self.name.clone();
        for arg in &self.arguments {
            out.push_str(&format!(" <{}>", arg.node_name()));
        }
        if !self.subcommands.is_empty() {
            let names: Vec<&str> = self.subcommands.iter().map(|s| s.name()).collect();
            out.push_str(&format!(" <{}>", names.join("|")));
        }
        out
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Compiled children in declaration order.
    pub fn subcommands(&self) -> &[CommandNode] {
        &self.subcommands
    }

    /// `namespace:name`, the label that never collides across plugins.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.namespace, self.name)
    }

    /// Whether `label` names this node, by name or alias, ignoring ASCII case.
    pub fn matches(&self, label: &str) -> bool {
        self.name.eq_ignore_ascii_case(label)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(label))
    }

    /// First subcommand matching `label`.
    pub fn subcommand(&self, label: &str) -> Option<&CommandNode> {
        self.subcommands.iter().find(|s| s.matches(label))
    }

    /// Run this node's handler for `sender`.
    pub fn execute(&self, sender: &mut dyn CommandSender, args: &CommandArgs) -> Result<()> {
        self.resolution.invoke(&self.name, sender, args)
    }

    /// Serializable description of this node and its subtree.
    pub fn summary(&self) -> NodeSummary {
        NodeSummary {
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            permission: self.permission.clone(),
            aliases: self.aliases.clone(),
            description: self.description.clone(),
            usage: self.usage(),
            arguments: self
                .arguments
                .iter()
                .map(|a| ArgumentSummary {
                    name: a.node_name().to_string(),
                    kind: a.type_name().to_string(),
                })
                .collect(),
            executor: self.resolution.label().to_string(),
            subcommands: self.subcommands.iter().map(CommandNode::summary).collect(),
        }
    }

    /// Pretty-printed JSON of `summary()`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.summary())?)
    }
}

impl PartialEq for CommandNode {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.namespace == other.namespace
            && self.permission == other.permission
            && self.aliases == other.aliases
            && self.arguments.len() == other.arguments.len()
            && self
                .arguments
                .iter()
                .zip(&other.arguments)
                .all(|(a, b)| Rc::ptr_eq(a, b))
            && self.description == other.description
            && self.usage == other.usage
            && self.resolution == other.resolution
            && self.subcommands == other.subcommands
    }
}

/// Serializable view of a compiled node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSummary {
    pub name: String,
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub usage: String,
    pub arguments: Vec<ArgumentSummary>,
    /// Which executors are attached ("any", "player", "console",
    /// "player+console" or "none").
    pub executor: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<NodeSummary>,
}

/// Serializable view of one argument descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}
