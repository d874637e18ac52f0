//! Fluent command builder and the compiler that turns it into nodes.

use std::rc::Rc;

use quill_types::error::{QuillError, Result};

use crate::argument::{Argument, CommandArgs};
use crate::executor::{Executor, ExecutorSlots};
use crate::node::CommandNode;
use crate::plugin::Plugin;
use crate::registry::CommandDispatcher;
use crate::sender::CommandSender;

/// Builder for one command and, recursively, its subcommands.
///
/// Every configuration method consumes and returns the builder so calls can
/// be chained. `compile` borrows the tree and can be called any number of
/// times; `register` consumes it.
#[derive(Debug)]
pub struct CommandBuilder {
    plugin: Rc<Plugin>,
    name: String,
    permission: Option<String>,
    aliases: Vec<String>,
    arguments: Vec<Rc<dyn Argument>>,
    description: Option<String>,
    usage: Option<String>,
    executors: ExecutorSlots,
    children: Vec<CommandBuilder>,
}

impl CommandBuilder {
    /// Start a command owned by `plugin`.
    ///
    /// Fails if `name` is empty or contains whitespace or ':'.
    pub fn command(plugin: &Rc<Plugin>, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            plugin: Rc::clone(plugin),
            name,
            permission: None,
            aliases: Vec::new(),
            arguments: Vec::new(),
            description: None,
            usage: None,
            executors: ExecutorSlots::default(),
            children: Vec::new(),
        })
    }

    /// Require a permission, or clear the requirement with `None` or a blank
    /// string.
    pub fn with_permission(mut self, permission: Option<&str>) -> Self {
        self.permission = permission
            .filter(|p| !p.trim().is_empty())
            .map(str::to_string);
        self
    }

    /// Replace the alias list. An empty list clears it; blank entries are
    /// dropped.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases
            .into_iter()
            .map(Into::<String>::into)
            .filter(|a| !a.trim().is_empty())
            .collect();
        self
    }

    /// Append argument descriptors after the existing ones.
    pub fn with_arguments<I>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = Rc<dyn Argument>>,
    {
        self.arguments.extend(arguments);
        self
    }

    /// Append a single argument descriptor.
    pub fn with_argument<A: Argument + 'static>(mut self, argument: A) -> Self {
        self.arguments.push(Rc::new(argument));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Override the usage line derived from arguments and subcommands.
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Executor for every caller. Takes precedence over the player and
    /// console executors.
    pub fn with_executor_any<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut dyn CommandSender, &CommandArgs) -> Result<()> + 'static,
    {
        self.executors.any = Some(Executor::new(f));
        self
    }

    /// Executor for player callers.
    pub fn with_executor_player<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut dyn CommandSender, &CommandArgs) -> Result<()> + 'static,
    {
        self.executors.player = Some(Executor::new(f));
        self
    }

    /// Executor for console callers.
    pub fn with_executor_console<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut dyn CommandSender, &CommandArgs) -> Result<()> + 'static,
    {
        self.executors.console = Some(Executor::new(f));
        self
    }

    /// Add a subcommand named `name`, configured by `configure`.
    ///
    /// The child shares this builder's plugin. Returns the parent so
    /// siblings can be chained.
    pub fn with_subcommand<F>(mut self, name: impl Into<String>, configure: F) -> Result<Self>
    where
        F: FnOnce(CommandBuilder) -> Result<CommandBuilder>,
    {
        let child = configure(CommandBuilder::command(&self.plugin, name)?)?;
        self.children.push(child);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plugin(&self) -> &Rc<Plugin> {
        &self.plugin
    }

    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn arguments(&self) -> &[Rc<dyn Argument>] {
        &self.arguments
    }

    pub fn executors(&self) -> &ExecutorSlots {
        &self.executors
    }

    pub fn children(&self) -> &[CommandBuilder] {
        &self.children
    }

    /// Compile this builder and its subtree, children first.
    pub fn compile(&self) -> CommandNode {
        let subcommands: Vec<CommandNode> = self.children.iter().map(Self::compile).collect();

        let resolution = self.executors.resolve(self.plugin.no_executor_message());
        if resolution.is_fallback() {
            log::warn!(
                "Command '{}' from {} has no executor; callers will get an error message",
                self.name,
                self.plugin.name()
            );
        }
        log::trace!(
            "Compiled '{}' ({} args, {} subcommands, executor: {})",
            self.name,
            self.arguments.len(),
            subcommands.len(),
            resolution.label()
        );

        CommandNode {
            name: self.name.clone(),
            namespace: self.plugin.name().to_string(),
            permission: self.permission.clone(),
            aliases: self.aliases.clone(),
            arguments: self.arguments.iter().map(Rc::clone).collect(),
            description: self.description.clone(),
            usage: self.usage.clone(),
            resolution,
            subcommands,
        }
    }

    /// Compile the tree and hand it to `dispatcher`.
    ///
    /// Dispatcher errors are returned unchanged.
    pub fn register(self, dispatcher: &mut dyn CommandDispatcher) -> Result<()> {
        log::debug!(
            "Registering command '{}' for {}",
            self.name,
            self.plugin.name()
        );
        dispatcher.register(self.compile())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(QuillError::InvalidCommand(
            "command name must not be empty".to_string(),
        ));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(QuillError::InvalidCommand(format!(
            "command name must not contain whitespace: {name:?}"
        )));
    }
    // ':' separates the namespace in qualified labels.
    if name.contains(':') {
        return Err(QuillError::InvalidCommand(format!(
            "command name must not contain ':': {name:?}"
        )));
    }
    Ok(())
}
