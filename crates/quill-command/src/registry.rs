//! Registration seam and an in-memory command registry.
//!
//! `CommandDispatcher` is what `CommandBuilder::register` talks to. Real
//! dispatch engines implement it; `CommandRegistry` is a small in-process
//! implementation that stores root nodes and walks an already-split label
//! path down to the node to execute.

use std::collections::HashMap;

use quill_types::error::{QuillError, Result};

use crate::argument::CommandArgs;
use crate::node::CommandNode;
use crate::sender::CommandSender;

/// Something that can make a compiled command live.
pub trait CommandDispatcher {
    /// Accept a compiled root node.
    fn register(&mut self, node: CommandNode) -> Result<()>;
}

/// Registry of compiled root commands.
///
/// Labels (names, aliases, and `namespace:name`) are case-insensitive.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandNode>,
    labels: HashMap<String, String>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a root command by name, alias, or `namespace:name`.
    pub fn get(&self, label: &str) -> Option<&CommandNode> {
        let key = self.labels.get(&label.to_ascii_lowercase())?;
        self.commands.get(key)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Root commands as `(name, description)`, sorted by name.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        let mut cmds: Vec<(&str, &str)> = self
            .commands
            .values()
            .map(|c| (c.name(), c.description().unwrap_or("")))
            .collect();
        cmds.sort_by_key(|(name, _)| *name);
        cmds
    }

    /// Execute the node reached by following `path` from the roots.
    ///
    /// `path[0]` selects a root; each further label selects a subcommand of
    /// the previous node.
    pub fn dispatch(
        &self,
        path: &[&str],
        sender: &mut dyn CommandSender,
        args: &CommandArgs,
    ) -> Result<()> {
        let Some((first, rest)) = path.split_first() else {
            return Err(QuillError::Command("no command given".to_string()));
        };
        let mut node = self
            .get(first)
            .ok_or_else(|| QuillError::Command(format!("unknown command: {first}")))?;
        for label in rest {
            node = node.subcommand(label).ok_or_else(|| {
                QuillError::Command(format!(
                    "unknown subcommand '{label}' for '{}'",
                    node.name()
                ))
            })?;
        }
        log::debug!("{} runs '{}'", sender.name(), path.join(" "));
        node.execute(sender, args)
    }
}

impl CommandDispatcher for CommandRegistry {
    /// Fails if the node's name or any alias is already taken.
    fn register(&mut self, node: CommandNode) -> Result<()> {
        let key = node.name().to_ascii_lowercase();
        let mut labels = vec![key.clone(), node.qualified_name().to_ascii_lowercase()];
        for alias in node.aliases() {
            let alias = alias.to_ascii_lowercase();
            if !labels.contains(&alias) {
                labels.push(alias);
            }
        }
        if let Some(taken) = labels.iter().find(|l| self.labels.contains_key(*l)) {
            return Err(QuillError::Command(format!(
                "command label already registered: {taken}"
            )));
        }

        log::info!(
            "Registered command '{}' ({} subcommands)",
            node.qualified_name(),
            node.subcommands().len()
        );
        for label in labels {
            self.labels.insert(label, key.clone());
        }
        self.commands.insert(key, node);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::argument::{ArgumentValue, StringArgument};
    use crate::builder::CommandBuilder;
    use crate::plugin::Plugin;
    use crate::sender::testing::RecordingSender;
    use quill_types::config::PluginDescriptor;

    fn plugin() -> Rc<Plugin> {
        Plugin::new(PluginDescriptor::new("homes")).unwrap()
    }

    fn home_command() -> CommandBuilder {
        CommandBuilder::command(&plugin(), "home")
            .unwrap()
            .with_description("Teleport home")
            .with_aliases(["h"])
            .with_argument(StringArgument::new("name"))
            .with_executor_player(|sender, args| {
                let name = args.string("name").unwrap_or("home");
                sender.send_message(&format!("Teleporting to {name}"));
                Ok(())
            })
            .with_subcommand("set", |c| {
                Ok(c.with_aliases(["s"]).with_executor_player(|sender, _| {
                    sender.send_message("Home set");
                    Ok(())
                }))
            })
            .unwrap()
            .with_subcommand("list", Ok)
            .unwrap()
    }

    #[test]
    fn register_and_get() {
        let mut reg = CommandRegistry::new();
        home_command().register(&mut reg).unwrap();
        assert_eq!(reg.len(), 1);
        assert!(reg.get("home").is_some());
        assert!(reg.get("H").is_some());
        assert!(reg.get("homes:home").is_some());
        assert!(reg.get("warp").is_none());
    }

    #[test]
    fn empty_registry() {
        let reg = CommandRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.list_commands().is_empty());
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut reg = CommandRegistry::new();
        home_command().register(&mut reg).unwrap();
        let err = CommandBuilder::command(&plugin(), "HOME")
            .unwrap()
            .register(&mut reg)
            .unwrap_err();
        assert!(matches!(err, QuillError::Command(_)));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn alias_collision_rejected() {
        let mut reg = CommandRegistry::new();
        home_command().register(&mut reg).unwrap();
        let err = CommandBuilder::command(&plugin(), "hub")
            .unwrap()
            .with_aliases(["h"])
            .register(&mut reg)
            .unwrap_err();
        assert!(format!("{err}").contains("already registered: h"));
        assert!(reg.get("hub").is_none());
    }

    #[test]
    fn list_commands_sorted() {
        let mut reg = CommandRegistry::new();
        home_command().register(&mut reg).unwrap();
        CommandBuilder::command(&plugin(), "delhome")
            .unwrap()
            .register(&mut reg)
            .unwrap();
        let cmds = reg.list_commands();
        assert_eq!(cmds, vec![("delhome", ""), ("home", "Teleport home")]);
    }

    #[test]
    fn dispatch_root_with_args() {
        let mut reg = CommandRegistry::new();
        home_command().register(&mut reg).unwrap();
        let mut player = RecordingSender::player("Alex");
        let args = CommandArgs::new().with("name", ArgumentValue::String("base".into()));
        reg.dispatch(&["home"], &mut player, &args).unwrap();
        assert_eq!(player.messages, vec!["Teleporting to base"]);
    }

    #[test]
    fn dispatch_subcommand_by_alias() {
        let mut reg = CommandRegistry::new();
        home_command().register(&mut reg).unwrap();
        let mut player = RecordingSender::player("Alex");
        reg.dispatch(&["h", "S"], &mut player, &CommandArgs::new())
            .unwrap();
        assert_eq!(player.messages, vec!["Home set"]);
    }

    #[test]
    fn dispatch_subcommand_without_executor_reports_failure() {
        let mut reg = CommandRegistry::new();
        home_command().register(&mut reg).unwrap();
        let mut console = RecordingSender::console();
        reg.dispatch(&["home", "list"], &mut console, &CommandArgs::new())
            .unwrap();
        assert_eq!(console.messages, vec!["Error: No executor found!"]);
    }

    #[test]
    fn dispatch_console_on_player_only_command() {
        let mut reg = CommandRegistry::new();
        home_command().register(&mut reg).unwrap();
        let mut console = RecordingSender::console();
        let err = reg
            .dispatch(&["home"], &mut console, &CommandArgs::new())
            .unwrap_err();
        assert!(matches!(err, QuillError::SenderNotSupported { .. }));
    }

    #[test]
    fn dispatch_unknown_paths() {
        let mut reg = CommandRegistry::new();
        home_command().register(&mut reg).unwrap();
        let mut player = RecordingSender::player("Alex");

        let err = reg
            .dispatch(&["warp"], &mut player, &CommandArgs::new())
            .unwrap_err();
        assert_eq!(format!("{err}"), "command error: unknown command: warp");

        let err = reg
            .dispatch(&["home", "delete"], &mut player, &CommandArgs::new())
            .unwrap_err();
        assert!(format!("{err}").contains("unknown subcommand 'delete' for 'home'"));

        let err = reg.dispatch(&[], &mut player, &CommandArgs::new()).unwrap_err();
        assert!(matches!(err, QuillError::Command(_)));
        assert!(player.messages.is_empty());
    }
}
