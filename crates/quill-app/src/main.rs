//! QUILL demo entry point.
//!
//! Loads a plugin descriptor, builds a small `home` command tree, registers
//! it in an in-memory registry, and runs a few invocations as a player and
//! as the console.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::{Context, Result};

use quill_command::argument::StringArgument;
use quill_command::{
    ArgumentValue, CommandArgs, CommandBuilder, CommandRegistry, CommandSender, Plugin, SenderKind,
};
use quill_types::error::QuillError;

const DEFAULT_DESCRIPTOR: &str = include_str!("../plugin.toml");

/// Prints every message it receives to stdout.
struct StdoutSender {
    kind: SenderKind,
    name: String,
}

impl CommandSender for StdoutSender {
    fn kind(&self) -> SenderKind {
        self.kind
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn send_message(&mut self, message: &str) {
        println!("[to {}] {message}", self.name);
    }
}

type Homes = Rc<RefCell<BTreeMap<String, Vec<String>>>>;

fn build_home_command(
    plugin: &Rc<Plugin>,
    homes: &Homes,
) -> quill_types::error::Result<CommandBuilder> {
    let teleport = Rc::clone(homes);
    let set = Rc::clone(homes);
    let list = Rc::clone(homes);

    CommandBuilder::command(plugin, "home")?
        .with_description("Teleport to one of your homes")
        .with_permission(Some("homes.use"))
        .with_aliases(["h"])
        .with_argument(StringArgument::new("name"))
        .with_executor_player(move |sender, args| {
            let name = args.string("name").unwrap_or("home");
            let known = teleport
                .borrow()
                .get(sender.name())
                .is_some_and(|h| h.iter().any(|n| n == name));
            if !known {
                return Err(QuillError::Execution(format!("no home named '{name}'")));
            }
            sender.send_message(&format!("Teleported to {name}"));
            Ok(())
        })
        .with_subcommand("set", move |c| {
            Ok(c
                .with_argument(StringArgument::new("name"))
                .with_executor_player(move |sender, args| {
                    let name = args.string("name").unwrap_or("home").to_string();
                    set.borrow_mut()
                        .entry(sender.name().to_string())
                        .or_default()
                        .push(name.clone());
                    sender.send_message(&format!("Home '{name}' set"));
                    Ok(())
                }))
        })?
        .with_subcommand("list", move |c| {
            Ok(c.with_aliases(["ls"]).with_executor_any(move |sender, _| {
                let text = list
                    .borrow()
                    .iter()
                    .map(|(owner, names)| format!("{owner}: {}", names.join(", ")))
                    .collect::<Vec<_>>()
                    .join("\n");
                sender.send_message(if text.is_empty() { "No homes yet" } else { text.as_str() });
                Ok(())
            }))
        })?
        .with_subcommand("import", Ok)
}

/// Dispatch one invocation and print any error instead of aborting.
fn run(registry: &CommandRegistry, path: &[&str], sender: &mut StdoutSender, args: &CommandArgs) {
    if let Err(e) = registry.dispatch(path, sender, args) {
        println!("[{}] error: {e}", path.join(" "));
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Descriptor from CLI arg, QUILL_PLUGIN env var, or the bundled default.
    let descriptor = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("QUILL_PLUGIN").ok())
    {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading plugin descriptor {path}"))?,
        None => DEFAULT_DESCRIPTOR.to_string(),
    };
    let plugin = Plugin::from_toml(&descriptor)?;
    log::info!("Loaded plugin: {} v{}", plugin.name(), plugin.version());

    let homes: Homes = Rc::default();
    let mut registry = CommandRegistry::new();
    let home = build_home_command(&plugin, &homes)?;
    println!("{}", home.compile().to_json()?);
    home.register(&mut registry)?;

    let mut player = StdoutSender {
        kind: SenderKind::Player,
        name: "Steve".to_string(),
    };
    let mut console = StdoutSender {
        kind: SenderKind::Console,
        name: "CONSOLE".to_string(),
    };
    let base = CommandArgs::new().with("name", ArgumentValue::String("base".to_string()));
    let none = CommandArgs::new();

    run(&registry, &["home", "set"], &mut player, &base);
    run(&registry, &["h"], &mut player, &base);
    run(&registry, &["home", "ls"], &mut console, &none);
    run(&registry, &["home", "import"], &mut console, &none);
    run(&registry, &["home"], &mut console, &base);
    run(&registry, &["warp"], &mut player, &none);

    for (name, description) in registry.list_commands() {
        log::info!("{name}: {description}");
    }
    Ok(())
}
