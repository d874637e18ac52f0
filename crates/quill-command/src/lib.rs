//! Fluent command tree builder.
//!
//! A `CommandBuilder` describes one command: name, permission, aliases,
//! positional arguments, subcommands, and executors keyed by caller kind.
//! `compile()` turns the builder tree into an immutable `CommandNode` tree
//! that a `CommandDispatcher` can make live.

pub mod argument;
mod builder;
mod executor;
mod node;
mod plugin;
mod registry;
mod sender;

/// Opaque positional argument descriptor and a few basic implementations.
pub use argument::{Argument, ArgumentValue, CommandArgs};
/// Fluent builder for one command and its subcommands.
pub use builder::CommandBuilder;
/// Executor callbacks, executor slots, and the compiled resolution.
pub use executor::{Executor, ExecutorSlots, Resolution};
/// Immutable compiled command node.
pub use node::{ArgumentSummary, CommandNode, NodeSummary};
/// Owning plugin handle shared by a command tree.
pub use plugin::Plugin;
/// Registration seam and the in-memory reference dispatcher.
pub use registry::{CommandDispatcher, CommandRegistry};
/// Caller abstraction passed to executors.
pub use sender::{CommandSender, SenderKind};
