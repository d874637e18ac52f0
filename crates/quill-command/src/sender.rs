//! Caller abstraction.

use std::fmt;

/// The category of entity issuing a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SenderKind {
    /// A human player connected to the server.
    Player,
    /// The server console or another administrative interface.
    Console,
}

impl fmt::Display for SenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => f.write_str("player"),
            Self::Console => f.write_str("console"),
        }
    }
}

/// Whoever invoked a command. Supplied by the dispatch engine.
pub trait CommandSender {
    /// Which kind of caller this is.
    fn kind(&self) -> SenderKind;

    /// Display name of the caller.
    fn name(&self) -> &str;

    /// Deliver a message to the caller.
    fn send_message(&mut self, message: &str);
}
