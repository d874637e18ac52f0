//! Executor callbacks and the rule that picks which one a node runs.

use std::fmt;
use std::rc::Rc;

use quill_types::error::{QuillError, Result};

use crate::argument::CommandArgs;
use crate::sender::{CommandSender, SenderKind};

type ExecutorFn = dyn Fn(&mut dyn CommandSender, &CommandArgs) -> Result<()>;

/// A command callback, invoked by the dispatch engine with the caller and
/// the parsed arguments.
///
/// Cloning shares the same callback. Two executors compare equal only when
/// they are the same callback.
#[derive(Clone)]
pub struct Executor(Rc<ExecutorFn>);

impl Executor {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut dyn CommandSender, &CommandArgs) -> Result<()> + 'static,
    {
        Self(Rc::new(f))
    }

    pub fn call(&self, sender: &mut dyn CommandSender, args: &CommandArgs) -> Result<()> {
        (self.0)(sender, args)
    }
}

impl PartialEq for Executor {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Executor({:p})", Rc::as_ptr(&self.0))
    }
}

/// The three executor slots of a builder. Each slot holds at most one
/// executor and setting it replaces the previous one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutorSlots {
    pub any: Option<Executor>,
    pub player: Option<Executor>,
    pub console: Option<Executor>,
}

impl ExecutorSlots {
    /// Decide which handler a compiled node carries.
    ///
    /// An `any` executor wins outright. Otherwise the player and console
    /// executors are attached independently. Only when all three slots are
    /// empty does the node get the fallback handler.
    pub fn resolve(&self, no_executor_message: &str) -> Resolution {
        if let Some(any) = &self.any {
            return Resolution::Any(any.clone());
        }
        if self.player.is_none() && self.console.is_none() {
            return Resolution::Fallback {
                message: no_executor_message.to_string(),
            };
        }
        Resolution::ByKind {
            player: self.player.clone(),
            console: self.console.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.any.is_none() && self.player.is_none() && self.console.is_none()
    }
}

/// The handler attached to a compiled node.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Runs for every caller.
    Any(Executor),
    /// Per caller kind; at least one side is set.
    ByKind {
        player: Option<Executor>,
        console: Option<Executor>,
    },
    /// No executor configured: tells the caller so.
    Fallback { message: String },
}

impl Resolution {
    /// Executor that would run for this caller kind, if any.
    pub fn executor_for(&self, kind: SenderKind) -> Option<&Executor> {
        match (self, kind) {
            (Self::Any(exec), _) => Some(exec),
            (Self::ByKind { player, .. }, SenderKind::Player) => player.as_ref(),
            (Self::ByKind { console, .. }, SenderKind::Console) => console.as_ref(),
            (Self::Fallback { .. }, _) => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Short label for summaries: "any", "player", "console", "player+console"
    /// or "none".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Any(_) => "any",
            Self::ByKind {
                player: Some(_),
                console: Some(_),
            } => "player+console",
            Self::ByKind {
                player: Some(_), ..
            } => "player",
            Self::ByKind {
                console: Some(_), ..
            } => "console",
            Self::ByKind { .. } | Self::Fallback { .. } => "none",
        }
    }

    /// Run the handler for `sender` on behalf of `command`.
    pub fn invoke(
        &self,
        command: &str,
        sender: &mut dyn CommandSender,
        args: &CommandArgs,
    ) -> Result<()> {
        if let Self::Fallback { message } = self {
            log::debug!("{command}: no executor configured, notifying {}", sender.name());
            sender.send_message(message);
            return Ok(());
        }
        match self.executor_for(sender.kind()) {
            Some(exec) => exec.call(sender, args),
            None => Err(QuillError::SenderNotSupported {
                command: command.to_string(),
                sender: sender.kind().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sender::testing::RecordingSender;

    fn tagged(tag: &'static str) -> Executor {
        Executor::new(move |sender, _args| {
            sender.send_message(tag);
            Ok(())
        })
    }

    #[test]
    fn empty_slots_resolve_to_fallback() {
        let slots = ExecutorSlots::default();
        assert!(slots.is_empty());
        assert_eq!(
            slots.resolve("no executor"),
            Resolution::Fallback {
                message: "no executor".into()
            }
        );
    }

    #[test]
    fn any_wins_over_player_and_console() {
        let any = tagged("any");
        let slots = ExecutorSlots {
            any: Some(any.clone()),
            player: Some(tagged("player")),
            console: Some(tagged("console")),
        };
        assert_eq!(slots.resolve("x"), Resolution::Any(any));
    }

    #[test]
    fn player_only_has_no_fallback() {
        let player = tagged("player");
        let slots = ExecutorSlots {
            player: Some(player.clone()),
            ..Default::default()
        };
        let res = slots.resolve("x");
        assert!(!res.is_fallback());
        assert_eq!(
            res,
            Resolution::ByKind {
                player: Some(player),
                console: None
            }
        );
        assert_eq!(res.label(), "player");
    }

    #[test]
    fn player_and_console_both_attach() {
        let slots = ExecutorSlots {
            player: Some(tagged("player")),
            console: Some(tagged("console")),
            ..Default::default()
        };
        let res = slots.resolve("x");
        assert_eq!(res.label(), "player+console");
        assert!(res.executor_for(SenderKind::Player).is_some());
        assert!(res.executor_for(SenderKind::Console).is_some());
    }

    #[test]
    fn executor_equality_is_identity() {
        let a = tagged("a");
        let b = tagged("a");
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn invoke_routes_by_kind() {
        let res = ExecutorSlots {
            player: Some(tagged("player")),
            console: Some(tagged("console")),
            ..Default::default()
        }
        .resolve("x");

        let mut player = RecordingSender::player("Alex");
        res.invoke("home", &mut player, &CommandArgs::new()).unwrap();
        assert_eq!(player.messages, vec!["player"]);

        let mut console = RecordingSender::console();
        res.invoke("home", &mut console, &CommandArgs::new()).unwrap();
        assert_eq!(console.messages, vec!["console"]);
    }

    #[test]
    fn invoke_missing_kind_is_error() {
        let res = ExecutorSlots {
            player: Some(tagged("player")),
            ..Default::default()
        }
        .resolve("x");
        let mut console = RecordingSender::console();
        let err = res
            .invoke("home", &mut console, &CommandArgs::new())
            .unwrap_err();
        match err {
            QuillError::SenderNotSupported { command, sender } => {
                assert_eq!(command, "home");
                assert_eq!(sender, "console");
            },
            other => panic!("unexpected error: {other}"),
        }
        assert!(console.messages.is_empty());
    }

    #[test]
    fn invoke_fallback_sends_message() {
        let res = ExecutorSlots::default().resolve("Error: No executor found!");
        let mut player = RecordingSender::player("Alex");
        res.invoke("home", &mut player, &CommandArgs::new()).unwrap();
        assert_eq!(player.messages, vec!["Error: No executor found!"]);
        assert_eq!(res.label(), "none");
    }

    #[test]
    fn executor_errors_propagate() {
        let res = Resolution::Any(Executor::new(|_, _| {
            Err(QuillError::Execution("boom".into()))
        }));
        let mut console = RecordingSender::console();
        let err = res
            .invoke("home", &mut console, &CommandArgs::new())
            .unwrap_err();
        assert!(matches!(err, QuillError::Execution(_)));
    }

    #[test]
    fn executor_receives_args() {
        use crate::argument::ArgumentValue;
        let exec = Executor::new(|sender, args| {
            let n = args.integer("count").unwrap_or(0);
            sender.send_message(&format!("count={n}"));
            Ok(())
        });
        let mut player = RecordingSender::player("Alex");
        let args = CommandArgs::new().with("count", ArgumentValue::Integer(7));
        exec.call(&mut player, &args).unwrap();
        assert_eq!(player.messages, vec!["count=7"]);
    }
}
