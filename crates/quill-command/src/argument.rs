//! Argument descriptors and parsed argument values.
//!
//! The builder treats descriptors as opaque: it only keeps them in order and
//! hands them to the compiled node. Interpreting them is the dispatch
//! engine's job. The basic descriptors here cover the common cases.

use std::fmt;

/// Describes one positional argument of a command.
pub trait Argument: fmt::Debug {
    /// Name the argument is looked up by in `CommandArgs`.
    fn node_name(&self) -> &str;

    /// Short type label used in help and summaries (e.g. "integer").
    fn type_name(&self) -> &'static str;
}

/// A whole number, optionally bounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerArgument {
    name: String,
    min: Option<i64>,
    max: Option<i64>,
}

impl IntegerArgument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min: None,
            max: None,
        }
    }

    /// Restrict the accepted range (inclusive on both ends).
    pub fn with_bounds(mut self, min: i64, max: i64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn min(&self) -> Option<i64> {
        self.min
    }

    pub fn max(&self) -> Option<i64> {
        self.max
    }
}

impl Argument for IntegerArgument {
    fn node_name(&self) -> &str {
        &self.name
    }
    fn type_name(&self) -> &'static str {
        "integer"
    }
}

/// A single word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringArgument {
    name: String,
}

impl StringArgument {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Argument for StringArgument {
    fn node_name(&self) -> &str {
        &self.name
    }
    fn type_name(&self) -> &'static str {
        "string"
    }
}

/// The rest of the input, spaces included. Only meaningful as the last argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreedyStringArgument {
    name: String,
}

impl GreedyStringArgument {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Argument for GreedyStringArgument {
    fn node_name(&self) -> &str {
        &self.name
    }
    fn type_name(&self) -> &'static str {
        "greedy_string"
    }
}

/// `true` or `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanArgument {
    name: String,
}

impl BooleanArgument {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Argument for BooleanArgument {
    fn node_name(&self) -> &str {
        &self.name
    }
    fn type_name(&self) -> &'static str {
        "boolean"
    }
}

/// A value the dispatch engine parsed for one argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// Parsed argument values in positional order, addressable by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandArgs {
    values: Vec<(String, ArgumentValue)>,
}

impl CommandArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value; chainable.
    pub fn with(mut self, name: impl Into<String>, value: ArgumentValue) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: ArgumentValue) {
        self.values.push((name.into(), value));
    }

    /// Value of the first argument with this name.
    pub fn get(&self, name: &str) -> Option<&ArgumentValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Value at a position.
    pub fn get_index(&self, index: usize) -> Option<&ArgumentValue> {
        self.values.get(index).map(|(_, v)| v)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            ArgumentValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            ArgumentValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            ArgumentValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgumentValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }
}
