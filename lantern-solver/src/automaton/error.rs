use thiserror::Error;

use super::StateId;

/// Errors that can occur when constructing an [`Automaton`](super::Automaton).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    /// A state was referenced which was not created by the builder.
    #[error("state {0} does not exist in the automaton")]
    UnknownState(StateId),
    /// No initial state was provided.
    #[error("the automaton does not have an initial state")]
    MissingInitialState,
    /// The same (state, value) pair leads to two different states.
    #[error("state {state} has transitions on value {value} to both {first} and {second}")]
    NonDeterministic {
        state: StateId,
        value: i32,
        first: StateId,
        second: StateId,
    },
    /// A range of transitions spans more values than an automaton supports.
    #[error("the range {lower}..={upper} spans too many values")]
    RangeTooWide { lower: i32, upper: i32 },
    /// The regular expression could not be parsed.
    #[error(transparent)]
    Regex(#[from] RegexError),
}

/// A syntax error in a regular expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid regular expression at position {position}: {description}")]
pub struct RegexError {
    /// The character offset at which the error was detected.
    pub position: usize,
    pub description: String,
}

impl RegexError {
    pub(crate) fn new(position: usize, description: impl Into<String>) -> RegexError {
        RegexError {
            position,
            description: description.into(),
        }
    }
}
