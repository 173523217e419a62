use std::fmt::Display;

use super::regex;
use super::AutomatonError;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;

/// Identifies a state of an [`Automaton`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) u32);

impl StorageKey for StateId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        StateId(index as u32)
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// An immutable deterministic finite automaton whose alphabet consists of integers.
///
/// The transition function is partial: a missing transition rejects the sequence. Instances are
/// created through the [`AutomatonBuilder`](super::AutomatonBuilder) or
/// [`Automaton::from_regex`], which guarantee that the transition function is deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Automaton {
    initial_state: StateId,
    accepting: KeyedVec<StateId, bool>,
    /// The outgoing transitions of every state, sorted by value.
    transitions: KeyedVec<StateId, Box<[(i32, StateId)]>>,
}

impl Automaton {
    /// Creates the automaton; `transitions` must be sorted by value per state and deterministic.
    pub(super) fn new(
        initial_state: StateId,
        accepting: KeyedVec<StateId, bool>,
        transitions: KeyedVec<StateId, Box<[(i32, StateId)]>>,
    ) -> Automaton {
        Automaton {
            initial_state,
            accepting,
            transitions,
        }
    }

    /// Compiles a regular expression over integer symbols into an automaton.
    ///
    /// The supported syntax:
    /// - a decimal digit `0`..`9` is the symbol with that value;
    /// - `<n>` is the symbol `n`, which may have multiple digits or be negative (`<12>`, `<-3>`);
    /// - `[..]` is a class of symbols, with ranges such as `[0-3]` or `[<-2>-<5>]`;
    /// - `r|s` is alternation, `rs` concatenation, and `(r)` grouping;
    /// - `r*`, `r+`, `r?`, `r{n}`, `r{n,}` and `r{n,m}` repeat `r`.
    ///
    /// Whitespace is ignored.
    pub fn from_regex(expression: &str) -> Result<Automaton, AutomatonError> {
        let ast = regex::parse(expression)?;
        regex::compile(&ast)
    }

    /// The state after reading `value` in `state`, or [`None`] if there is no such transition.
    pub fn transition(&self, state: StateId, value: i32) -> Option<StateId> {
        let transitions = &self.transitions[state];
        transitions
            .binary_search_by_key(&value, |&(symbol, _)| symbol)
            .ok()
            .map(|index| transitions[index].1)
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting[state]
    }

    pub fn initial_state(&self) -> StateId {
        self.initial_state
    }

    /// Simulates the automaton on `sequence` and returns whether it ends in an accepting state.
    pub fn run(&self, sequence: impl IntoIterator<Item = i32>) -> bool {
        let mut state = self.initial_state;

        for value in sequence {
            match self.transition(state, value) {
                Some(next) => state = next,
                None => return false,
            }
        }

        self.is_accepting(state)
    }

    pub fn num_states(&self) -> usize {
        self.accepting.len()
    }

    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.accepting.keys()
    }

    pub fn accepting_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states().filter(|&state| self.is_accepting(state))
    }

    /// The outgoing transitions of `state` as `(value, destination)` pairs, ordered by value.
    pub fn transitions_from(&self, state: StateId) -> &[(i32, StateId)] {
        &self.transitions[state]
    }

    /// Every value which labels at least one transition, in increasing order.
    pub fn alphabet(&self) -> Vec<i32> {
        let mut alphabet = self
            .transitions
            .iter()
            .flat_map(|transitions| transitions.iter().map(|&(value, _)| value))
            .collect::<Vec<_>>();
        alphabet.sort_unstable();
        alphabet.dedup();
        alphabet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::AutomatonBuilder;

    /// `0*1*` with the two states of the textbook automaton.
    fn zeros_then_ones() -> (Automaton, StateId, StateId) {
        let mut builder = AutomatonBuilder::default();
        let q0 = builder.add_state();
        let q1 = builder.add_state();
        let _ = builder
            .set_initial(q0)
            .set_accepting(q0)
            .set_accepting(q1)
            .add_transition(q0, 0, q0)
            .add_transition(q0, 1, q1)
            .add_transition(q1, 1, q1);

        (builder.build().expect("valid automaton"), q0, q1)
    }

    #[test]
    fn transitions_are_looked_up() {
        let (automaton, q0, q1) = zeros_then_ones();

        assert_eq!(Some(q0), automaton.transition(q0, 0));
        assert_eq!(Some(q1), automaton.transition(q0, 1));
        assert_eq!(None, automaton.transition(q1, 0));
        assert_eq!(None, automaton.transition(q0, 7));
        assert_eq!(q0, automaton.initial_state());
    }

    #[test]
    fn run_accepts_exactly_the_language() {
        let (automaton, _, _) = zeros_then_ones();

        assert!(automaton.run([]));
        assert!(automaton.run([0, 0, 1]));
        assert!(automaton.run([1, 1, 1]));
        assert!(!automaton.run([1, 0, 0]));
        assert!(!automaton.run([0, 2]));
    }

    #[test]
    fn queries_describe_the_structure() {
        let (automaton, q0, q1) = zeros_then_ones();

        assert_eq!(2, automaton.num_states());
        assert_eq!(vec![q0, q1], automaton.accepting_states().collect::<Vec<_>>());
        assert_eq!(vec![0, 1], automaton.alphabet());
        assert_eq!(&[(0, q0), (1, q1)], automaton.transitions_from(q0));
        assert_eq!("q1", q1.to_string());
    }
}
