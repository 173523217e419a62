use std::ops::RangeInclusive;

use super::Automaton;
use super::AutomatonError;
use super::StateId;
use crate::containers::KeyedVec;

/// The largest number of values a single range of transitions may span.
pub(super) const MAX_RANGE_WIDTH: i64 = 1 << 16;

/// Assembles an [`Automaton`] from explicitly given states and transitions.
///
/// ```rust
/// # use lantern_solver::automaton::AutomatonBuilder;
/// // Sequences over {0, 1, 2} which never contain two consecutive zeros.
/// let mut builder = AutomatonBuilder::default();
/// let free = builder.add_state();
/// let after_zero = builder.add_state();
/// let _ = builder
///     .set_initial(free)
///     .set_accepting(free)
///     .set_accepting(after_zero)
///     .add_transition(free, 0, after_zero)
///     .add_transition_range(free, 1..=2, free)
///     .add_transition_range(after_zero, 1..=2, free);
/// let automaton = builder.build().expect("valid automaton");
///
/// assert!(automaton.run([0, 1, 0]));
/// assert!(!automaton.run([2, 0, 0]));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AutomatonBuilder {
    num_states: u32,
    initial_state: Option<StateId>,
    accepting: Vec<StateId>,
    transitions: Vec<(StateId, i32, StateId)>,
    ranges: Vec<(StateId, RangeInclusive<i32>, StateId)>,
}

impl AutomatonBuilder {
    pub fn add_state(&mut self) -> StateId {
        let state = StateId(self.num_states);
        self.num_states += 1;
        state
    }

    /// Sets the initial state, replacing the previous one.
    pub fn set_initial(&mut self, state: StateId) -> &mut Self {
        self.initial_state = Some(state);
        self
    }

    pub fn set_accepting(&mut self, state: StateId) -> &mut Self {
        self.accepting.push(state);
        self
    }

    pub fn add_transition(&mut self, from: StateId, value: i32, to: StateId) -> &mut Self {
        self.transitions.push((from, value, to));
        self
    }

    /// Adds a transition from `from` to `to` for every value in `values`.
    ///
    /// The range may span at most 65536 values, [`AutomatonBuilder::build`] fails otherwise.
    pub fn add_transition_range(
        &mut self,
        from: StateId,
        values: RangeInclusive<i32>,
        to: StateId,
    ) -> &mut Self {
        self.ranges.push((from, values, to));
        self
    }

    /// Validates the states and transitions and creates the [`Automaton`].
    ///
    /// Adding the same transition more than once is allowed; transitions on the same value from
    /// the same state to different states are not.
    pub fn build(mut self) -> Result<Automaton, AutomatonError> {
        let initial_state = self
            .initial_state
            .ok_or(AutomatonError::MissingInitialState)?;

        for (from, values, to) in std::mem::take(&mut self.ranges) {
            let (lower, upper) = (*values.start(), *values.end());
            if i64::from(upper) - i64::from(lower) >= MAX_RANGE_WIDTH {
                return Err(AutomatonError::RangeTooWide { lower, upper });
            }
            self.transitions
                .extend(values.map(|value| (from, value, to)));
        }

        let all_states = std::iter::once(initial_state)
            .chain(self.accepting.iter().copied())
            .chain(
                self.transitions
                    .iter()
                    .flat_map(|&(from, _, to)| [from, to]),
            );
        for state in all_states {
            if state.0 >= self.num_states {
                return Err(AutomatonError::UnknownState(state));
            }
        }

        self.transitions.sort_unstable();
        self.transitions.dedup();

        for pair in self.transitions.windows(2) {
            let (state, value, first) = pair[0];
            let (next_state, next_value, second) = pair[1];

            if state == next_state && value == next_value {
                return Err(AutomatonError::NonDeterministic {
                    state,
                    value,
                    first,
                    second,
                });
            }
        }

        let mut accepting: KeyedVec<StateId, bool> =
            (0..self.num_states).map(|_| false).collect();
        for state in self.accepting {
            accepting[state] = true;
        }

        let mut transitions = vec![Vec::new(); self.num_states as usize];
        for (from, value, to) in self.transitions {
            transitions[from.0 as usize].push((value, to));
        }

        Ok(Automaton::new(
            initial_state,
            accepting,
            transitions
                .into_iter()
                .map(Vec::into_boxed_slice)
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_initial_state_is_an_error() {
        let mut builder = AutomatonBuilder::default();
        let state = builder.add_state();
        let _ = builder.set_accepting(state);

        assert_eq!(Err(AutomatonError::MissingInitialState), builder.build());
    }

    #[test]
    fn states_from_elsewhere_are_rejected() {
        let mut other = AutomatonBuilder::default();
        let _ = other.add_state();
        let foreign = other.add_state();

        let mut builder = AutomatonBuilder::default();
        let state = builder.add_state();
        let _ = builder
            .set_initial(state)
            .add_transition(state, 0, foreign);

        assert_eq!(Err(AutomatonError::UnknownState(foreign)), builder.build());
    }

    #[test]
    fn duplicate_transitions_are_merged() {
        let mut builder = AutomatonBuilder::default();
        let state = builder.add_state();
        let _ = builder
            .set_initial(state)
            .set_accepting(state)
            .add_transition(state, 3, state)
            .add_transition_range(state, 2..=4, state);

        let automaton = builder.build().expect("deterministic");

        assert_eq!(
            &[(2, state), (3, state), (4, state)],
            automaton.transitions_from(state)
        );
    }

    #[test]
    fn conflicting_destinations_are_rejected() {
        let mut builder = AutomatonBuilder::default();
        let q0 = builder.add_state();
        let q1 = builder.add_state();
        let _ = builder
            .set_initial(q0)
            .add_transition(q0, 5, q1)
            .add_transition(q0, 5, q0);

        assert_eq!(
            Err(AutomatonError::NonDeterministic {
                state: q0,
                value: 5,
                first: q0,
                second: q1
            }),
            builder.build()
        );
    }

    #[test]
    fn oversized_ranges_are_rejected() {
        let mut builder = AutomatonBuilder::default();
        let state = builder.add_state();
        let _ = builder
            .set_initial(state)
            .add_transition_range(state, i32::MIN..=i32::MAX, state);

        assert_eq!(
            Err(AutomatonError::RangeTooWide {
                lower: i32::MIN,
                upper: i32::MAX
            }),
            builder.build()
        );
    }

}
