use crate::automaton::Automaton;
use crate::automaton::StateId;
use crate::containers::KeyedVec;

/// An edge `(position, from) --value--> (position + 1, to)` of the [`LayeredGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LayerEdge {
    pub(crate) from: StateId,
    pub(crate) value: i32,
    pub(crate) to: StateId,
}

/// The unfolding of an [`Automaton`] over a sequence of domains.
///
/// Layer `i` contains a node for every state of the automaton; node `(i, s)` represents being in
/// state `s` after reading `i` values. The edges of position `i` are the transitions on values of
/// the domain at position `i`, leaving nodes of layer `i` which are reachable from the initial
/// node `(0, s0)`. Both passes are stored per layer so that they can be recomputed for a suffix
/// (forward) or prefix (backward) of the layers only:
/// - the forward pass of layer `i + 1` depends on the domains of positions `0..=i`;
/// - the backward pass of layer `i` depends on the domains of positions `i..n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LayeredGraph {
    /// `reachable[i][s]` holds if `(i, s)` can be reached from `(0, s0)`.
    reachable: Vec<KeyedVec<StateId, bool>>,
    /// `co_reachable[i][s]` holds if an accepting node of the last layer can be reached from
    /// `(i, s)`, regardless of whether `(i, s)` itself is reachable.
    co_reachable: Vec<KeyedVec<StateId, bool>>,
    /// The edges of every position, ordered by source state and then by value.
    edges: Vec<Vec<LayerEdge>>,
}

/// The result of a single consistency pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum RegularOutcome {
    /// For every position, the (possibly empty) values of its domain without support.
    Pruned(Vec<Vec<i32>>),
    /// No sequence within the domains is accepted by the automaton.
    Infeasible,
}

/// Computes the values which should be removed from `domains` for the sequence to be accepted
/// by `automaton`. Every domain should be sorted.
pub(crate) fn check_regular(automaton: &Automaton, domains: &[Vec<i32>]) -> RegularOutcome {
    LayeredGraph::compute(automaton, domains).outcome(automaton, domains)
}

impl LayeredGraph {
    /// Creates the graph for `num_positions` positions with only the trivial layers filled in:
    /// the initial node in the first layer and the accepting nodes in the last one.
    pub(crate) fn new(automaton: &Automaton, num_positions: usize) -> LayeredGraph {
        let empty_layer: KeyedVec<StateId, bool> = automaton.states().map(|_| false).collect();

        let mut reachable = vec![empty_layer.clone(); num_positions + 1];
        reachable[0][automaton.initial_state()] = true;

        let mut co_reachable = vec![empty_layer; num_positions + 1];
        for state in automaton.accepting_states() {
            co_reachable[num_positions][state] = true;
        }

        LayeredGraph {
            reachable,
            co_reachable,
            edges: vec![vec![]; num_positions],
        }
    }

    /// Builds the complete graph for the given (sorted) domains.
    pub(crate) fn compute(automaton: &Automaton, domains: &[Vec<i32>]) -> LayeredGraph {
        let mut graph = LayeredGraph::new(automaton, domains.len());

        if !domains.is_empty() {
            let _ = graph.recompute_forward(automaton, domains, 0);
            let _ = graph.recompute_backward(automaton, domains, domains.len() - 1);
        }

        graph
    }

    pub(crate) fn num_positions(&self) -> usize {
        self.edges.len()
    }

    /// Rebuilds the edges of the positions `from..n` and the forward reachability of the layers
    /// following them. Returns the number of positions which were recomputed.
    pub(crate) fn recompute_forward(
        &mut self,
        automaton: &Automaton,
        domains: &[Vec<i32>],
        from: usize,
    ) -> usize {
        for position in from..self.num_positions() {
            let (before, after) = self.reachable.split_at_mut(position + 1);
            let current = &before[position];
            let next = &mut after[0];
            let edges = &mut self.edges[position];

            next.iter_mut().for_each(|reachable| *reachable = false);
            edges.clear();

            for state in automaton.states() {
                if !current[state] {
                    continue;
                }

                for_each_transition(automaton, state, &domains[position], |value, to| {
                    edges.push(LayerEdge {
                        from: state,
                        value,
                        to,
                    });
                    next[to] = true;
                });
            }
        }

        self.num_positions().saturating_sub(from)
    }

    /// Recomputes the backward reachability of the layers `0..=to`, from `to` down to the first
    /// layer. Returns the number of layers which were recomputed.
    pub(crate) fn recompute_backward(
        &mut self,
        automaton: &Automaton,
        domains: &[Vec<i32>],
        to: usize,
    ) -> usize {
        for position in (0..=to).rev() {
            let (before, after) = self.co_reachable.split_at_mut(position + 1);
            let current = &mut before[position];
            let next = &after[0];

            for state in automaton.states() {
                let mut has_support = false;
                for_each_transition(automaton, state, &domains[position], |_, to| {
                    has_support |= next[to];
                });
                current[state] = has_support;
            }
        }

        to + 1
    }

    /// Whether some sequence within the domains is accepted.
    pub(crate) fn is_feasible(&self, automaton: &Automaton) -> bool {
        self.co_reachable[0][automaton.initial_state()]
    }

    /// A node is live if it lies on a path from the initial node to an accepting node of the
    /// last layer.
    pub(crate) fn is_live(&self, layer: usize, state: StateId) -> bool {
        self.reachable[layer][state] && self.co_reachable[layer][state]
    }

    /// The edges of `position` between two live nodes.
    pub(crate) fn live_edges(&self, position: usize) -> impl Iterator<Item = &LayerEdge> + '_ {
        self.edges[position].iter().filter(move |edge| {
            self.is_live(position, edge.from) && self.is_live(position + 1, edge.to)
        })
    }

    /// The values of `domain` which do not label a live edge of `position`.
    pub(crate) fn unsupported_values(&self, position: usize, domain: &[i32]) -> Vec<i32> {
        let mut supported = self
            .live_edges(position)
            .map(|edge| edge.value)
            .collect::<Vec<_>>();
        supported.sort_unstable();
        supported.dedup();

        domain
            .iter()
            .copied()
            .filter(|value| supported.binary_search(value).is_err())
            .collect()
    }

    /// Determines the values to prune from `domains`, which must be the domains the graph was
    /// computed for.
    pub(crate) fn outcome(&self, automaton: &Automaton, domains: &[Vec<i32>]) -> RegularOutcome {
        if !self.is_feasible(automaton) {
            return RegularOutcome::Infeasible;
        }

        let mut pruned = Vec::with_capacity(domains.len());
        for (position, domain) in domains.iter().enumerate() {
            let unsupported = self.unsupported_values(position, domain);
            if unsupported.len() == domain.len() {
                return RegularOutcome::Infeasible;
            }
            pruned.push(unsupported);
        }

        RegularOutcome::Pruned(pruned)
    }
}

/// Calls `action` with every transition of `state` on a value of the sorted `domain`, in
/// increasing order of value. Iterates over whichever of the two is smaller.
fn for_each_transition(
    automaton: &Automaton,
    state: StateId,
    domain: &[i32],
    mut action: impl FnMut(i32, StateId),
) {
    let transitions = automaton.transitions_from(state);

    if domain.len() <= transitions.len() {
        for &value in domain {
            if let Some(to) = automaton.transition(state, value) {
                action(value, to);
            }
        }
    } else {
        for &(value, to) in transitions {
            if domain.binary_search(&value).is_ok() {
                action(value, to);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn zeros_then_ones() -> Automaton {
        Automaton::from_regex("0*1*").expect("valid expression")
    }

    /// The outcome obtained by enumerating all sequences.
    fn brute_force(automaton: &Automaton, domains: &[Vec<i32>]) -> RegularOutcome {
        let accepted = domains
            .iter()
            .map(|domain| domain.iter().copied())
            .multi_cartesian_product()
            .filter(|sequence| automaton.run(sequence.iter().copied()))
            .collect::<Vec<_>>();

        if accepted.is_empty() {
            return RegularOutcome::Infeasible;
        }

        RegularOutcome::Pruned(
            domains
                .iter()
                .enumerate()
                .map(|(position, domain)| {
                    domain
                        .iter()
                        .copied()
                        .filter(|&value| {
                            accepted.iter().all(|sequence| sequence[position] != value)
                        })
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn full_domains_are_not_pruned() {
        let domains = vec![vec![0, 1]; 3];

        assert_eq!(
            RegularOutcome::Pruned(vec![vec![]; 3]),
            check_regular(&zeros_then_ones(), &domains)
        );
    }

    #[test]
    fn one_before_zero_is_infeasible() {
        let domains = vec![vec![1], vec![0, 1], vec![0]];

        assert_eq!(
            RegularOutcome::Infeasible,
            check_regular(&zeros_then_ones(), &domains)
        );
    }

    #[test]
    fn unsupported_values_are_pruned() {
        let domains = vec![vec![0, 1], vec![0, 1], vec![0]];

        assert_eq!(
            RegularOutcome::Pruned(vec![vec![1], vec![1], vec![]]),
            check_regular(&zeros_then_ones(), &domains)
        );
    }

    #[test]
    fn values_outside_the_alphabet_are_pruned() {
        let domains = vec![vec![0, 5], vec![1, 7]];

        assert_eq!(
            RegularOutcome::Pruned(vec![vec![5], vec![7]]),
            check_regular(&zeros_then_ones(), &domains)
        );
    }

    #[test]
    fn empty_sequence_depends_on_the_initial_state() {
        assert_eq!(
            RegularOutcome::Pruned(vec![]),
            check_regular(&zeros_then_ones(), &[])
        );

        let non_empty = Automaton::from_regex("1+").expect("valid expression");
        assert_eq!(RegularOutcome::Infeasible, check_regular(&non_empty, &[]));
    }

    #[test]
    fn agrees_with_enumeration_on_all_small_domains() {
        let automaton = Automaton::from_regex("(0[12]|1)*2?|2{2,}").expect("valid expression");
        let choices = [0, 1, 2]
            .into_iter()
            .powerset()
            .filter(|values| !values.is_empty())
            .collect::<Vec<_>>();

        for domains in itertools::repeat_n(choices, 3).multi_cartesian_product() {
            assert_eq!(
                brute_force(&automaton, &domains),
                check_regular(&automaton, &domains),
                "domains: {domains:?}"
            );
        }
    }

    #[test]
    fn pruning_is_idempotent() {
        let automaton = Automaton::from_regex("(0[12]|1)*").expect("valid expression");
        let mut domains = vec![vec![0, 1, 2], vec![0, 1], vec![1, 2], vec![1, 2]];

        let RegularOutcome::Pruned(pruned) = check_regular(&automaton, &domains) else {
            panic!("1 1 1 1 is accepted");
        };
        for (domain, removed) in domains.iter_mut().zip(pruned) {
            domain.retain(|value| !removed.contains(value));
        }

        assert_eq!(
            RegularOutcome::Pruned(vec![vec![]; 4]),
            check_regular(&automaton, &domains)
        );
    }

    #[test]
    fn partial_recomputation_matches_a_full_computation() {
        let automaton = Automaton::from_regex("(0[12]|1)*").expect("valid expression");
        let mut domains = vec![vec![0, 1, 2]; 5];
        let mut graph = LayeredGraph::compute(&automaton, &domains);

        domains[2] = vec![0];
        let _ = graph.recompute_forward(&automaton, &domains, 2);
        let _ = graph.recompute_backward(&automaton, &domains, 2);

        assert_eq!(LayeredGraph::compute(&automaton, &domains), graph);
    }
}
