use std::sync::Arc;

use log::debug;
use log::trace;

use super::layered_graph::check_regular;
use super::layered_graph::LayeredGraph;
use super::layered_graph::RegularOutcome;
use super::RegularFiltering;
use super::RegularPropagatorOptions;
use crate::automaton::Automaton;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorConflict;
use crate::create_statistics_struct;
use crate::engine::cp::propagation::EnqueueDecision;
use crate::engine::cp::propagation::LocalId;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorConstructor;
use crate::engine::cp::propagation::PropagatorConstructorContext;
use crate::engine::cp::propagation::ReadDomains;
use crate::engine::cp::DomainEvents;
use crate::engine::cp::OpaqueDomainEvent;
use crate::engine::variables::IntegerVariable;
use crate::lantern_assert_advanced;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(RegularStatistics {
    /// The number of times the propagator was called.
    num_calls: usize,
    /// The number of values removed from the domains.
    num_pruned_values: usize,
    /// The number of calls which found that no accepted sequence remains.
    num_failures: usize,
    /// The number of layers of the layered graph which were (re)computed.
    num_layers_recomputed: usize,
});

/// The [`PropagatorConstructor`] for the [`RegularPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct RegularPropagatorArgs<Var> {
    pub(crate) variables: Box<[Var]>,
    pub(crate) automaton: Arc<Automaton>,
    pub(crate) options: RegularPropagatorOptions,
}

impl<Var: IntegerVariable + 'static> PropagatorConstructor for RegularPropagatorArgs<Var> {
    type PropagatorImpl = RegularPropagator<Var>;

    fn create(self, context: &mut PropagatorConstructorContext) -> Self::PropagatorImpl {
        for (index, variable) in self.variables.iter().enumerate() {
            context.register(
                variable.clone(),
                DomainEvents::ANY_INT,
                LocalId::from(index as u32),
            );
        }

        let num_positions = self.variables.len();

        // The graph is completed on the first call to `propagate`.
        RegularPropagator {
            graph: LayeredGraph::new(&self.automaton, num_positions),
            domains: vec![vec![]; num_positions],
            changed_positions: (num_positions > 0).then(|| (0, num_positions - 1)),
            variables: self.variables,
            automaton: self.automaton,
            filtering: self.options.filtering,
            statistics: RegularStatistics::default(),
        }
    }
}

/// Propagator for the constraint that the sequence of values taken by `variables` is accepted by
/// `automaton`. It removes every value which is not part of an accepted sequence within the
/// current domains, i.e. it achieves domain consistency.
///
/// The propagator unfolds the automaton into a [`LayeredGraph`] over the domains. With
/// [`RegularFiltering::Incremental`] the graph is kept between calls, and only the layers which
/// depend on a changed domain are recomputed.
#[derive(Clone, Debug)]
pub(crate) struct RegularPropagator<Var> {
    variables: Box<[Var]>,
    automaton: Arc<Automaton>,
    filtering: RegularFiltering,

    /// The domains for which `graph` was computed. This is incremental state.
    domains: Vec<Vec<i32>>,
    graph: LayeredGraph,
    /// The first and last position whose domain changed since `graph` was computed.
    changed_positions: Option<(usize, usize)>,

    statistics: RegularStatistics,
}

impl<Var: IntegerVariable> RegularPropagator<Var> {
    fn read_domains(&self, context: PropagationContext) -> Vec<Vec<i32>> {
        self.variables
            .iter()
            .map(|variable| read_domain(context, variable))
            .collect()
    }

    fn mark_changed(&mut self, position: usize) {
        self.changed_positions = Some(match self.changed_positions {
            Some((first, last)) => (first.min(position), last.max(position)),
            None => (position, position),
        });
    }

    /// Brings the layered graph up to date with the current domains.
    fn update_graph(&mut self, context: PropagationContext) {
        let Some((first, last)) = self.changed_positions.take() else {
            return;
        };

        for position in first..=last {
            self.domains[position] = read_domain(context, &self.variables[position]);
        }

        let forward = self
            .graph
            .recompute_forward(&self.automaton, &self.domains, first);
        let backward = self
            .graph
            .recompute_backward(&self.automaton, &self.domains, last);
        self.statistics.num_layers_recomputed += forward + backward;

        lantern_assert_advanced!(
            self.graph == LayeredGraph::compute(&self.automaton, &self.read_domains(context)),
            "incremental layered graph differs from the one computed from scratch"
        );
    }
}

impl<Var: IntegerVariable + 'static> Propagator for RegularPropagator<Var> {
    fn name(&self) -> &str {
        "Regular"
    }

    fn notify(
        &mut self,
        _context: PropagationContext,
        local_id: LocalId,
        _event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        self.mark_changed(local_id.unpack() as usize);

        EnqueueDecision::Enqueue
    }

    fn synchronise(&mut self, _context: PropagationContext) {
        if !self.variables.is_empty() {
            self.changed_positions = Some((0, self.variables.len() - 1));
        }
    }

    fn detect_inconsistency(&self, context: PropagationContext) -> Option<PropagatorConflict> {
        let graph = LayeredGraph::compute(&self.automaton, &self.read_domains(context));

        (!graph.is_feasible(&self.automaton)).then(no_accepted_sequence)
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        self.statistics.num_calls += 1;

        let outcome = match self.filtering {
            RegularFiltering::Incremental => {
                self.update_graph(context.as_readonly());
                self.graph.outcome(&self.automaton, &self.domains)
            }
            RegularFiltering::FromScratch => {
                let domains = self.read_domains(context.as_readonly());
                self.statistics.num_layers_recomputed += 2 * domains.len();
                check_regular(&self.automaton, &domains)
            }
        };

        if outcome == RegularOutcome::Infeasible {
            self.statistics.num_failures += 1;
            debug!(
                "Regular over {} variables has no accepted sequence left",
                self.variables.len()
            );
        }

        let num_pruned = apply_outcome(&self.variables, &mut context, outcome)?;
        self.statistics.num_pruned_values += num_pruned;
        trace!("Regular removed {num_pruned} values");

        Ok(())
    }

    fn debug_propagate_from_scratch(
        &self,
        mut context: PropagationContextMut,
    ) -> PropagationStatusCP {
        let domains = self.read_domains(context.as_readonly());
        let outcome = check_regular(&self.automaton, &domains);

        apply_outcome(&self.variables, &mut context, outcome).map(|_| ())
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }
}

fn no_accepted_sequence() -> PropagatorConflict {
    PropagatorConflict::new("no accepted sequence")
}

/// The domain of `variable` in increasing order.
fn read_domain<Var: IntegerVariable>(context: PropagationContext, variable: &Var) -> Vec<i32> {
    let mut domain = context.iterate_domain(variable).collect::<Vec<_>>();
    domain.sort_unstable();
    domain
}

/// Removes the pruned values of the outcome, and returns how many values were removed.
fn apply_outcome<Var: IntegerVariable>(
    variables: &[Var],
    context: &mut PropagationContextMut,
    outcome: RegularOutcome,
) -> Result<usize, Inconsistency> {
    let RegularOutcome::Pruned(pruned) = outcome else {
        return Err(no_accepted_sequence().into());
    };

    let mut num_pruned = 0;
    for (variable, values) in variables.iter().zip(pruned) {
        for value in values {
            context.remove(variable, value)?;
            num_pruned += 1;
        }
    }

    Ok(num_pruned)
}
