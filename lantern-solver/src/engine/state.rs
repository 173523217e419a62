use std::sync::Arc;

use log::debug;
use thiserror::Error;

use crate::basic_types::Inconsistency;
use crate::basic_types::PropagatorConflict;
use crate::create_statistics_struct;
use crate::engine::cp::propagation::store::PropagatorStore;
use crate::engine::cp::propagation::EnqueueDecision;
use crate::engine::cp::propagation::PropagationContext;
use crate::engine::cp::propagation::PropagationContextMut;
use crate::engine::cp::propagation::Propagator;
use crate::engine::cp::propagation::PropagatorConstructor;
use crate::engine::cp::propagation::PropagatorConstructorContext;
use crate::engine::cp::propagation::PropagatorHandle;
use crate::engine::cp::propagation::PropagatorId;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::PropagatorQueue;
use crate::engine::cp::WatchListCP;
use crate::engine::predicates::predicate::Predicate;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::Literal;
use crate::engine::VariableNames;
use crate::lantern_assert_eq_simple;
use crate::lantern_assert_simple;
use crate::statistics::log_statistic;
use crate::statistics::StatisticLogger;

/// The [`State`] is the container of variables and propagators.
///
/// Domain changes are either posted directly through [`State::post`] or made by propagators
/// during [`State::propagate_to_fixed_point`]. All changes since a checkpoint are undone by
/// [`State::restore_to`].
#[derive(Debug)]
pub(crate) struct State {
    /// Tracks information related to the assignments of integer variables.
    pub(crate) assignments: Assignments,
    /// The names of the variables in the solver.
    variable_names: VariableNames,
    /// The list of propagators; propagators live here and are queried when events (domain changes)
    /// happen.
    pub(crate) propagators: PropagatorStore,
    /// Dictates the order in which propagators will be called to propagate.
    pub(crate) propagator_queue: PropagatorQueue,
    /// For every domain and event, the propagators which are notified.
    watch_list: WatchListCP,

    statistics: StateStatistics,
}

create_statistics_struct!(StateStatistics {
    /// The number of times [`Propagator::propagate`] was called.
    num_propagators_called: usize,
    /// The number of domain changes made by propagators.
    num_propagations: usize,
    /// The number of times a propagator reported a conflict or emptied a domain.
    num_conflicts: usize,
});

/// Information concerning the conflict returned by [`State::propagate_to_fixed_point`].
///
/// Two (related) conflicts can happen:
/// 1) a propagator explicitly detects a conflict.
/// 2) a propagator posts a domain change that results in a variable having an empty domain.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// A conflict raised explicitly by a propagator.
    #[error("{propagator} detected a conflict ({})", conflict.label())]
    Propagator {
        propagator: PropagatorId,
        conflict: PropagatorConflict,
    },
    /// A propagator removed the last value of a domain.
    #[error("{propagator} emptied a domain")]
    EmptyDomain { propagator: PropagatorId },
}

impl Conflict {
    /// The propagator which failed.
    pub fn propagator(&self) -> PropagatorId {
        match self {
            Conflict::Propagator { propagator, .. } | Conflict::EmptyDomain { propagator } => {
                *propagator
            }
        }
    }

    fn new(propagator: PropagatorId, inconsistency: Inconsistency) -> Conflict {
        match inconsistency {
            Inconsistency::EmptyDomain => Conflict::EmptyDomain { propagator },
            Inconsistency::Conflict(conflict) => Conflict::Propagator {
                propagator,
                conflict,
            },
        }
    }
}

impl Default for State {
    fn default() -> Self {
        let mut state = State {
            assignments: Assignments::default(),
            variable_names: VariableNames::default(),
            propagators: PropagatorStore::default(),
            propagator_queue: PropagatorQueue::default(),
            watch_list: WatchListCP::default(),
            statistics: StateStatistics::default(),
        };

        // The assignments already hold the reserved domain x0; it needs a watch list entry too.
        let reserved = Predicate::trivially_true().get_domain();
        state.register_new_domain(reserved, Some("Dummy".into()));
        lantern_assert_eq_simple!(Some(1), state.assignments.get_assigned_value(&reserved));

        state
    }
}

impl State {
    pub(crate) fn log_statistics(&self, verbose: bool) {
        log_statistic("variables", self.assignments.num_domains() - 1);
        log_statistic("propagators", self.propagators.num_propagators());
        log_statistic("failures", self.statistics.num_conflicts);
        log_statistic("propagations", self.statistics.num_propagators_called);
        log_statistic("prunedValues", self.assignments.get_pruned_value_count());
        if verbose {
            log_statistic(
                "numAtomicConstraintsPropagated",
                self.statistics.num_propagations,
            );
            for (index, propagator) in self.propagators.iter_propagators().enumerate() {
                propagator.log_statistics(StatisticLogger::new([
                    propagator.name(),
                    "number",
                    index.to_string().as_str(),
                ]));
            }
        }
    }

    /// Returns a mapping of [`DomainId`] to variable name.
    pub(crate) fn variable_names(&self) -> &VariableNames {
        &self.variable_names
    }
}

/// Operations to create variables.
impl State {
    /// Creates a new Boolean (0-1) variable.
    pub(crate) fn new_literal(&mut self, name: Option<Arc<str>>) -> Literal {
        let domain_id = self.new_interval_variable(0, 1, name);
        Literal::new(domain_id)
    }

    /// Creates a new interval variable with the given lower and upper bound.
    ///
    /// Variables can only be created at the root, i.e. before any checkpoint was made.
    pub(crate) fn new_interval_variable(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: Option<Arc<str>>,
    ) -> DomainId {
        let domain_id = self.assignments.grow(lower_bound, upper_bound);
        self.register_new_domain(domain_id, name);

        domain_id
    }

    /// Creates a new domain containing exactly the given values.
    ///
    /// Note that this is implemented as an interval domain with explicit holes in the domain. For
    /// very sparse domains, this can result in a high memory overhead.
    pub(crate) fn new_sparse_variable(
        &mut self,
        values: Vec<i32>,
        name: Option<Arc<str>>,
    ) -> DomainId {
        let domain_id = self.assignments.create_new_integer_variable_sparse(values);
        self.register_new_domain(domain_id, name);

        domain_id
    }

    fn register_new_domain(&mut self, domain_id: DomainId, name: Option<Arc<str>>) {
        if let Some(name) = name {
            self.variable_names.add_integer(domain_id, name);
        }

        self.watch_list.grow();
    }
}

/// Operations to retrieve information about values.
impl State {
    pub(crate) fn lower_bound<Var: IntegerVariable>(&self, variable: Var) -> i32 {
        variable.lower_bound(&self.assignments)
    }

    pub(crate) fn upper_bound<Var: IntegerVariable>(&self, variable: Var) -> i32 {
        variable.upper_bound(&self.assignments)
    }

    pub(crate) fn contains<Var: IntegerVariable>(&self, variable: Var, value: i32) -> bool {
        variable.contains(&self.assignments, value)
    }

    /// If the given `variable` is fixed, then [`Some`] containing the assigned value is
    /// returned. Otherwise, [`None`] is returned.
    pub(crate) fn fixed_value<Var: IntegerVariable>(&self, variable: Var) -> Option<i32> {
        self.assignments.get_assigned_value(&variable)
    }

    /// The values in the domain of `variable`, in increasing order.
    pub(crate) fn domain<Var: IntegerVariable>(&self, variable: Var) -> Vec<i32> {
        let mut values = variable.iterate_domain(&self.assignments).collect::<Vec<_>>();
        values.sort_unstable();
        values
    }

    /// Returns the truth value of the provided [`Predicate`], or [`None`] if it is undecided.
    pub(crate) fn truth_value(&self, predicate: Predicate) -> Option<bool> {
        self.assignments.evaluate_predicate(predicate)
    }

    /// Returns the truth value of the provided [`Literal`], or [`None`] if it is unassigned.
    pub(crate) fn get_literal_value(&self, literal: Literal) -> Option<bool> {
        self.truth_value(literal.get_true_predicate())
    }

    /// Returns the number of created checkpoints.
    pub(crate) fn get_checkpoint(&self) -> usize {
        self.assignments.get_checkpoint()
    }
}

/// Operations for propagators.
impl State {
    /// Creates the propagator and enqueues it. It first runs in the next call to
    /// [`State::propagate_to_fixed_point`].
    pub(crate) fn add_propagator<Constructor: PropagatorConstructor>(
        &mut self,
        constructor: Constructor,
    ) -> PropagatorHandle<Constructor::PropagatorImpl> {
        let id = self.propagators.next_id();

        let mut constructor_context =
            PropagatorConstructorContext::new(&mut self.watch_list, id, &self.assignments);
        let propagator = constructor.create(&mut constructor_context);

        let priority = propagator.priority();
        lantern_assert_simple!(priority <= 3, "propagator priority {priority} is out of range");
        debug!("Adding {} as {id}", propagator.name());

        let handle = self.propagators.add(propagator);
        lantern_assert_eq_simple!(handle.untyped(), id);

        self.propagator_queue.enqueue_propagator(id, priority);

        handle
    }
}

/// Operations for modifying the state.
impl State {
    /// Makes `predicate` true without propagating; returns whether a domain changed.
    pub(crate) fn post(&mut self, predicate: Predicate) -> Result<bool, EmptyDomain> {
        self.assignments.post_predicate(predicate)
    }

    /// Only allowed at a fixed point.
    pub(crate) fn new_checkpoint(&mut self) {
        lantern_assert_simple!(
            self.propagator_queue.is_empty(),
            "checkpoints are created at a fixed point"
        );
        self.assignments.new_checkpoint();
    }

    /// Undoes every domain change made since `checkpoint`, and lets every propagator repair its
    /// state. Panics for a checkpoint that does not exist yet.
    pub(crate) fn restore_to(&mut self, checkpoint: usize) {
        lantern_assert_simple!(checkpoint <= self.get_checkpoint());

        if checkpoint == self.get_checkpoint() {
            return;
        }

        self.assignments.synchronise(checkpoint);
        self.propagator_queue.clear();

        for propagator in self.propagators.iter_propagators_mut() {
            propagator.synchronise(PropagationContext::new(&self.assignments));
        }
    }

    /// Runs one propagator and notifies the watchers of whatever it changed.
    fn propagate(&mut self, propagator_id: PropagatorId) -> Result<(), Conflict> {
        self.statistics.num_propagators_called += 1;
        let trail_length = self.assignments.num_trail_entries();

        let status = self.propagators[propagator_id]
            .propagate(PropagationContextMut::new(&mut self.assignments));
        self.statistics.num_propagations += self.assignments.num_trail_entries() - trail_length;

        status.map_err(|inconsistency| {
            self.statistics.num_conflicts += 1;
            Conflict::new(propagator_id, inconsistency)
        })?;
        self.notify_propagators_about_domain_events();

        Ok(())
    }

    /// Runs enqueued propagators until none is left.
    ///
    /// Posted predicates and new propagators only take effect here. After a [`Conflict`] the
    /// state has to be restored to an earlier checkpoint.
    pub(crate) fn propagate_to_fixed_point(&mut self) -> Result<(), Conflict> {
        self.notify_propagators_about_domain_events();

        while let Some(propagator_id) = self.propagator_queue.pop() {
            self.propagate(propagator_id)?;
        }

        Ok(())
    }

    pub(crate) fn notify_propagators_about_domain_events(&mut self) {
        let events = self.assignments.drain_domain_events().collect::<Vec<_>>();

        for (event, domain) in events {
            for &watcher in self.watch_list.get_affected_propagators(event, domain) {
                let propagator = &mut self.propagators[watcher.propagator];
                let decision = propagator.notify(
                    PropagationContext::new(&self.assignments),
                    watcher.variable,
                    event.into(),
                );

                if decision == EnqueueDecision::Enqueue {
                    self.propagator_queue
                        .enqueue_propagator(watcher.propagator, propagator.priority());
                }
            }
        }
    }
}
