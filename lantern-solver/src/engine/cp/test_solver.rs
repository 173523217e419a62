//! A [`State`] wrapper for unit tests of propagators: set up domains, add a propagator and poke
//! at it.
use super::propagation::EnqueueDecision;
use super::propagation::Propagator;
use super::propagation::PropagatorConstructor;
use super::propagation::PropagatorHandle;
use crate::engine::predicates::predicate::Predicate;
use crate::engine::predicates::predicate_constructor::PredicateConstructor;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::Literal;
use crate::engine::Conflict;
use crate::engine::EmptyDomain;
use crate::engine::State;

#[derive(Debug, Default)]
pub(crate) struct TestSolver {
    state: State,
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lb: i32, ub: i32) -> DomainId {
        self.state.new_interval_variable(lb, ub, None)
    }

    pub(crate) fn new_literal(&mut self) -> Literal {
        self.state.new_literal(None)
    }

    /// Adds the propagator and runs it to a fixed point.
    pub(crate) fn new_propagator<Constructor: PropagatorConstructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorHandle<Constructor::PropagatorImpl>, Conflict> {
        let handle = self.state.add_propagator(constructor);
        self.propagate()?;
        Ok(handle)
    }

    pub(crate) fn propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> &P {
        self.state
            .propagators
            .get_propagator(handle)
            .expect("the handle was created by this solver")
    }

    pub(crate) fn domain<Var: IntegerVariable>(&self, var: Var) -> Vec<i32> {
        self.state.domain(var)
    }

    pub(crate) fn contains<Var: IntegerVariable>(&self, var: Var, value: i32) -> bool {
        self.state.contains(var, value)
    }

    #[track_caller]
    pub(crate) fn assert_bounds<Var: IntegerVariable>(&self, var: Var, lb: i32, ub: i32) {
        let actual = (
            self.state.lower_bound(var.clone()),
            self.state.upper_bound(var.clone()),
        );
        assert_eq!((lb, ub), actual, "bounds of {var:?}");
    }

    fn post(&mut self, predicate: Predicate) -> Result<(), EmptyDomain> {
        self.state.post(predicate).map(|_| ())
    }

    pub(crate) fn remove<Var: IntegerVariable>(
        &mut self,
        var: Var,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        self.post(var.disequality_predicate(value))
    }

    pub(crate) fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        var: Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        self.post(var.lower_bound_predicate(bound))
    }

    pub(crate) fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        self.post(var.upper_bound_predicate(bound))
    }

    pub(crate) fn set_literal(&mut self, literal: Literal, value: bool) -> Result<(), EmptyDomain> {
        if value {
            self.post(literal.get_true_predicate())
        } else {
            self.post(literal.get_false_predicate())
        }
    }

    pub(crate) fn is_literal_false(&self, literal: Literal) -> bool {
        self.state.get_literal_value(literal) == Some(false)
    }

    /// Removes `value` from `var` and notifies the watchers, without propagating. Returns whether
    /// the propagator behind `handle` ended up in the queue.
    pub(crate) fn remove_and_notify<P: Propagator, Var: IntegerVariable>(
        &mut self,
        handle: PropagatorHandle<P>,
        var: Var,
        value: i32,
    ) -> EnqueueDecision {
        self.remove(var, value)
            .expect("a propagator is never notified of an empty domain");
        self.state.notify_propagators_about_domain_events();

        if self
            .state
            .propagator_queue
            .is_propagator_enqueued(handle.untyped())
        {
            EnqueueDecision::Enqueue
        } else {
            EnqueueDecision::Skip
        }
    }

    pub(crate) fn propagate(&mut self) -> Result<(), Conflict> {
        self.state.propagate_to_fixed_point()
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.state.new_checkpoint();
    }

    pub(crate) fn restore_to(&mut self, checkpoint: usize) {
        self.state.restore_to(checkpoint);
    }
}
