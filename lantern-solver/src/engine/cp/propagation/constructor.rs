use super::LocalId;
use super::PropagationContext;
use super::Propagator;
use super::PropagatorId;
use super::PropagatorVarId;
use crate::engine::cp::DomainEvents;
use crate::engine::cp::WatchListCP;
use crate::engine::cp::Watchers;
use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;

/// The arguments of a [`Propagator`], which turn into the propagator once it is added to the
/// solver.
///
/// Creating the propagator is the only moment it can subscribe to domain events, and it can read
/// the current domains to initialise its incremental state.
pub(crate) trait PropagatorConstructor {
    type PropagatorImpl: Propagator;

    fn create(self, context: &mut PropagatorConstructorContext) -> Self::PropagatorImpl;
}

/// Handed to [`PropagatorConstructor::create`] to subscribe to domain events and read domains.
#[derive(Debug)]
pub(crate) struct PropagatorConstructorContext<'a> {
    watch_list: &'a mut WatchListCP,
    propagator_id: PropagatorId,
    /// One past the largest [`LocalId`] registered so far.
    next_local_id: LocalId,
    assignments: &'a Assignments,
}

impl PropagatorConstructorContext<'_> {
    pub(crate) fn new<'a>(
        watch_list: &'a mut WatchListCP,
        propagator_id: PropagatorId,
        assignments: &'a Assignments,
    ) -> PropagatorConstructorContext<'a> {
        PropagatorConstructorContext {
            watch_list,
            propagator_id,
            next_local_id: LocalId::from(0),
            assignments,
        }
    }

    pub(crate) fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext::new(self.assignments)
    }

    /// Calls [`Propagator::notify`] with `local_id` whenever one of `domain_events` happens to
    /// `var`.
    ///
    /// Distinct variables need distinct ids; usually the id is the position of the variable in
    /// the propagator.
    pub(crate) fn register<Var: IntegerVariable>(
        &mut self,
        var: Var,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) {
        if local_id >= self.next_local_id {
            self.next_local_id = LocalId::from(local_id.unpack() + 1);
        }

        let watcher = PropagatorVarId {
            propagator: self.propagator_id,
            variable: local_id,
        };
        var.watch_all(
            &mut Watchers::new(watcher, self.watch_list),
            domain_events.events(),
        );
    }

    /// A [`LocalId`] which no variable was registered with yet.
    pub(crate) fn get_next_local_id(&self) -> LocalId {
        self.next_local_id
    }
}
