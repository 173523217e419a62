use std::fmt::Debug;

use enumset::EnumSet;

use super::TransformableVariable;
use crate::engine::cp::DomainEvent;
use crate::engine::cp::OpaqueDomainEvent;
use crate::engine::cp::Watchers;
use crate::engine::predicates::predicate_constructor::PredicateConstructor;
use crate::engine::Assignments;

/// Anything a propagator can read and prune as an integer: a [`DomainId`](super::DomainId) or a
/// view over one.
pub trait IntegerVariable:
    Clone + Debug + PredicateConstructor<Value = i32> + TransformableVariable<Self::AffineView>
{
    type AffineView: IntegerVariable;

    fn lower_bound(&self, assignments: &Assignments) -> i32;

    fn upper_bound(&self, assignments: &Assignments) -> i32;

    fn contains(&self, assignments: &Assignments, value: i32) -> bool;

    /// Iterate over the values of the domain, in increasing order of the underlying domain.
    fn iterate_domain(&self, assignments: &Assignments) -> impl Iterator<Item = i32>;

    /// Register a watch for this variable on the given domain events.
    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>);

    /// Decode a domain event for this variable.
    fn unpack_event(&self, event: OpaqueDomainEvent) -> DomainEvent;
}
