use downcast_rs::impl_downcast;
use downcast_rs::Downcast;

use super::LocalId;
use super::PropagationContext;
use super::PropagationContextMut;
#[cfg(doc)]
use super::PropagatorConstructorContext;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorConflict;
#[cfg(doc)]
use crate::create_statistics_struct;
use crate::engine::cp::OpaqueDomainEvent;
#[cfg(doc)]
use crate::asserts::LANTERN_ASSERT_ADVANCED;
use crate::statistics::StatisticLogger;

// Lets tests recover the concrete propagator from the `Box<dyn Propagator>` in the store.
impl_downcast!(Propagator);

/// Removes values that cannot be part of a solution of one constraint.
///
/// Only [`Propagator::name`] and [`Propagator::debug_propagate_from_scratch`] are required. A
/// propagator that keeps incremental state overrides [`Propagator::propagate`] together with
/// [`Propagator::notify`] and [`Propagator::synchronise`].
pub(crate) trait Propagator: Downcast {
    /// Used in logs and in the display of conflicts.
    fn name(&self) -> &str;

    /// Propagates from the domains alone, ignoring any internal state.
    ///
    /// Takes `&self` so it cannot corrupt that state. At assert level [`LANTERN_ASSERT_ADVANCED`]
    /// propagators compare their incremental result against this one.
    ///
    /// A fixed point is not required; the solver calls the propagator again while domains change.
    fn debug_propagate_from_scratch(&self, context: PropagationContextMut) -> PropagationStatusCP;

    /// Runs when the propagator is popped from the queue.
    ///
    /// Returns an [`Inconsistency`](crate::basic_types::Inconsistency) if a domain became empty
    /// or the propagator found the constraint violated. Defaults to
    /// [`Propagator::debug_propagate_from_scratch`].
    fn propagate(&mut self, context: PropagationContextMut) -> PropagationStatusCP {
        self.debug_propagate_from_scratch(context)
    }

    /// Receives every event registered through [`PropagatorConstructorContext::register`] and
    /// decides whether the propagator is enqueued.
    ///
    /// This is the place to update incremental state, as long as it stays cheap. Enqueues on
    /// every event by default.
    fn notify(
        &mut self,
        _context: PropagationContext,
        _local_id: LocalId,
        _event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }

    /// Called after the solver restored an earlier checkpoint; the domains may be larger than
    /// what the propagator last saw.
    fn synchronise(&mut self, _context: PropagationContext) {}

    /// Queue level in `0..=3`; level 0 runs first. Cheap propagators use low levels.
    fn priority(&self) -> u32 {
        3
    }

    /// Reports a conflict without changing any domain.
    ///
    /// Used when the propagator is reified, to fix the reification literal to false. Returning
    /// `None` is always sound since [`Propagator::propagate`] detects the conflict as well.
    fn detect_inconsistency(&self, _context: PropagationContext) -> Option<PropagatorConflict> {
        None
    }

    /// Typically the fields of a struct made with [`create_statistics_struct!`].
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}
}

/// The answer of [`Propagator::notify`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EnqueueDecision {
    Enqueue,
    Skip,
}
