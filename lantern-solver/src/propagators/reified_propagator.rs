use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorConflict;
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
use crate::engine::variables::Literal;
use crate::lantern_assert_simple;
use crate::statistics::StatisticLogger;

/// The [`PropagatorConstructor`] for the [`ReifiedPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct ReifiedPropagatorArgs<InnerArgs> {
    pub(crate) propagator: InnerArgs,
    pub(crate) reification_literal: Literal,
}

impl<InnerArgs, Inner> PropagatorConstructor for ReifiedPropagatorArgs<InnerArgs>
where
    InnerArgs: PropagatorConstructor<PropagatorImpl = Inner>,
    Inner: Propagator,
{
    type PropagatorImpl = ReifiedPropagator<Inner>;

    fn create(self, context: &mut PropagatorConstructorContext) -> Self::PropagatorImpl {
        let inner = self.propagator.create(context);

        // Registered after the inner propagator so the id is larger than any of its ids.
        let literal_id = context.get_next_local_id();
        context.register(self.reification_literal, DomainEvents::BOUNDS, literal_id);

        ReifiedPropagator {
            name: format!("Reified({})", inner.name()),
            inner,
            literal: self.reification_literal,
            literal_id,
        }
    }
}

/// Propagator for the half-reified constraint `r -> p`.
///
/// The inner propagator `p` only runs once `r` is true. While `r` is unassigned, an inconsistency
/// reported through [`Propagator::detect_inconsistency`] of `p` fixes `r` to false.
#[derive(Clone, Debug)]
pub(crate) struct ReifiedPropagator<Inner> {
    inner: Inner,
    literal: Literal,
    literal_id: LocalId,
    name: String,
}

impl<Inner: Propagator> ReifiedPropagator<Inner> {
    /// Fixes the literal to false when it is unassigned and the inner propagator cannot be
    /// satisfied.
    fn refute_literal(&self, context: &mut PropagationContextMut<'_>) -> PropagationStatusCP {
        if !context.is_literal_fixed(&self.literal)
            && self.inner.detect_inconsistency(context.as_readonly()).is_some()
        {
            context.assign_literal(&self.literal, false)?;
        }

        Ok(())
    }

    fn is_enabled(&self, context: &PropagationContextMut<'_>) -> bool {
        context.is_literal_true(&self.literal)
    }
}

impl<Inner: Propagator> Propagator for ReifiedPropagator<Inner> {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u32 {
        self.inner.priority()
    }

    fn notify(
        &mut self,
        context: PropagationContext,
        local_id: LocalId,
        event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        if local_id == self.literal_id {
            return EnqueueDecision::Enqueue;
        }
        lantern_assert_simple!(local_id < self.literal_id);

        // The inner propagator keeps its incremental state up to date regardless of the literal.
        match self.inner.notify(context, local_id, event) {
            EnqueueDecision::Skip => EnqueueDecision::Skip,
            EnqueueDecision::Enqueue if context.is_literal_true(&self.literal) => {
                EnqueueDecision::Enqueue
            }
            EnqueueDecision::Enqueue
                if !context.is_literal_false(&self.literal)
                    && self.inner.detect_inconsistency(context).is_some() =>
            {
                EnqueueDecision::Enqueue
            }
            EnqueueDecision::Enqueue => EnqueueDecision::Skip,
        }
    }

    fn synchronise(&mut self, context: PropagationContext) {
        self.inner.synchronise(context);
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        self.refute_literal(&mut context)?;

        if self.is_enabled(&context) {
            self.inner.propagate(context)?;
        }

        Ok(())
    }

    fn debug_propagate_from_scratch(
        &self,
        mut context: PropagationContextMut,
    ) -> PropagationStatusCP {
        self.refute_literal(&mut context)?;

        if self.is_enabled(&context) {
            self.inner.debug_propagate_from_scratch(context)?;
        }

        Ok(())
    }

    fn detect_inconsistency(&self, context: PropagationContext) -> Option<PropagatorConflict> {
        context
            .is_literal_true(&self.literal)
            .then(|| self.inner.detect_inconsistency(context))
            .flatten()
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.inner.log_statistics(statistic_logger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cp::test_solver::TestSolver;
    use crate::engine::variables::DomainId;
    use crate::engine::Conflict;
    use crate::propagators::arithmetic::BinaryNotEqualsPropagatorArgs;
    use crate::propagators::arithmetic::LinearLessOrEqualPropagatorArgs;

    fn reified_sum_at_most(
        terms: &[DomainId],
        c: i32,
        reification_literal: Literal,
    ) -> ReifiedPropagatorArgs<LinearLessOrEqualPropagatorArgs<DomainId>> {
        ReifiedPropagatorArgs {
            propagator: LinearLessOrEqualPropagatorArgs {
                terms: terms.into(),
                rhs: c,
            },
            reification_literal,
        }
    }

    #[test]
    fn equal_fixed_values_refute_the_literal() {
        let mut solver = TestSolver::default();
        let r = solver.new_literal();
        let a = solver.new_variable(2, 2);
        let b = solver.new_variable(2, 2);

        let _ = solver
            .new_propagator(ReifiedPropagatorArgs {
                propagator: BinaryNotEqualsPropagatorArgs { a, b },
                reification_literal: r,
            })
            .expect("no conflict");

        assert!(solver.is_literal_false(r));
    }

    #[test]
    fn the_sum_is_only_propagated_once_the_literal_is_true() {
        let mut solver = TestSolver::default();
        let r = solver.new_literal();
        let x = solver.new_variable(0, 5);
        let y = solver.new_variable(2, 5);

        let _ = solver
            .new_propagator(reified_sum_at_most(&[x, y], 3, r))
            .expect("no conflict");
        solver.assert_bounds(x, 0, 5);
        solver.assert_bounds(y, 2, 5);

        solver.set_literal(r, true).expect("non-empty domain");
        solver.propagate().expect("no conflict");

        solver.assert_bounds(x, 0, 1);
        solver.assert_bounds(y, 2, 3);
    }

    #[test]
    fn a_false_literal_disables_the_sum() {
        let mut solver = TestSolver::default();
        let r = solver.new_literal();
        let x = solver.new_variable(0, 5);
        let y = solver.new_variable(2, 5);
        solver.set_literal(r, false).expect("non-empty domain");

        let _ = solver
            .new_propagator(reified_sum_at_most(&[x, y], 3, r))
            .expect("no conflict");

        solver.assert_bounds(x, 0, 5);
        solver.assert_bounds(y, 2, 5);
    }

    #[test]
    fn a_true_literal_lets_the_conflict_through() {
        let mut solver = TestSolver::default();
        let r = solver.new_literal();
        let a = solver.new_variable(1, 1);
        let b = solver.new_variable(1, 1);
        solver.set_literal(r, true).expect("non-empty domain");

        let result = solver.new_propagator(ReifiedPropagatorArgs {
            propagator: BinaryNotEqualsPropagatorArgs { a, b },
            reification_literal: r,
        });

        assert!(matches!(result, Err(Conflict::Propagator { .. })));
    }

    #[test]
    fn fixing_a_variable_enqueues_when_the_literal_can_be_refuted() {
        let mut solver = TestSolver::default();
        let r = solver.new_literal();
        let a = solver.new_variable(2, 3);
        let b = solver.new_variable(2, 2);

        let propagator = solver
            .new_propagator(ReifiedPropagatorArgs {
                propagator: BinaryNotEqualsPropagatorArgs { a, b },
                reification_literal: r,
            })
            .expect("no conflict");

        let enqueue = solver.remove_and_notify(propagator, a, 3);
        assert_eq!(EnqueueDecision::Enqueue, enqueue);
    }

    #[test]
    fn a_raised_lower_bound_refutes_the_literal_after_restoring() {
        let mut solver = TestSolver::default();
        let r = solver.new_literal();
        let x = solver.new_variable(0, 5);
        let y = solver.new_variable(1, 5);

        let _ = solver
            .new_propagator(reified_sum_at_most(&[x, y], 3, r))
            .expect("no conflict");

        solver.new_checkpoint();
        solver.set_lower_bound(x, 4).expect("non-empty domain");
        solver.propagate().expect("no conflict");
        assert!(solver.is_literal_false(r));

        solver.restore_to(0);
        solver.new_checkpoint();
        solver.set_literal(r, true).expect("non-empty domain");
        solver.propagate().expect("no conflict");

        solver.assert_bounds(x, 0, 2);
        solver.assert_bounds(y, 1, 3);
    }
}
