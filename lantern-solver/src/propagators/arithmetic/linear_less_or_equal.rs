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
use crate::engine::variables::IntegerVariable;
use crate::lantern_assert_simple;

/// Arguments of the [`LinearLessOrEqualPropagator`] for `\sum terms_i <= rhs`.
#[derive(Clone, Debug)]
pub(crate) struct LinearLessOrEqualPropagatorArgs<Var> {
    pub(crate) terms: Box<[Var]>,
    pub(crate) rhs: i32,
}

impl<Var> PropagatorConstructor for LinearLessOrEqualPropagatorArgs<Var>
where
    Var: IntegerVariable + 'static,
{
    type PropagatorImpl = LinearLessOrEqualPropagator<Var>;

    fn create(self, context: &mut PropagatorConstructorContext) -> Self::PropagatorImpl {
        for (index, term) in self.terms.iter().enumerate() {
            context.register(
                term.clone(),
                DomainEvents::LOWER_BOUND,
                LocalId::from(index as u32),
            );
        }

        let mut propagator = LinearLessOrEqualPropagator {
            known_lower_bounds: vec![0; self.terms.len()].into(),
            terms: self.terms,
            rhs: self.rhs,
            minimum_sum: 0,
        };
        propagator.synchronise(context.as_readonly());

        propagator
    }
}

/// Bounds propagation of `\sum terms_i <= rhs`.
///
/// Only lower bounds matter: every term is capped at `rhs` minus the smallest possible sum of the
/// other terms. The smallest sum is kept up to date in [`Propagator::notify`].
#[derive(Clone, Debug)]
pub(crate) struct LinearLessOrEqualPropagator<Var> {
    terms: Box<[Var]>,
    rhs: i32,

    /// `\sum lb(terms_i)` over `known_lower_bounds`.
    minimum_sum: i64,
    known_lower_bounds: Box<[i32]>,
}

impl<Var: IntegerVariable> LinearLessOrEqualPropagator<Var> {
    fn compute_minimum_sum(&self, context: PropagationContext) -> i64 {
        self.terms
            .iter()
            .map(|term| i64::from(context.lower_bound(term)))
            .sum()
    }

    fn conflict(&self, minimum_sum: i64) -> Option<PropagatorConflict> {
        (minimum_sum > i64::from(self.rhs))
            .then(|| PropagatorConflict::new("sum exceeds the right-hand side"))
    }

    fn cap_terms(
        &self,
        context: &mut PropagationContextMut,
        minimum_sum: i64,
    ) -> PropagationStatusCP {
        if let Some(conflict) = self.conflict(minimum_sum) {
            return Err(conflict.into());
        }

        for term in self.terms.iter() {
            let slack = i64::from(self.rhs) - minimum_sum;
            let cap = i64::from(context.lower_bound(term)) + slack;
            // The cap is at least the lower bound, and the lower bound fits an i32.
            let cap = i32::try_from(cap).unwrap_or(i32::MAX);

            context.set_upper_bound(term, cap)?;
        }

        Ok(())
    }
}

impl<Var: IntegerVariable + 'static> Propagator for LinearLessOrEqualPropagator<Var> {
    fn name(&self) -> &str {
        "LinearLeq"
    }

    fn priority(&self) -> u32 {
        0
    }

    fn notify(
        &mut self,
        context: PropagationContext,
        local_id: LocalId,
        _event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        let index = local_id.unpack() as usize;
        let previous = self.known_lower_bounds[index];
        let current = context.lower_bound(&self.terms[index]);
        lantern_assert_simple!(previous <= current, "lower bounds only increase between restores");

        self.known_lower_bounds[index] = current;
        self.minimum_sum += i64::from(current - previous);

        EnqueueDecision::Enqueue
    }

    fn synchronise(&mut self, context: PropagationContext) {
        for (known, term) in self.known_lower_bounds.iter_mut().zip(self.terms.iter()) {
            *known = context.lower_bound(term);
        }
        self.minimum_sum = self.compute_minimum_sum(context);
    }

    fn detect_inconsistency(&self, _context: PropagationContext) -> Option<PropagatorConflict> {
        self.conflict(self.minimum_sum)
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        self.cap_terms(&mut context, self.minimum_sum)
    }

    fn debug_propagate_from_scratch(
        &self,
        mut context: PropagationContextMut,
    ) -> PropagationStatusCP {
        let minimum_sum = self.compute_minimum_sum(context.as_readonly());
        self.cap_terms(&mut context, minimum_sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cp::test_solver::TestSolver;
    use crate::engine::variables::DomainId;
    use crate::engine::variables::TransformableVariable;

    fn sum_at_most<Var>(
        terms: impl Into<Box<[Var]>>,
        rhs: i32,
    ) -> LinearLessOrEqualPropagatorArgs<Var> {
        LinearLessOrEqualPropagatorArgs {
            terms: terms.into(),
            rhs,
        }
    }

    #[test]
    fn upper_bounds_are_capped_by_the_slack() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 5);
        let y = solver.new_variable(0, 10);

        let _ = solver
            .new_propagator(sum_at_most([x, y], 7))
            .expect("no empty domains");

        solver.assert_bounds(x, 1, 5);
        solver.assert_bounds(y, 0, 6);
    }

    #[test]
    fn tightened_lower_bounds_are_propagated_incrementally() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 5);
        let y = solver.new_variable(0, 10);

        let _ = solver
            .new_propagator(sum_at_most([x, y], 7))
            .expect("no empty domains");

        solver.set_lower_bound(x, 4).expect("non-empty domain");
        solver.propagate().expect("no conflict");

        solver.assert_bounds(y, 0, 3);
    }

    #[test]
    fn negated_terms_bound_the_variable_from_below() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let y = solver.new_variable(4, 6);

        // y - x <= 1
        let _ = solver
            .new_propagator(sum_at_most([y.scaled(1), x.scaled(-1)], 1))
            .expect("no empty domains");

        solver.assert_bounds(x, 3, 10);
        solver.assert_bounds(y, 4, 6);
    }

    #[test]
    fn violated_sum_is_a_conflict() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(3, 5);
        let y = solver.new_variable(5, 10);

        let result = solver.new_propagator(sum_at_most::<DomainId>([x, y], 7));

        assert!(result.is_err());
    }

    #[test]
    fn restoring_recalculates_the_minimum_sum() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 5);
        let y = solver.new_variable(0, 10);

        let handle = solver
            .new_propagator(sum_at_most([x, y], 7))
            .expect("no empty domains");

        solver.new_checkpoint();
        solver.set_lower_bound(y, 5).expect("non-empty domain");
        solver.propagate().expect("no conflict");
        solver.assert_bounds(x, 0, 2);

        solver.restore_to(0);
        assert_eq!(0, solver.propagator(handle).minimum_sum);
        solver.assert_bounds(x, 0, 5);
    }
}
