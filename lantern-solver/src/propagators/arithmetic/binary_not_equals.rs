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

/// Arguments of the [`BinaryNotEqualsPropagator`] for `a != b`.
#[derive(Clone, Debug)]
pub(crate) struct BinaryNotEqualsPropagatorArgs<A, B> {
    pub(crate) a: A,
    pub(crate) b: B,
}

impl<A, B> PropagatorConstructor for BinaryNotEqualsPropagatorArgs<A, B>
where
    A: IntegerVariable + 'static,
    B: IntegerVariable + 'static,
{
    type PropagatorImpl = BinaryNotEqualsPropagator<A, B>;

    fn create(self, context: &mut PropagatorConstructorContext) -> Self::PropagatorImpl {
        context.register(self.a.clone(), DomainEvents::ASSIGN, LocalId::from(0));
        context.register(self.b.clone(), DomainEvents::ASSIGN, LocalId::from(1));

        BinaryNotEqualsPropagator {
            a: self.a,
            b: self.b,
            is_satisfied: false,
        }
    }
}

/// Forward checking for `a != b`: once one side is fixed its value is removed from the other.
#[derive(Clone, Debug)]
pub(crate) struct BinaryNotEqualsPropagator<A, B> {
    a: A,
    b: B,

    /// Set once the domains can no longer overlap in a single value; reset on restore.
    is_satisfied: bool,
}

impl<A: IntegerVariable, B: IntegerVariable> BinaryNotEqualsPropagator<A, B> {
    fn fixed_values(&self, context: PropagationContext) -> (Option<i32>, Option<i32>) {
        let fixed = |lower: i32, upper: i32| (lower == upper).then_some(lower);

        (
            fixed(context.lower_bound(&self.a), context.upper_bound(&self.a)),
            fixed(context.lower_bound(&self.b), context.upper_bound(&self.b)),
        )
    }

    fn are_disjoint(&self, context: PropagationContext) -> bool {
        context.upper_bound(&self.a) < context.lower_bound(&self.b)
            || context.upper_bound(&self.b) < context.lower_bound(&self.a)
    }

    /// Returns whether the constraint is entailed afterwards.
    fn forward_check(
        &self,
        context: &mut PropagationContextMut,
    ) -> Result<bool, PropagatorConflict> {
        if self.are_disjoint(context.as_readonly()) {
            return Ok(true);
        }

        match self.fixed_values(context.as_readonly()) {
            (Some(a), Some(b)) if a == b => Err(equal_values()),
            (Some(a), _) => {
                context.remove(&self.b, a).map_err(|_| equal_values())?;
                Ok(true)
            }
            (_, Some(b)) => {
                context.remove(&self.a, b).map_err(|_| equal_values())?;
                Ok(true)
            }
            (None, None) => Ok(false),
        }
    }
}

impl<A, B> Propagator for BinaryNotEqualsPropagator<A, B>
where
    A: IntegerVariable + 'static,
    B: IntegerVariable + 'static,
{
    fn name(&self) -> &str {
        "BinaryNotEq"
    }

    fn priority(&self) -> u32 {
        0
    }

    fn notify(
        &mut self,
        _context: PropagationContext,
        _local_id: LocalId,
        _event: OpaqueDomainEvent,
    ) -> EnqueueDecision {
        if self.is_satisfied {
            EnqueueDecision::Skip
        } else {
            EnqueueDecision::Enqueue
        }
    }

    fn synchronise(&mut self, _context: PropagationContext) {
        self.is_satisfied = false;
    }

    fn detect_inconsistency(&self, context: PropagationContext) -> Option<PropagatorConflict> {
        match self.fixed_values(context) {
            (Some(a), Some(b)) if a == b => Some(equal_values()),
            _ => None,
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if !self.is_satisfied {
            self.is_satisfied = self.forward_check(&mut context)?;
        }
        Ok(())
    }

    fn debug_propagate_from_scratch(
        &self,
        mut context: PropagationContextMut,
    ) -> PropagationStatusCP {
        let _ = self.forward_check(&mut context)?;
        Ok(())
    }
}

fn equal_values() -> PropagatorConflict {
    PropagatorConflict::new("both variables take the same value")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cp::test_solver::TestSolver;

    #[test]
    fn fixed_value_is_removed_from_the_other_variable() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(3, 3);
        let b = solver.new_variable(1, 5);

        let _ = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect("no conflict");

        assert_eq!(vec![1, 2, 4, 5], solver.domain(b));
    }

    #[test]
    fn propagates_once_a_variable_becomes_fixed() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(1, 2);
        let b = solver.new_variable(1, 2);

        let _ = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect("no conflict");

        solver.set_upper_bound(b, 1).expect("non-empty domain");
        solver.propagate().expect("no conflict");

        solver.assert_bounds(a, 2, 2);
    }

    #[test]
    fn equal_fixed_values_are_a_conflict() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(4, 4);
        let b = solver.new_variable(4, 4);

        let result = solver.new_propagator(BinaryNotEqualsPropagatorArgs { a, b });

        assert!(result.is_err());
    }

    #[test]
    fn satisfied_constraint_skips_notifications() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(1, 2);
        let b = solver.new_variable(5, 7);

        let handle = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect("no conflict");

        let decision = solver.remove_and_notify(handle, a, 1);
        assert_eq!(EnqueueDecision::Skip, decision);
    }

    #[test]
    fn restoring_resets_the_satisfied_flag() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(1, 3);
        let b = solver.new_variable(1, 3);

        let handle = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect("no conflict");

        solver.new_checkpoint();
        solver.set_upper_bound(a, 1).expect("non-empty domain");
        solver.propagate().expect("no conflict");
        assert_eq!(vec![2, 3], solver.domain(b));
        assert!(solver.propagator(handle).is_satisfied);

        solver.restore_to(0);
        assert!(!solver.propagator(handle).is_satisfied);
        assert_eq!(vec![1, 2, 3], solver.domain(b));
    }
}
