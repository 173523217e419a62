//! Defines the constraints that can be added to the [`Solver`].
//!
//! Every constraint is enforced by one or more propagators, which remove the values from the
//! domains that cannot be part of any solution of the constraint.
//!
//! # Example
//! ```
//! # use lantern_solver::automaton::Automaton;
//! # use lantern_solver::constraints;
//! # use lantern_solver::Solver;
//! let mut solver = Solver::default();
//!
//! let x = (0..3)
//!     .map(|_| solver.new_bounded_integer(0, 1))
//!     .collect::<Vec<_>>();
//! let automaton = Automaton::from_regex("0*1*").expect("valid expression");
//!
//! solver
//!     .add_constraint(constraints::regular(x, automaton))
//!     .post()
//!     .expect("the constraint is feasible");
//! ```
//!
//! Propagators cannot be implemented outside of this crate; new constraints are built by
//! combining the ones defined here.

mod arithmetic;
mod constraint_poster;
mod regular;

pub use arithmetic::*;
pub use constraint_poster::*;
pub use regular::*;

use crate::engine::cp::propagation::PropagatorConstructor;
use crate::propagators::ReifiedPropagatorArgs;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::Solver;

/// A relation over variables which can be added to the [`Solver`].
///
/// Every propagator constructor of the crate is a [`Constraint`], and so is a [`Vec`] of
/// constraints. Adding a constraint propagates it straight away.
pub trait Constraint {
    /// Adds the [`Constraint`] to the [`Solver`].
    ///
    /// Fails when the [`Solver`] is infeasible afterwards, or was infeasible already.
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError>;

    /// Adds `reification_literal -> constraint` to the [`Solver`]. The constraint is only
    /// propagated once the literal is true. The literal is set to false once the propagators
    /// detect that the constraint can no longer be satisfied.
    fn implied_by(
        self,
        solver: &mut Solver,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError>;
}

impl<ConcretePropagator> Constraint for ConcretePropagator
where
    ConcretePropagator: PropagatorConstructor + 'static,
{
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        solver.add_propagator(self)
    }

    fn implied_by(
        self,
        solver: &mut Solver,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError> {
        solver.add_propagator(ReifiedPropagatorArgs {
            propagator: self,
            reification_literal,
        })
    }
}

impl<C: Constraint> Constraint for Vec<C> {
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        self.into_iter().try_for_each(|c| c.post(solver))
    }

    fn implied_by(
        self,
        solver: &mut Solver,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError> {
        self.into_iter()
            .try_for_each(|c| c.implied_by(solver, reification_literal))
    }
}

/// A [`Constraint`] whose negation can also be posted, which allows it to be fully reified.
///
/// For example, the negation of `a = b` is `a != b`.
pub trait NegatableConstraint: Constraint {
    type NegatedConstraint: NegatableConstraint + 'static;

    fn negation(&self) -> Self::NegatedConstraint;

    /// Adds `reification_literal <-> constraint`, as the constraint implied by the literal
    /// together with the negation implied by the negated literal.
    fn reify(
        self,
        solver: &mut Solver,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError>
    where
        Self: Sized,
    {
        let negation = self.negation();

        self.implied_by(solver, reification_literal)?;
        negation.implied_by(solver, !reification_literal)
    }
}
