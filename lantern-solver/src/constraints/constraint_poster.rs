use log::warn;

use super::Constraint;
use super::NegatableConstraint;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::Solver;

/// Decides how a [`Constraint`] is added to the [`Solver`]: as-is with [`ConstraintPoster::post`],
/// or (half) reified with [`ConstraintPoster::implied_by`] and [`ConstraintPoster::reify`].
///
/// Obtained through [`Solver::add_constraint`]. A poster which is dropped without being used does
/// not add anything and logs a warning.
#[derive(Debug)]
pub struct ConstraintPoster<'solver, ConstraintImpl> {
    solver: &'solver mut Solver,
    /// `None` once the constraint was handed to the solver.
    constraint: Option<ConstraintImpl>,
}

impl<'solver, ConstraintImpl> ConstraintPoster<'solver, ConstraintImpl> {
    pub(crate) fn new(solver: &'solver mut Solver, constraint: ConstraintImpl) -> Self {
        ConstraintPoster {
            solver,
            constraint: Some(constraint),
        }
    }

    fn consume(
        mut self,
        add: impl FnOnce(ConstraintImpl, &mut Solver) -> Result<(), ConstraintOperationError>,
    ) -> Result<(), ConstraintOperationError> {
        match self.constraint.take() {
            Some(constraint) => add(constraint, &mut *self.solver),
            None => Ok(()),
        }
    }
}

impl<ConstraintImpl: Constraint> ConstraintPoster<'_, ConstraintImpl> {
    /// Adds the constraint itself.
    ///
    /// Fails with [`ConstraintOperationError::InfeasiblePropagator`] if propagating the
    /// constraint empties a domain, and with [`ConstraintOperationError::InfeasibleState`] if the
    /// solver was already infeasible.
    pub fn post(self) -> Result<(), ConstraintOperationError> {
        self.consume(|constraint, solver| constraint.post(solver))
    }

    /// Adds `reification_literal -> constraint`.
    pub fn implied_by(self, reification_literal: Literal) -> Result<(), ConstraintOperationError> {
        self.consume(|constraint, solver| constraint.implied_by(solver, reification_literal))
    }
}

impl<ConstraintImpl: NegatableConstraint> ConstraintPoster<'_, ConstraintImpl> {
    /// Adds `reification_literal <-> constraint`.
    pub fn reify(self, reification_literal: Literal) -> Result<(), ConstraintOperationError> {
        self.consume(|constraint, solver| constraint.reify(solver, reification_literal))
    }
}

impl<ConstraintImpl> Drop for ConstraintPoster<'_, ConstraintImpl> {
    fn drop(&mut self) {
        if self.constraint.is_some() {
            warn!("A constraint was created but never added to the solver");
        }
    }
}
