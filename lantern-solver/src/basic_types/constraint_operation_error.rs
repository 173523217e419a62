use thiserror::Error;

#[cfg(doc)]
use crate::Solver;

/// The reasons adding a constraint to the [`Solver`] can fail.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    /// The [`Solver`] had already found a conflict, so nothing can be added until it is restored
    /// to an earlier checkpoint.
    #[error("the solver is infeasible, no constraints can be added")]
    InfeasibleState,
    /// Propagating the new constraint emptied a domain at the root.
    #[error("the constraint is infeasible at the root")]
    InfeasiblePropagator,
    /// An auxiliary variable would need values outside of the `i32` range.
    #[error("the bounds of the scalar product do not fit an i32")]
    ScalarProductOutOfRange,
}
