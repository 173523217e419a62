use crate::propagators::regular::RegularPropagatorOptions;
#[cfg(doc)]
use crate::Solver;

/// The options which configure a [`Solver`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SolverOptions {
    /// The options used by regular constraints which do not specify their own.
    pub regular: RegularPropagatorOptions,
}
