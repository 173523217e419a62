//! Contains the propagator implementations that are used in the solver.
pub(crate) mod arithmetic;
pub(crate) mod regular;
mod reified_propagator;

pub(crate) use reified_propagator::ReifiedPropagatorArgs;
