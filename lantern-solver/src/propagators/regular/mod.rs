//! Propagation for the regular constraint, which restricts a sequence of variables to the
//! sequences accepted by a deterministic finite automaton.
mod layered_graph;
mod options;
mod regular_propagator;

pub use options::RegularFiltering;
pub use options::RegularPropagatorOptions;
pub(crate) use regular_propagator::RegularPropagatorArgs;
