//! Contains the main building blocks for propagators.
//!
//! A propagator removes values from the domains of its variables which cannot be part of any
//! solution of the constraint it represents. The solver interacts with a propagator through the
//! [`Propagator`] trait:
//! - upon creation, the [`PropagatorConstructor`] registers the variables the propagator is
//!   interested in through the [`PropagatorConstructorContext`];
//! - whenever one of those variables changes, [`Propagator::notify`] decides whether the
//!   propagator is enqueued;
//! - once popped from the queue, [`Propagator::propagate`] receives a [`PropagationContextMut`]
//!   through which it reads and shrinks domains;
//! - after restoring to an earlier checkpoint, [`Propagator::synchronise`] lets the propagator
//!   repair its internal state.

mod constructor;
mod ids;
mod propagation_context;
mod propagator;
pub(crate) mod store;

pub(crate) use constructor::PropagatorConstructor;
pub(crate) use constructor::PropagatorConstructorContext;
pub(crate) use ids::LocalId;
pub(crate) use propagation_context::PropagationContext;
pub(crate) use propagation_context::PropagationContextMut;
pub(crate) use propagation_context::ReadDomains;
pub(crate) use propagator::EnqueueDecision;
pub(crate) use propagator::Propagator;
pub use ids::PropagatorId;
pub(crate) use ids::PropagatorVarId;
pub(crate) use store::PropagatorHandle;
