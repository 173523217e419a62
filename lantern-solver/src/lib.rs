//! # Lantern
//! Lantern is a constraint propagation engine built around a domain-consistent propagator for the
//! _regular_ constraint: a sequence of integer variables must spell a word accepted by a
//! deterministic finite automaton.
//!
//! The regular propagator unrolls the automaton over the sequence into a layered graph. Every
//! value which does not label an edge on some path from the initial state to an accepting state is
//! removed from the domain of its variable, and the constraint fails when no such path exists.
//!
//! # Using Lantern
//! The first step is **adding variables**:
//! ```rust
//! # use lantern_solver::Solver;
//! let mut solver = Solver::default();
//!
//! let x = (0..4)
//!     .map(|_| solver.new_bounded_integer(0, 1))
//!     .collect::<Vec<_>>();
//! ```
//!
//! Then we can **add constraints**. Adding a constraint propagates it straight away:
//! ```rust
//! # use lantern_solver::automaton::Automaton;
//! # use lantern_solver::constraints;
//! # use lantern_solver::Solver;
//! # let mut solver = Solver::default();
//! # let x = (0..4)
//! #     .map(|_| solver.new_bounded_integer(0, 1))
//! #     .collect::<Vec<_>>();
//! // Every accepted word ends with a 1 and contains no two consecutive 1s.
//! let automaton = Automaton::from_regex("(0*1)(0+1)*").expect("valid expression");
//!
//! solver
//!     .add_constraint(constraints::regular(x.clone(), automaton))
//!     .post()
//!     .expect("the constraint is feasible");
//!
//! assert_eq!(vec![1], solver.domain(x[3]));
//! assert_eq!(vec![0], solver.domain(x[2]));
//! ```
//!
//! Finally, domains can be **restricted and propagated** below a checkpoint, which can be undone:
//! ```rust
//! # use lantern_solver::automaton::Automaton;
//! # use lantern_solver::constraints;
//! # use lantern_solver::predicate;
//! # use lantern_solver::Solver;
//! # let mut solver = Solver::default();
//! # let x = (0..4)
//! #     .map(|_| solver.new_bounded_integer(0, 1))
//! #     .collect::<Vec<_>>();
//! # let automaton = Automaton::from_regex("(0*1)(0+1)*").expect("valid expression");
//! # solver
//! #     .add_constraint(constraints::regular(x.clone(), automaton))
//! #     .post()
//! #     .expect("the constraint is feasible");
//! solver.new_checkpoint();
//!
//! let _ = solver.post(predicate![x[0] == 1]).expect("non-empty domain");
//! solver.propagate().expect("x = 1 0 0 1 is accepted");
//! assert_eq!(vec![0], solver.domain(x[1]));
//!
//! solver.restore_to(0);
//! assert_eq!(vec![0, 1], solver.domain(x[1]));
//! ```
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod math;
pub(crate) mod propagators;

#[doc(hidden)]
pub mod asserts;

pub mod automaton;
pub mod constraints;
pub mod statistics;

pub use convert_case;

// We declare a private module with public use, so that all exports from API are exports directly
// from the crate.
//
// Example:
// `use lantern_solver::Solver;`
// vs.
// `use lantern_solver::api::Solver;`
mod api;

pub use api::*;

pub use crate::api::solver::Solver;
pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::Inconsistency;
pub use crate::basic_types::PropagatorConflict;
pub use crate::engine::cp::propagation::PropagatorId;
pub use crate::engine::Conflict;
pub use crate::engine::EmptyDomain;
pub use crate::engine::VariableNames;
