//! Deterministic finite automata over integer symbols.
//!
//! An [`Automaton`] is the language description used by the
//! [`regular`](crate::constraints::regular) constraint. It can be assembled state by state through
//! the [`AutomatonBuilder`], or compiled from a regular expression with
//! [`Automaton::from_regex`]:
//!
//! ```rust
//! # use lantern_solver::automaton::Automaton;
//! let automaton = Automaton::from_regex("0*1*").expect("valid expression");
//!
//! assert!(automaton.run([0, 0, 1]));
//! assert!(!automaton.run([1, 0]));
//! ```
mod builder;
mod dfa;
mod error;
mod regex;

pub use builder::AutomatonBuilder;
pub use dfa::Automaton;
pub use dfa::StateId;
pub use error::AutomatonError;
pub use error::RegexError;
