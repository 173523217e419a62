pub(crate) mod cp;
pub(crate) mod predicates;
mod state;
pub(crate) mod variables;
mod variable_names;

pub use cp::Assignments;
pub use cp::EmptyDomain;
pub use state::Conflict;
pub(crate) use state::State;
pub use variable_names::VariableNames;
