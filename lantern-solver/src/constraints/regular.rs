use std::sync::Arc;

use itertools::Itertools;

use super::Constraint;
use crate::automaton::Automaton;
use crate::propagators::regular::RegularPropagatorArgs;
use crate::propagators::regular::RegularPropagatorOptions;
use crate::variables::DomainId;
use crate::variables::IntegerVariable;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::Solver;
use crate::VariableNames;

/// Creates the [`Constraint`] that the sequence of values taken by `variables` is accepted by
/// `automaton`.
///
/// The propagator is configured by the options the [`Solver`] was created with.
pub fn regular<Var: IntegerVariable + 'static>(
    variables: impl Into<Box<[Var]>>,
    automaton: impl Into<Arc<Automaton>>,
) -> Regular<Var> {
    Regular {
        variables: variables.into(),
        automaton: automaton.into(),
        options: None,
    }
}

/// Creates the [`Constraint`] that the sequence of values taken by `variables` is accepted by
/// `automaton`, propagated with the given options.
pub fn regular_with_options<Var: IntegerVariable + 'static>(
    variables: impl Into<Box<[Var]>>,
    automaton: impl Into<Arc<Automaton>>,
    options: RegularPropagatorOptions,
) -> Regular<Var> {
    Regular {
        variables: variables.into(),
        automaton: automaton.into(),
        options: Some(options),
    }
}

/// The regular constraint: the sequence `x_0, ..., x_{n-1}` is a word of the language of a
/// deterministic finite automaton.
///
/// The automaton is shared, so the same automaton can constrain many sequences without being
/// copied.
#[derive(Clone, Debug)]
pub struct Regular<Var> {
    variables: Box<[Var]>,
    automaton: Arc<Automaton>,
    options: Option<RegularPropagatorOptions>,
}

impl<Var> Regular<Var> {
    pub fn variables(&self) -> &[Var] {
        &self.variables
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Whether the complete assignment `values` (one value per variable, in order) satisfies the
    /// constraint.
    pub fn is_satisfied(&self, values: &[i32]) -> bool {
        values.len() == self.variables.len() && self.automaton.run(values.iter().copied())
    }

    fn into_propagator_args(self, solver: &Solver) -> RegularPropagatorArgs<Var> {
        RegularPropagatorArgs {
            variables: self.variables,
            automaton: self.automaton,
            options: self.options.unwrap_or(solver.options().regular),
        }
    }
}

impl Regular<DomainId> {
    /// Formats the constraint as `Regular(x, y, z)` using the names the variables were created
    /// with.
    pub fn display(&self, variable_names: &VariableNames) -> String {
        format!(
            "Regular({})",
            self.variables
                .iter()
                .map(|&variable| variable_names.display_name(variable))
                .join(", ")
        )
    }
}

impl<Var: IntegerVariable + 'static> Constraint for Regular<Var> {
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        let args = self.into_propagator_args(solver);
        args.post(solver)
    }

    fn implied_by(
        self,
        solver: &mut Solver,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError> {
        let args = self.into_propagator_args(solver);
        args.implied_by(solver, reification_literal)
    }
}
