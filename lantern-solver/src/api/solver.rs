use std::sync::Arc;

use log::debug;
use log::warn;

use super::solver_options::SolverOptions;
use crate::basic_types::ConstraintOperationError;
use crate::constraints::ConstraintPoster;
use crate::constraints::IntLinNeReif;
use crate::engine::cp::propagation::PropagatorConstructor;
use crate::engine::predicates::predicate::Predicate;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::Literal;
use crate::engine::Conflict;
use crate::engine::EmptyDomain;
use crate::engine::State;
use crate::engine::VariableNames;
use crate::lantern_assert_simple;
use crate::statistics::log_statistic_postfix;

/// The main interaction point which allows the creation of variables, the addition of constraints,
/// and the propagation of their domains.
///
/// # Creating Variables
/// ```rust
/// # use lantern_solver::Solver;
/// # use lantern_solver::variables::TransformableVariable;
/// let mut solver = Solver::default();
///
/// // We can create an integer variable with a domain in the range [0, 10]
/// let integer_between_bounds = solver.new_bounded_integer(0, 10);
///
/// // We can also create such a variable with a name
/// let named_integer_between_bounds = solver.new_named_bounded_integer(0, 10, "x");
///
/// // We can also create an integer variable with a non-continuous domain
/// let sparse_integer = solver.new_sparse_integer(vec![0, 3, 5]);
/// assert_eq!(vec![0, 3, 5], solver.domain(sparse_integer));
///
/// // Additionally, we can also create an affine view over a variable with both a scale and an
/// // offset (or either)
/// let view_over_integer = integer_between_bounds.scaled(-1).offset(15);
/// assert_eq!(5, solver.lower_bound(view_over_integer));
///
/// // Finally, a literal is a 0-1 variable
/// let literal = solver.new_literal();
/// assert_eq!(None, solver.get_literal_value(literal));
/// ```
///
/// # Propagating
/// Constraints are propagated when they are added. Afterwards, domains can be changed by posting
/// predicates, which are propagated with [`Solver::propagate`]. Changes made after a call to
/// [`Solver::new_checkpoint`] are undone by [`Solver::restore_to`].
#[derive(Debug, Default)]
pub struct Solver {
    state: State,
    options: SolverOptions,
    /// Set when a domain became empty; only restoring to an earlier checkpoint clears it.
    is_infeasible: bool,
}

impl Solver {
    /// Creates a solver with the provided [`SolverOptions`].
    pub fn with_options(options: SolverOptions) -> Self {
        Solver {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Logs the statistics currently present in the solver. With `verbose`, the statistics of
    /// every propagator are logged as well.
    pub fn log_statistics(&self, verbose: bool) {
        self.state.log_statistics(verbose);
        log_statistic_postfix();
    }

    /// The names given to the variables when they were created.
    pub fn variable_names(&self) -> &VariableNames {
        self.state.variable_names()
    }

    /// Whether a conflict was found which has not been undone by [`Solver::restore_to`].
    pub fn is_infeasible(&self) -> bool {
        self.is_infeasible
    }
}

/// Methods to retrieve information about variables
impl Solver {
    /// Get the value of the given [`Literal`], which could be unassigned.
    pub fn get_literal_value(&self, literal: Literal) -> Option<bool> {
        self.state.get_literal_value(literal)
    }

    pub fn lower_bound(&self, variable: impl IntegerVariable) -> i32 {
        self.state.lower_bound(variable)
    }

    pub fn upper_bound(&self, variable: impl IntegerVariable) -> i32 {
        self.state.upper_bound(variable)
    }

    pub fn contains(&self, variable: impl IntegerVariable, value: i32) -> bool {
        self.state.contains(variable, value)
    }

    /// The value of the variable if its domain is a singleton.
    pub fn fixed_value(&self, variable: impl IntegerVariable) -> Option<i32> {
        self.state.fixed_value(variable)
    }

    /// The values in the domain of `variable`, in increasing order.
    pub fn domain(&self, variable: impl IntegerVariable) -> Vec<i32> {
        self.state.domain(variable)
    }
}

/// Functions to create and retrieve integer and propositional variables.
///
/// Variables can only be created at the root, i.e. before any checkpoint was made.
impl Solver {
    /// Create a fresh propositional variable and return the literal with positive polarity.
    pub fn new_literal(&mut self) -> Literal {
        self.assert_at_root();
        self.state.new_literal(None)
    }

    /// Create a fresh propositional variable with a given name and return the literal with
    /// positive polarity.
    pub fn new_named_literal(&mut self, name: impl Into<Arc<str>>) -> Literal {
        self.assert_at_root();
        self.state.new_literal(Some(name.into()))
    }

    /// Create a new integer variable with the given bounds.
    pub fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.assert_at_root();
        self.state
            .new_interval_variable(lower_bound, upper_bound, None)
    }

    /// Create a new named integer variable with the given bounds.
    pub fn new_named_bounded_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: impl Into<Arc<str>>,
    ) -> DomainId {
        self.assert_at_root();
        self.state
            .new_interval_variable(lower_bound, upper_bound, Some(name.into()))
    }

    /// Create a new integer variable which has a domain of predefined values. We remove duplicates
    /// by converting to a hash set.
    pub fn new_sparse_integer(&mut self, values: impl Into<Vec<i32>>) -> DomainId {
        self.assert_at_root();
        self.state.new_sparse_variable(values.into(), None)
    }

    /// Create a new named integer variable which has a domain of predefined values.
    pub fn new_named_sparse_integer(
        &mut self,
        values: impl Into<Vec<i32>>,
        name: impl Into<Arc<str>>,
    ) -> DomainId {
        self.assert_at_root();
        self.state
            .new_sparse_variable(values.into(), Some(name.into()))
    }

    fn assert_at_root(&self) {
        lantern_assert_simple!(
            self.state.get_checkpoint() == 0,
            "Variables can only be created at the root"
        );
    }
}

/// Functions for adding new constraints to the solver.
impl Solver {
    /// Add a constraint to the solver. This returns a [`ConstraintPoster`] which enables control
    /// on whether to add the constraint as-is, or whether to (half) reify it.
    ///
    /// If none of the methods on [`ConstraintPoster`] are used, the constraint _is not_ actually
    /// added to the solver. In this case, a warning is emitted.
    ///
    /// # Example
    /// ```
    /// # use lantern_solver::constraints;
    /// # use lantern_solver::Solver;
    /// let mut solver = Solver::default();
    ///
    /// let a = solver.new_bounded_integer(0, 3);
    /// let b = solver.new_bounded_integer(0, 3);
    ///
    /// solver
    ///     .add_constraint(constraints::binary_not_equals(a, b))
    ///     .post()
    ///     .expect("the constraint is feasible");
    /// ```
    pub fn add_constraint<Constraint>(
        &mut self,
        constraint: Constraint,
    ) -> ConstraintPoster<'_, Constraint> {
        ConstraintPoster::new(self, constraint)
    }

    /// Posts `r <-> (\sum coefficients_i * terms_i != rhs)`, see [`IntLinNeReif`].
    pub fn int_lin_ne_reif(
        &mut self,
        coefficients: &[i32],
        terms: &[DomainId],
        rhs: DomainId,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError> {
        IntLinNeReif::new(
            coefficients.to_vec(),
            terms.to_vec(),
            rhs,
            reification_literal,
        )
        .post(self)
    }

    /// Adds the propagator and propagates to a fixed point.
    ///
    /// Propagators can only be added at the root.
    pub(crate) fn add_propagator<Constructor: PropagatorConstructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<(), ConstraintOperationError> {
        if self.is_infeasible {
            warn!("A constraint was added to a solver which is infeasible");
            return Err(ConstraintOperationError::InfeasibleState);
        }

        lantern_assert_simple!(
            self.state.get_checkpoint() == 0,
            "Constraints can only be added at the root"
        );

        let _ = self.state.add_propagator(constructor);

        self.propagate()
            .map_err(|_| ConstraintOperationError::InfeasiblePropagator)
    }
}

/// Functions for changing domains and propagating.
impl Solver {
    /// Apply the [`Predicate`] to its domain, without propagating.
    ///
    /// Returns whether the domain changed. If the domain becomes empty, the solver is infeasible
    /// until restored to an earlier checkpoint.
    pub fn post(&mut self, predicate: Predicate) -> Result<bool, EmptyDomain> {
        let result = self.state.post(predicate);

        if result.is_err() {
            debug!("Posting {predicate:?} emptied its domain");
            self.is_infeasible = true;
        }

        result
    }

    /// Propagates all constraints until no domain changes anymore.
    ///
    /// # Panics
    /// If the solver is already infeasible.
    pub fn propagate(&mut self) -> Result<(), Conflict> {
        lantern_assert_simple!(
            !self.is_infeasible,
            "An infeasible solver must be restored before propagating"
        );

        let result = self.state.propagate_to_fixed_point();

        if let Err(conflict) = &result {
            debug!("Propagation failed: {conflict}");
            self.is_infeasible = true;
        }

        result
    }

    /// Create a checkpoint which [`Solver::restore_to`] can return to. The solver must be at a
    /// fixed point.
    pub fn new_checkpoint(&mut self) {
        lantern_assert_simple!(!self.is_infeasible, "Cannot create a checkpoint when infeasible");
        self.state.new_checkpoint();
    }

    /// The number of checkpoints created and not restored.
    pub fn get_checkpoint(&self) -> usize {
        self.state.get_checkpoint()
    }

    /// Undo every change made since `checkpoint` was created.
    ///
    /// A conflict is cleared only when restoring to an earlier checkpoint than the current one.
    pub fn restore_to(&mut self, checkpoint: usize) {
        if checkpoint < self.state.get_checkpoint() {
            self.is_infeasible = false;
        }

        self.state.restore_to(checkpoint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;
    use crate::predicate;

    #[test]
    fn adding_to_an_infeasible_solver_fails() {
        let mut solver = Solver::default();
        let a = solver.new_bounded_integer(1, 1);
        let b = solver.new_bounded_integer(1, 1);
        let c = solver.new_bounded_integer(0, 2);

        let result = solver
            .add_constraint(constraints::binary_not_equals(a, b))
            .post();
        assert_eq!(Err(ConstraintOperationError::InfeasiblePropagator), result);

        let result = solver
            .add_constraint(constraints::binary_not_equals(a, c))
            .post();
        assert_eq!(Err(ConstraintOperationError::InfeasibleState), result);
    }

    #[test]
    fn restoring_clears_the_infeasibility() {
        let mut solver = Solver::default();
        let a = solver.new_bounded_integer(0, 3);
        let b = solver.new_bounded_integer(0, 3);

        solver
            .add_constraint(constraints::binary_equals(a, b))
            .post()
            .expect("feasible");

        solver.new_checkpoint();
        let _ = solver.post(predicate![a <= 1]).expect("non-empty domain");
        let _ = solver.post(predicate![b >= 2]).expect("non-empty domain");
        assert!(solver.propagate().is_err());
        assert!(solver.is_infeasible());

        solver.restore_to(0);
        assert!(!solver.is_infeasible());
        assert_eq!(vec![0, 1, 2, 3], solver.domain(a));
    }

    #[test]
    fn emptying_a_domain_makes_the_solver_infeasible() {
        let mut solver = Solver::default();
        let a = solver.new_bounded_integer(0, 3);

        solver.new_checkpoint();
        assert!(solver.post(predicate![a >= 4]).is_err());
        assert!(solver.is_infeasible());

        solver.restore_to(0);
        assert_eq!(Some(2), {
            let _ = solver.post(predicate![a == 2]).expect("non-empty domain");
            solver.fixed_value(a)
        });
    }

    #[test]
    fn options_are_kept() {
        let options = SolverOptions::default();
        let solver = Solver::with_options(options);

        assert_eq!(&options, solver.options());
    }
}
