use super::binary_equals;
use super::binary_less_than_or_equals;
use super::binary_not_equals;
use super::equals;
use crate::constraints::Constraint;
use crate::constraints::NegatableConstraint;
use crate::variables::DomainId;
use crate::variables::Literal;
use crate::variables::TransformableVariable;
use crate::ConstraintOperationError;
use crate::Solver;

/// The relation between the scalar product and the right-hand side of an [`IntLinNeReif`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinearComparison {
    /// `\sum a_i * b_i != c`
    #[default]
    NotEqual,
    /// `\sum a_i * b_i = c`
    Equal,
    /// `\sum a_i * b_i <= c`
    LessThanOrEqual,
}

/// Builder for the constraint `r <-> (\sum a_i * b_i != c)`.
///
/// The scalar product is introduced as an auxiliary variable `scal` with the bounds given by
/// [`scalar_bounds`], which is linked to the terms by the linear equality `scal = \sum a_i * b_i`.
/// The comparison between `scal` and `c` is then reified with `r`. The comparison defaults to
/// [`LinearComparison::NotEqual`] and can be changed with [`IntLinNeReif::with_comparison`].
///
/// # Example
/// ```
/// # use lantern_solver::constraints::IntLinNeReif;
/// # use lantern_solver::Solver;
/// let mut solver = Solver::default();
/// let b = [solver.new_bounded_integer(0, 2), solver.new_bounded_integer(0, 2)];
/// let c = solver.new_bounded_integer(3, 3);
/// let r = solver.new_literal();
///
/// IntLinNeReif::new(vec![1, 2], b.to_vec(), c, r)
///     .post(&mut solver)
///     .expect("the constraint is feasible");
///
/// // Once b_0 + 2 * b_1 = 4, it can no longer equal c.
/// solver.new_checkpoint();
/// let _ = solver.post(lantern_solver::predicate![b[0] == 2]);
/// let _ = solver.post(lantern_solver::predicate![b[1] == 1]);
/// solver.propagate().expect("no conflict");
/// assert_eq!(Some(true), solver.get_literal_value(r));
/// ```
#[derive(Clone, Debug)]
pub struct IntLinNeReif {
    pub coefficients: Vec<i32>,
    pub terms: Vec<DomainId>,
    pub rhs: DomainId,
    pub reification_literal: Literal,
    pub comparison: LinearComparison,
}

impl IntLinNeReif {
    pub fn new(
        coefficients: Vec<i32>,
        terms: Vec<DomainId>,
        rhs: DomainId,
        reification_literal: Literal,
    ) -> Self {
        IntLinNeReif {
            coefficients,
            terms,
            rhs,
            reification_literal,
            comparison: LinearComparison::default(),
        }
    }

    pub fn with_comparison(mut self, comparison: LinearComparison) -> Self {
        self.comparison = comparison;
        self
    }

    /// Adds the auxiliary variable and the constraints to the [`Solver`].
    ///
    /// Nothing is posted when there are no terms.
    ///
    /// Fails with [`ConstraintOperationError::ScalarProductOutOfRange`] when the bounds of the
    /// scalar product do not fit in an `i32`.
    ///
    /// # Panics
    /// If the number of coefficients differs from the number of terms.
    pub fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        assert_eq!(
            self.coefficients.len(),
            self.terms.len(),
            "every term needs a coefficient"
        );

        if self.terms.is_empty() {
            return Ok(());
        }

        let bounds = self
            .terms
            .iter()
            .map(|&term| (solver.lower_bound(term), solver.upper_bound(term)))
            .collect::<Vec<_>>();
        let (lower_bound, upper_bound) = scalar_bounds(&self.coefficients, &bounds);
        let (Ok(lower_bound), Ok(upper_bound)) =
            (i32::try_from(lower_bound), i32::try_from(upper_bound))
        else {
            return Err(ConstraintOperationError::ScalarProductOutOfRange);
        };
        let scal = solver.new_bounded_integer(lower_bound, upper_bound);

        // scal = \sum a_i * b_i; terms with a zero coefficient do not contribute
        let scalar_product = self
            .coefficients
            .iter()
            .zip(&self.terms)
            .filter(|(&coefficient, _)| coefficient != 0)
            .map(|(&coefficient, term)| term.scaled(coefficient))
            .chain(std::iter::once(scal.scaled(-1)))
            .collect::<Vec<_>>();
        equals(scalar_product, 0).post(solver)?;

        match self.comparison {
            LinearComparison::NotEqual => {
                binary_not_equals(scal, self.rhs).reify(solver, self.reification_literal)
            }
            LinearComparison::Equal => {
                binary_equals(scal, self.rhs).reify(solver, self.reification_literal)
            }
            LinearComparison::LessThanOrEqual => {
                binary_less_than_or_equals(scal, self.rhs).reify(solver, self.reification_literal)
            }
        }
    }
}

/// The smallest and largest value of `\sum a_i * b_i` when every `b_i` lies within the
/// corresponding `(lower, upper)` bounds.
pub fn scalar_bounds(coefficients: &[i32], bounds: &[(i32, i32)]) -> (i64, i64) {
    coefficients
        .iter()
        .zip(bounds)
        .map(|(&coefficient, &(lower, upper))| {
            let at_lower = i64::from(coefficient) * i64::from(lower);
            let at_upper = i64::from(coefficient) * i64::from(upper);
            (at_lower.min(at_upper), at_lower.max(at_upper))
        })
        .fold((0, 0), |(min, max), (term_min, term_max)| {
            (min.saturating_add(term_min), max.saturating_add(term_max))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_bounds_account_for_negative_coefficients() {
        assert_eq!((-6, 7), scalar_bounds(&[1, -2], &[(0, 1), (-3, 3)]));
        assert_eq!((0, 0), scalar_bounds(&[], &[]));
    }

    #[test]
    fn scalar_bounds_saturate() {
        let extreme = (i32::MIN, i32::MAX);
        let (lower, upper) = scalar_bounds(&[i32::MIN; 3], &[extreme; 3]);

        assert_eq!((i64::MIN, i64::MAX), (lower, upper));
    }

    #[test]
    fn a_scalar_product_beyond_i32_is_an_error() {
        let mut solver = Solver::default();
        let b = solver.new_bounded_integer(0, 2);
        let c = solver.new_bounded_integer(0, 5);
        let r = solver.new_literal();

        let result = solver.int_lin_ne_reif(&[i32::MAX], &[b], c, r);

        assert_eq!(
            Err(ConstraintOperationError::ScalarProductOutOfRange),
            result
        );
        assert_eq!(None, solver.get_literal_value(r));
    }

    #[test]
    fn empty_terms_post_nothing() {
        let mut solver = Solver::default();
        let c = solver.new_bounded_integer(0, 5);
        let r = solver.new_literal();

        IntLinNeReif::new(vec![], vec![], c, r)
            .post(&mut solver)
            .expect("nothing to post");

        assert_eq!(None, solver.get_literal_value(r));
        assert_eq!(vec![0, 1, 2, 3, 4, 5], solver.domain(c));
    }

    #[test]
    #[should_panic]
    fn mismatched_lengths_panic() {
        let mut solver = Solver::default();
        let b = solver.new_bounded_integer(0, 5);
        let c = solver.new_bounded_integer(0, 5);
        let r = solver.new_literal();

        let _ = IntLinNeReif::new(vec![1, 2], vec![b], c, r).post(&mut solver);
    }

    #[test]
    fn literal_is_true_when_the_sum_cannot_reach_the_right_hand_side() {
        let mut solver = Solver::default();
        let b0 = solver.new_bounded_integer(0, 1);
        let b1 = solver.new_bounded_integer(0, 1);
        let c = solver.new_bounded_integer(5, 9);
        let r = solver.new_literal();

        IntLinNeReif::new(vec![2, 1], vec![b0, b1], c, r)
            .post(&mut solver)
            .expect("feasible");

        assert_eq!(Some(true), solver.get_literal_value(r));
    }

    #[test]
    fn false_literal_forces_equality() {
        let mut solver = Solver::default();
        let b0 = solver.new_bounded_integer(0, 3);
        let b1 = solver.new_bounded_integer(0, 3);
        let c = solver.new_bounded_integer(6, 6);
        let r = solver.new_literal();

        IntLinNeReif::new(vec![1, 1], vec![b0, b1], c, r)
            .post(&mut solver)
            .expect("feasible");
        assert_eq!(None, solver.get_literal_value(r));

        let _ = solver.post(r.get_false_predicate()).expect("unassigned");
        solver.propagate().expect("no conflict");

        assert_eq!(Some(3), solver.fixed_value(b0));
        assert_eq!(Some(3), solver.fixed_value(b1));
    }

    #[test]
    fn the_comparison_can_be_changed() {
        let mut solver = Solver::default();
        let b = solver.new_bounded_integer(0, 4);
        let c = solver.new_bounded_integer(10, 12);
        let r = solver.new_literal();

        IntLinNeReif::new(vec![-3], vec![b], c, r)
            .with_comparison(LinearComparison::LessThanOrEqual)
            .post(&mut solver)
            .expect("feasible");

        assert_eq!(Some(true), solver.get_literal_value(r));
    }
}
