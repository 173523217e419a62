use crate::constraints::Constraint;
use crate::constraints::NegatableConstraint;
use crate::propagators::arithmetic::BinaryNotEqualsPropagatorArgs;
use crate::propagators::arithmetic::LinearLessOrEqualPropagatorArgs;
use crate::variables::IntegerVariable;
use crate::variables::Literal;
use crate::ConstraintOperationError;
use crate::Solver;

/// `\sum terms_i <= rhs`, negated by [`greater_than`].
pub fn less_than_or_equals<Var: IntegerVariable + 'static>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl NegatableConstraint {
    LinearLessOrEqualPropagatorArgs {
        terms: terms.into(),
        rhs,
    }
}

/// `\sum terms_i > rhs`, negated by [`less_than_or_equals`].
pub fn greater_than<Var: IntegerVariable + 'static>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl NegatableConstraint {
    LinearLessOrEqualPropagatorArgs {
        terms: terms.into(),
        rhs,
    }
    .negation()
}

/// `lhs <= rhs`
pub fn binary_less_than_or_equals<Var: IntegerVariable + 'static>(
    lhs: Var,
    rhs: Var,
) -> impl NegatableConstraint {
    less_than_or_equals([lhs.scaled(1), rhs.scaled(-1)], 0)
}

/// `\sum terms_i = rhs`, enforced as `\sum terms_i <= rhs` and `\sum -terms_i <= -rhs`.
pub fn equals<Var: IntegerVariable + 'static>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl Constraint {
    let terms: Box<[Var]> = terms.into();
    let scaled_by = |scale: i32| -> Box<[Var::AffineView]> {
        terms.iter().map(|term| term.scaled(scale)).collect()
    };

    vec![
        LinearLessOrEqualPropagatorArgs {
            terms: scaled_by(1),
            rhs,
        },
        LinearLessOrEqualPropagatorArgs {
            terms: scaled_by(-1),
            rhs: -rhs,
        },
    ]
}

/// `lhs = rhs`, negated by [`binary_not_equals`].
pub fn binary_equals<Var: IntegerVariable + 'static>(
    lhs: Var,
    rhs: Var,
) -> impl NegatableConstraint {
    BinaryComparison {
        lhs,
        rhs,
        is_equality: true,
    }
}

/// `lhs != rhs`, negated by [`binary_equals`].
pub fn binary_not_equals<Var: IntegerVariable + 'static>(
    lhs: Var,
    rhs: Var,
) -> impl NegatableConstraint {
    BinaryComparison {
        lhs,
        rhs,
        is_equality: false,
    }
}

impl<Var: IntegerVariable + 'static> NegatableConstraint for LinearLessOrEqualPropagatorArgs<Var> {
    type NegatedConstraint = LinearLessOrEqualPropagatorArgs<Var::AffineView>;

    // \sum t_i > rhs  <=>  \sum -t_i <= -rhs - 1
    fn negation(&self) -> Self::NegatedConstraint {
        LinearLessOrEqualPropagatorArgs {
            terms: self.terms.iter().map(|term| term.scaled(-1)).collect(),
            rhs: -self.rhs - 1,
        }
    }
}

#[derive(Clone, Debug)]
struct BinaryComparison<Var> {
    lhs: Var,
    rhs: Var,
    is_equality: bool,
}

impl<Var: IntegerVariable + 'static> BinaryComparison<Var> {
    /// Posts the comparison, or only its implication by `literal` when one is given.
    fn enforce(
        self,
        solver: &mut Solver,
        literal: Option<Literal>,
    ) -> Result<(), ConstraintOperationError> {
        if self.is_equality {
            let difference = [self.lhs.scaled(1), self.rhs.scaled(-1)];
            post_or_imply(equals(difference, 0), solver, literal)
        } else {
            let propagator = BinaryNotEqualsPropagatorArgs {
                a: self.lhs,
                b: self.rhs,
            };
            post_or_imply(propagator, solver, literal)
        }
    }
}

fn post_or_imply(
    constraint: impl Constraint,
    solver: &mut Solver,
    literal: Option<Literal>,
) -> Result<(), ConstraintOperationError> {
    match literal {
        Some(literal) => constraint.implied_by(solver, literal),
        None => constraint.post(solver),
    }
}

impl<Var: IntegerVariable + 'static> Constraint for BinaryComparison<Var> {
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        self.enforce(solver, None)
    }

    fn implied_by(
        self,
        solver: &mut Solver,
        reification_literal: Literal,
    ) -> Result<(), ConstraintOperationError> {
        self.enforce(solver, Some(reification_literal))
    }
}

impl<Var: IntegerVariable + 'static> NegatableConstraint for BinaryComparison<Var> {
    type NegatedConstraint = BinaryComparison<Var>;

    fn negation(&self) -> Self::NegatedConstraint {
        BinaryComparison {
            is_equality: !self.is_equality,
            ..self.clone()
        }
    }
}
