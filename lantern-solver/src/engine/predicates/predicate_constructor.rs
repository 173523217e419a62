use super::predicate::Predicate;
use crate::engine::variables::DomainId;

/// Builds the atomic [`Predicate`]s over a variable.
///
/// For views the bound is translated to the underlying domain, so the created predicate always
/// refers to a [`DomainId`].
pub trait PredicateConstructor {
    type Value;

    /// `[x >= bound]`
    fn lower_bound_predicate(&self, bound: Self::Value) -> Predicate;

    /// `[x <= bound]`
    fn upper_bound_predicate(&self, bound: Self::Value) -> Predicate;

    /// `[x == value]`
    fn equality_predicate(&self, value: Self::Value) -> Predicate;

    /// `[x != value]`
    fn disequality_predicate(&self, value: Self::Value) -> Predicate;
}

impl PredicateConstructor for DomainId {
    type Value = i32;

    fn lower_bound_predicate(&self, lower_bound: i32) -> Predicate {
        Predicate::LowerBound {
            domain_id: *self,
            lower_bound,
        }
    }

    fn upper_bound_predicate(&self, upper_bound: i32) -> Predicate {
        Predicate::UpperBound {
            domain_id: *self,
            upper_bound,
        }
    }

    fn equality_predicate(&self, equality_constant: i32) -> Predicate {
        Predicate::Equal {
            domain_id: *self,
            equality_constant,
        }
    }

    fn disequality_predicate(&self, not_equal_constant: i32) -> Predicate {
        Predicate::NotEqual {
            domain_id: *self,
            not_equal_constant,
        }
    }
}

/// Writes a [`Predicate`] the way it reads, e.g. `predicate!(x >= 5)` or
/// `predicate!(sequence[2] != 0)`.
///
/// The left-hand side can be any path or indexed path to a variable implementing
/// [`PredicateConstructor`].
///
/// ```rust
/// # use lantern_solver::Solver;
/// # use lantern_solver::predicate;
/// # use lantern_solver::predicates::Predicate;
/// let mut solver = Solver::default();
/// let symbols = [solver.new_bounded_integer(0, 2), solver.new_bounded_integer(0, 2)];
///
/// assert_eq!(
///     predicate!(symbols[1] != 2),
///     Predicate::NotEqual {
///         domain_id: symbols[1],
///         not_equal_constant: 2
///     }
/// );
/// ```
#[macro_export]
macro_rules! predicate {
    (@construct $variable:expr, $constructor:ident, $value:expr) => {{
        #[allow(unused_imports, reason = "the trait may already be in scope")]
        use $crate::predicates::PredicateConstructor;
        $variable.$constructor($value)
    }};
    ($($var:ident).+$([$index:expr])? >= $bound:expr) => {
        $crate::predicate!(@construct $($var).+$([$index])?, lower_bound_predicate, $bound)
    };
    ($($var:ident).+$([$index:expr])? <= $bound:expr) => {
        $crate::predicate!(@construct $($var).+$([$index])?, upper_bound_predicate, $bound)
    };
    ($($var:ident).+$([$index:expr])? == $value:expr) => {
        $crate::predicate!(@construct $($var).+$([$index])?, equality_predicate, $value)
    };
    ($($var:ident).+$([$index:expr])? != $value:expr) => {
        $crate::predicate!(@construct $($var).+$([$index])?, disequality_predicate, $value)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_comparison_creates_the_matching_predicate() {
        let x = DomainId::new(1);

        assert_eq!(x.lower_bound_predicate(2), predicate![x >= 2]);
        assert_eq!(x.upper_bound_predicate(3), predicate![x <= 3]);
        assert_eq!(
            Predicate::Equal {
                domain_id: x,
                equality_constant: 5
            },
            predicate![x == 5]
        );
        assert_eq!(x.disequality_predicate(5), predicate![x != 5]);
    }

    #[test]
    fn fields_and_indices_are_accepted() {
        struct Sequence {
            symbols: Vec<DomainId>,
        }

        let sequence = Sequence {
            symbols: vec![DomainId::new(4), DomainId::new(7)],
        };

        assert_eq!(
            Predicate::NotEqual {
                domain_id: DomainId::new(7),
                not_equal_constant: 0
            },
            predicate![sequence.symbols[1] != 0]
        );
    }
}
