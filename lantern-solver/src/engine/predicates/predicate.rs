use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Not;

use super::predicate_constructor::PredicateConstructor;
use crate::engine::variables::DomainId;

/// An atomic constraint over a single [`DomainId`]; the unit in which domains are changed.
///
/// See the [`predicate!`](crate::predicate) macro for a convenient way of creating them from
/// arbitrary integer variables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Predicate {
    LowerBound {
        domain_id: DomainId,
        lower_bound: i32,
    },
    UpperBound {
        domain_id: DomainId,
        upper_bound: i32,
    },
    NotEqual {
        domain_id: DomainId,
        not_equal_constant: i32,
    },
    Equal {
        domain_id: DomainId,
        equality_constant: i32,
    },
}

impl Predicate {
    /// The domain, the comparison and the constant of the predicate.
    fn parts(&self) -> (DomainId, &'static str, i32) {
        match *self {
            Predicate::LowerBound {
                domain_id,
                lower_bound,
            } => (domain_id, ">=", lower_bound),
            Predicate::UpperBound {
                domain_id,
                upper_bound,
            } => (domain_id, "<=", upper_bound),
            Predicate::NotEqual {
                domain_id,
                not_equal_constant,
            } => (domain_id, "!=", not_equal_constant),
            Predicate::Equal {
                domain_id,
                equality_constant,
            } => (domain_id, "==", equality_constant),
        }
    }

    pub fn get_domain(&self) -> DomainId {
        self.parts().0
    }

    pub fn get_right_hand_side(&self) -> i32 {
        self.parts().2
    }

    /// Holds in every state: the reserved domain `x0` is fixed to 1 at the root.
    pub fn trivially_true() -> Predicate {
        DomainId::new(0).lower_bound_predicate(1)
    }

    /// Holds in no state; posting it always empties the reserved domain.
    pub fn trivially_false() -> Predicate {
        DomainId::new(0).upper_bound_predicate(0)
    }
}

impl Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Predicate {
        let domain_id = self.get_domain();
        let value = self.get_right_hand_side();

        match self {
            Predicate::LowerBound { .. } => domain_id.upper_bound_predicate(value - 1),
            Predicate::UpperBound { .. } => domain_id.lower_bound_predicate(value + 1),
            Predicate::NotEqual { .. } => domain_id.equality_predicate(value),
            Predicate::Equal { .. } => domain_id.disequality_predicate(value),
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (domain_id, comparison, value) = self.parts();
        write!(f, "[{domain_id} {comparison} {value}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negating_bounds_flips_the_direction() {
        let x = DomainId::new(3);
        let predicate = Predicate::LowerBound {
            domain_id: x,
            lower_bound: 5,
        };

        assert_eq!(
            Predicate::UpperBound {
                domain_id: x,
                upper_bound: 4
            },
            !predicate
        );
        assert_eq!(predicate, !!predicate);
    }

    #[test]
    fn predicates_are_displayed_with_the_domain() {
        let x = DomainId::new(2);
        let predicate = Predicate::NotEqual {
            domain_id: x,
            not_equal_constant: -1,
        };

        assert_eq!("[x2 != -1]", predicate.to_string());
    }
}
