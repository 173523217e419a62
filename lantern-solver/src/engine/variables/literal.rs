use std::ops::Not;

use enumset::EnumSet;

use super::AffineView;
use super::DomainId;
use super::IntegerVariable;
use super::TransformableVariable;
use crate::engine::cp::DomainEvent;
use crate::engine::cp::OpaqueDomainEvent;
use crate::engine::cp::Watchers;
use crate::engine::predicates::predicate::Predicate;
use crate::engine::predicates::predicate_constructor::PredicateConstructor;
use crate::engine::Assignments;

/// A 0-1 integer variable, used to (half) reify constraints.
///
/// A literal is a polarity of a 0-1 domain: the positive literal takes the value of the domain,
/// the negative literal `!x` takes the value `1 - x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    domain_id: DomainId,
    is_negated: bool,
}

impl Literal {
    /// The positive literal over `domain_id`, which should have the domain `{0, 1}`.
    pub fn new(domain_id: DomainId) -> Literal {
        Literal {
            domain_id,
            is_negated: false,
        }
    }

    /// The literal as an integer variable over its domain.
    pub fn get_integer_variable(&self) -> AffineView<DomainId> {
        if self.is_negated {
            self.domain_id.scaled(-1).offset(1)
        } else {
            self.domain_id.scaled(1)
        }
    }

    /// `[l >= 1]`
    pub fn get_true_predicate(&self) -> Predicate {
        self.lower_bound_predicate(1)
    }

    /// `[l <= 0]`
    pub fn get_false_predicate(&self) -> Predicate {
        self.upper_bound_predicate(0)
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal {
            domain_id: self.domain_id,
            is_negated: !self.is_negated,
        }
    }
}

impl IntegerVariable for Literal {
    type AffineView = AffineView<Self>;

    fn lower_bound(&self, assignments: &Assignments) -> i32 {
        self.get_integer_variable().lower_bound(assignments)
    }

    fn upper_bound(&self, assignments: &Assignments) -> i32 {
        self.get_integer_variable().upper_bound(assignments)
    }

    fn contains(&self, assignments: &Assignments, value: i32) -> bool {
        self.get_integer_variable().contains(assignments, value)
    }

    fn iterate_domain(&self, assignments: &Assignments) -> impl Iterator<Item = i32> {
        let view = self.get_integer_variable();
        view.iterate_domain(assignments).collect::<Vec<_>>().into_iter()
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>) {
        self.get_integer_variable().watch_all(watchers, events)
    }

    fn unpack_event(&self, event: OpaqueDomainEvent) -> DomainEvent {
        self.get_integer_variable().unpack_event(event)
    }
}

impl PredicateConstructor for Literal {
    type Value = i32;

    fn lower_bound_predicate(&self, bound: i32) -> Predicate {
        self.get_integer_variable().lower_bound_predicate(bound)
    }

    fn upper_bound_predicate(&self, bound: i32) -> Predicate {
        self.get_integer_variable().upper_bound_predicate(bound)
    }

    fn equality_predicate(&self, value: i32) -> Predicate {
        self.get_integer_variable().equality_predicate(value)
    }

    fn disequality_predicate(&self, value: i32) -> Predicate {
        self.get_integer_variable().disequality_predicate(value)
    }
}

impl TransformableVariable<AffineView<Literal>> for Literal {
    fn scaled(&self, scale: i32) -> AffineView<Literal> {
        AffineView::new(*self, scale, 0)
    }

    fn offset(&self, offset: i32) -> AffineView<Literal> {
        AffineView::new(*self, 1, offset)
    }
}
