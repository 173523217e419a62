use crate::engine::predicates::predicate::Predicate;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::Literal;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;

/// Read-only access to the domains, handed to propagators when they are notified or synchronised.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PropagationContext<'a> {
    pub(crate) assignments: &'a Assignments,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> Self {
        PropagationContext { assignments }
    }
}

/// The view of the domains a propagator gets while propagating.
///
/// All pruning goes through this context. A change which does not tighten a domain is not
/// recorded, so propagators can post their bounds without checking them first.
#[derive(Debug)]
pub(crate) struct PropagationContextMut<'a> {
    pub(crate) assignments: &'a mut Assignments,
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(assignments: &'a mut Assignments) -> Self {
        PropagationContextMut { assignments }
    }

    pub(crate) fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext::new(self.assignments)
    }
}

/// Domain queries shared by both contexts.
pub(crate) trait ReadDomains {
    fn assignments(&self) -> &Assignments;

    fn is_literal_true(&self, literal: &Literal) -> bool {
        self.assignments()
            .is_predicate_satisfied(literal.get_true_predicate())
    }

    fn is_literal_false(&self, literal: &Literal) -> bool {
        self.assignments()
            .is_predicate_satisfied(literal.get_false_predicate())
    }

    fn is_literal_fixed(&self, literal: &Literal) -> bool {
        self.is_fixed(literal)
    }

    fn is_fixed<Var: IntegerVariable>(&self, var: &Var) -> bool {
        self.lower_bound(var) == self.upper_bound(var)
    }

    fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.assignments())
    }

    fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.assignments())
    }

    fn iterate_domain<Var: IntegerVariable>(&self, var: &Var) -> impl Iterator<Item = i32> {
        var.iterate_domain(self.assignments())
    }
}

impl ReadDomains for PropagationContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

impl ReadDomains for PropagationContextMut<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

impl PropagationContextMut<'_> {
    pub(crate) fn remove<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        let tightens = var.contains(self.assignments, value);
        self.post_if(tightens, || var.disequality_predicate(value))
    }

    pub(crate) fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        let tightens = bound < var.upper_bound(self.assignments);
        self.post_if(tightens, || var.upper_bound_predicate(bound))
    }

    pub(crate) fn assign_literal(
        &mut self,
        literal: &Literal,
        truth_value: bool,
    ) -> Result<(), EmptyDomain> {
        let predicate = if truth_value {
            literal.get_true_predicate()
        } else {
            literal.get_false_predicate()
        };

        self.post_if(true, || predicate)
    }

    fn post_if(
        &mut self,
        tightens: bool,
        predicate: impl FnOnce() -> Predicate,
    ) -> Result<(), EmptyDomain> {
        if tightens {
            let _ = self.assignments.post_predicate(predicate())?;
        }
        Ok(())
    }
}
