use crate::engine::EmptyDomain;

/// The result of invoking a propagator. The propagation either succeeds (possibly after shrinking
/// domains) or establishes that the current domains admit no solution.
pub(crate) type PropagationStatusCP = Result<(), Inconsistency>;

/// The ways in which a propagator can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inconsistency {
    /// A removal performed by the propagator left a domain without values.
    EmptyDomain,
    /// The propagator itself determined that no solution exists.
    Conflict(PropagatorConflict),
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}

impl From<PropagatorConflict> for Inconsistency {
    fn from(conflict: PropagatorConflict) -> Self {
        Inconsistency::Conflict(conflict)
    }
}

/// A conflict stated by a propagator. The label identifies the rule which detected it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropagatorConflict {
    pub(crate) label: &'static str,
}

impl PropagatorConflict {
    pub(crate) fn new(label: &'static str) -> Self {
        PropagatorConflict { label }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}
