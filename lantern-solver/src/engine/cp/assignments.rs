use enumset::EnumSet;

use super::DomainEvent;
use super::EventSink;
use crate::basic_types::Trail;
use crate::containers::HashSet;
use crate::containers::KeyedVec;
use crate::engine::predicates::predicate::Predicate;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::lantern_assert_moderate;
use crate::lantern_assert_simple;

/// The integer domains of all variables, together with the trail which allows every change made
/// after a checkpoint to be undone.
///
/// Domain `x0` is reserved: it is fixed to 1 and backs [`Predicate::trivially_true`].
#[derive(Clone, Debug)]
pub struct Assignments {
    trail: Trail<DomainChange>,
    domains: KeyedVec<DomainId, IntegerDomain>,
    events: EventSink,
    /// The number of values that have been pruned from the domains.
    pruned_values: u64,
}

impl Default for Assignments {
    fn default() -> Self {
        let mut assignments = Assignments {
            trail: Trail::default(),
            domains: KeyedVec::default(),
            events: EventSink::default(),
            pruned_values: 0,
        };

        let reserved = assignments.grow(1, 1);
        lantern_assert_simple!(reserved == Predicate::trivially_true().get_domain());

        assignments
    }
}

/// Returned when a change to a domain leaves it without any values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

impl Assignments {
    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint()
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.trail.get_checkpoint()
    }

    pub(crate) fn num_domains(&self) -> u32 {
        self.domains.len() as u32
    }

    pub(crate) fn num_trail_entries(&self) -> usize {
        self.trail.len()
    }

    /// Adds the interval domain `[lower_bound, upper_bound]`. The watch lists are grown
    /// separately by the [`State`](crate::engine::State).
    pub(crate) fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.push_domain(IntegerDomain::new(lower_bound, upper_bound, HashSet::default()))
    }

    /// Adds a domain holding exactly `values`, stored as its bounds plus the missing values in
    /// between.
    pub(crate) fn create_new_integer_variable_sparse(&mut self, mut values: Vec<i32>) -> DomainId {
        values.sort_unstable();
        values.dedup();

        let (Some(&lower_bound), Some(&upper_bound)) = (values.first(), values.last()) else {
            panic!("cannot create a variable with an empty domain");
        };
        let holes = (lower_bound..=upper_bound)
            .filter(|value| values.binary_search(value).is_err())
            .collect();

        self.push_domain(IntegerDomain::new(lower_bound, upper_bound, holes))
    }

    fn push_domain(&mut self, domain: IntegerDomain) -> DomainId {
        lantern_assert_simple!(
            self.get_checkpoint() == 0,
            "variables are created at the root"
        );

        self.events.grow();
        self.domains.push(domain)
    }
}

/// Queries.
impl Assignments {
    pub(crate) fn get_lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound
    }

    pub(crate) fn get_upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound
    }

    pub(crate) fn get_assigned_value<Var: IntegerVariable>(&self, var: &Var) -> Option<i32> {
        let lower_bound = var.lower_bound(self);
        (lower_bound == var.upper_bound(self)).then_some(lower_bound)
    }

    pub(crate) fn get_domain_iterator(
        &self,
        domain_id: DomainId,
    ) -> impl Iterator<Item = i32> + '_ {
        let domain = &self.domains[domain_id];
        (domain.lower_bound..=domain.upper_bound).filter(|value| !domain.holes.contains(value))
    }

    pub(crate) fn is_value_in_domain(&self, domain_id: DomainId, value: i32) -> bool {
        self.domains[domain_id].contains(value)
    }

    pub(crate) fn get_pruned_value_count(&self) -> u64 {
        self.pruned_values
    }

    /// The truth value of `predicate`, or [`None`] while the domain allows both outcomes.
    pub(crate) fn evaluate_predicate(&self, predicate: Predicate) -> Option<bool> {
        let domain = &self.domains[predicate.get_domain()];
        let value = predicate.get_right_hand_side();

        let (holds, fails) = match predicate {
            Predicate::LowerBound { .. } => {
                (domain.lower_bound >= value, domain.upper_bound < value)
            }
            Predicate::UpperBound { .. } => {
                (domain.upper_bound <= value, domain.lower_bound > value)
            }
            Predicate::Equal { .. } => (domain.is_fixed_to(value), !domain.contains(value)),
            Predicate::NotEqual { .. } => (!domain.contains(value), domain.is_fixed_to(value)),
        };

        match (holds, fails) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    pub(crate) fn is_predicate_satisfied(&self, predicate: Predicate) -> bool {
        self.evaluate_predicate(predicate) == Some(true)
    }
}

/// Changes.
impl Assignments {
    /// Makes `predicate` true.
    ///
    /// Returns `false` if it already held. When the domain becomes empty the change stays on the
    /// trail, so the caller has to restore an earlier checkpoint before continuing.
    pub(crate) fn post_predicate(&mut self, predicate: Predicate) -> Result<bool, EmptyDomain> {
        if self.is_predicate_satisfied(predicate) {
            return Ok(false);
        }

        let domain_id = predicate.get_domain();
        let value = predicate.get_right_hand_side();
        let domain = &mut self.domains[domain_id];
        let (old_lower_bound, old_upper_bound) = (domain.lower_bound, domain.upper_bound);

        self.trail.push(DomainChange {
            predicate,
            old_lower_bound,
            old_upper_bound,
        });

        let mut events = EnumSet::new();
        match predicate {
            Predicate::LowerBound { .. } => domain.set_lower_bound(value),
            Predicate::UpperBound { .. } => domain.set_upper_bound(value),
            Predicate::NotEqual { .. } => {
                domain.remove_value(value);
                let _ = events.insert(DomainEvent::Removal);
            }
            Predicate::Equal { .. } => {
                domain.set_lower_bound(value);
                domain.set_upper_bound(value);
            }
        }

        if domain.is_empty() {
            return Err(EmptyDomain);
        }

        let tightened = domain.lower_bound.abs_diff(old_lower_bound)
            + old_upper_bound.abs_diff(domain.upper_bound);
        self.pruned_values += u64::from(tightened.max(1));

        if domain.lower_bound != old_lower_bound {
            let _ = events.insert(DomainEvent::LowerBound);
        }
        if domain.upper_bound != old_upper_bound {
            let _ = events.insert(DomainEvent::UpperBound);
        }
        if domain.lower_bound == domain.upper_bound {
            let _ = events.insert(DomainEvent::Assign);
        }

        for event in events {
            self.events.event_occurred(event, domain_id);
        }

        Ok(true)
    }

    /// Undoes every change made after `checkpoint`. Events which were not yet drained are
    /// discarded, they describe changes which no longer exist.
    pub(crate) fn synchronise(&mut self, checkpoint: usize) {
        lantern_assert_simple!(
            checkpoint <= self.trail.get_checkpoint(),
            "Expected the checkpoint {checkpoint} to be at most the current checkpoint {}",
            self.trail.get_checkpoint(),
        );

        if checkpoint == self.trail.get_checkpoint() {
            return;
        }

        for change in self.trail.synchronise(checkpoint) {
            let domain = &mut self.domains[change.predicate.get_domain()];

            // A change which emptied the domain was never counted as a pruning.
            if !domain.is_empty() {
                let widened = change.old_lower_bound.abs_diff(domain.lower_bound)
                    + domain.upper_bound.abs_diff(change.old_upper_bound);
                self.pruned_values -= u64::from(widened.max(1));
            }

            domain.undo(&change);
        }

        let _ = self.events.drain().count();
    }

    pub(crate) fn drain_domain_events(
        &mut self,
    ) -> impl Iterator<Item = (DomainEvent, DomainId)> + '_ {
        self.events.drain()
    }
}

/// A trail entry; the bounds are stored so restoring does not have to recompute them.
#[derive(Clone, Copy, Debug)]
struct DomainChange {
    predicate: Predicate,
    old_lower_bound: i32,
    old_upper_bound: i32,
}

/// Bounds plus the values removed strictly between them. The bounds themselves are never holes,
/// and the domain is empty once `lower_bound > upper_bound`.
#[derive(Clone, Debug)]
struct IntegerDomain {
    lower_bound: i32,
    upper_bound: i32,
    holes: HashSet<i32>,
}

impl IntegerDomain {
    fn new(lower_bound: i32, upper_bound: i32, holes: HashSet<i32>) -> IntegerDomain {
        lantern_assert_simple!(lower_bound <= upper_bound, "a new domain has values");

        IntegerDomain {
            lower_bound,
            upper_bound,
            holes,
        }
    }

    fn is_empty(&self) -> bool {
        self.lower_bound > self.upper_bound
    }

    fn is_fixed_to(&self, value: i32) -> bool {
        self.lower_bound == value && self.upper_bound == value
    }

    fn contains(&self, value: i32) -> bool {
        (self.lower_bound..=self.upper_bound).contains(&value) && !self.holes.contains(&value)
    }

    fn set_lower_bound(&mut self, bound: i32) {
        self.lower_bound = self.lower_bound.max(bound);
        while self.lower_bound <= self.upper_bound && self.holes.contains(&self.lower_bound) {
            self.lower_bound += 1;
        }
    }

    fn set_upper_bound(&mut self, bound: i32) {
        self.upper_bound = self.upper_bound.min(bound);
        while self.lower_bound <= self.upper_bound && self.holes.contains(&self.upper_bound) {
            self.upper_bound -= 1;
        }
    }

    /// Only called for a value in the domain.
    fn remove_value(&mut self, value: i32) {
        let _ = self.holes.insert(value);
        self.set_lower_bound(self.lower_bound);
        self.set_upper_bound(self.upper_bound);
    }

    fn undo(&mut self, change: &DomainChange) {
        if let Predicate::NotEqual {
            not_equal_constant, ..
        } = change.predicate
        {
            let was_removed = self.holes.remove(&not_equal_constant);
            lantern_assert_moderate!(was_removed, "the removal of {not_equal_constant} is undone");
        }

        self.lower_bound = change.old_lower_bound;
        self.upper_bound = change.old_upper_bound;
    }
}
