use std::collections::VecDeque;

use super::propagation::PropagatorId;
use crate::containers::KeyedVec;
use crate::lantern_assert_moderate;

const NUM_PRIORITY_LEVELS: usize = 5;

/// Propagators waiting to run, grouped by priority.
///
/// Level `0` is served first; within a level propagators run in the order they were enqueued. A
/// propagator is present at most once.
#[derive(Debug, Clone)]
pub(crate) struct PropagatorQueue {
    levels: [VecDeque<PropagatorId>; NUM_PRIORITY_LEVELS],
    membership: KeyedVec<PropagatorId, bool>,
    len: usize,
}

impl Default for PropagatorQueue {
    fn default() -> Self {
        PropagatorQueue {
            levels: Default::default(),
            membership: KeyedVec::default(),
            len: 0,
        }
    }
}

impl PropagatorQueue {
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn enqueue_propagator(&mut self, propagator_id: PropagatorId, priority: u32) {
        let level = priority as usize;
        lantern_assert_moderate!(level < NUM_PRIORITY_LEVELS, "unknown priority {priority}");

        if self.is_propagator_enqueued(propagator_id) {
            return;
        }

        self.membership.accomodate(propagator_id, false);
        self.membership[propagator_id] = true;
        self.levels[level].push_back(propagator_id);
        self.len += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<PropagatorId> {
        let propagator_id = self
            .levels
            .iter_mut()
            .find_map(|level| level.pop_front())?;

        self.membership[propagator_id] = false;
        self.len -= 1;

        Some(propagator_id)
    }

    pub(crate) fn clear(&mut self) {
        self.levels.iter_mut().for_each(VecDeque::clear);
        self.membership
            .iter_mut()
            .for_each(|is_member| *is_member = false);
        self.len = 0;
    }

    pub(crate) fn is_propagator_enqueued(&self, propagator_id: PropagatorId) -> bool {
        self.membership.get(propagator_id).is_some_and(|&member| member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_priority_values_are_popped_first() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(1), 0);
        queue.enqueue_propagator(PropagatorId(0), 1);
        queue.enqueue_propagator(PropagatorId(3), 4);
        queue.enqueue_propagator(PropagatorId(4), 3);
        queue.enqueue_propagator(PropagatorId(5), 1);

        assert_eq!(Some(PropagatorId(1)), queue.pop());
        assert_eq!(Some(PropagatorId(0)), queue.pop());
        assert_eq!(Some(PropagatorId(5)), queue.pop());
        assert_eq!(Some(PropagatorId(4)), queue.pop());
        assert_eq!(Some(PropagatorId(3)), queue.pop());
        assert_eq!(None, queue.pop());
    }

    #[test]
    fn enqueueing_twice_keeps_a_single_entry() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(2), 3);
        queue.enqueue_propagator(PropagatorId(2), 3);

        assert!(queue.is_propagator_enqueued(PropagatorId(2)));
        assert_eq!(Some(PropagatorId(2)), queue.pop());
        assert!(queue.is_empty());
        assert!(!queue.is_propagator_enqueued(PropagatorId(2)));
    }

    #[test]
    fn clear_empties_every_level() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(0), 0);
        queue.enqueue_propagator(PropagatorId(1), 2);
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(None, queue.pop());
        assert!(!queue.is_propagator_enqueued(PropagatorId(0)));
    }
}
