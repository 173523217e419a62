use enumset::EnumSet;

use super::propagation::PropagatorVarId;
use super::DomainEvent;
use crate::containers::KeyedVec;
use crate::engine::variables::DomainId;

/// For every domain and every kind of [`DomainEvent`], the propagator variables to notify.
#[derive(Default, Debug)]
pub(crate) struct WatchListCP {
    watchers: KeyedVec<DomainId, [Vec<PropagatorVarId>; 4]>,
}

/// Registers one propagator variable on the domains underlying a view.
#[derive(Debug)]
pub struct Watchers<'a> {
    propagator_var: PropagatorVarId,
    watch_list: &'a mut WatchListCP,
}

impl WatchListCP {
    pub(crate) fn grow(&mut self) {
        let _ = self.watchers.push(Default::default());
    }

    pub(crate) fn get_affected_propagators(
        &self,
        event: DomainEvent,
        domain: DomainId,
    ) -> &[PropagatorVarId] {
        &self.watchers[domain][event as usize]
    }
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(propagator_var: PropagatorVarId, watch_list: &'a mut WatchListCP) -> Self {
        Watchers {
            propagator_var,
            watch_list,
        }
    }

    /// Watching the same event twice has no effect.
    pub(crate) fn watch_all(&mut self, domain: DomainId, events: EnumSet<DomainEvent>) {
        let per_event = &mut self.watch_list.watchers[domain];

        for event in events {
            let watchers = &mut per_event[event as usize];
            if !watchers.contains(&self.propagator_var) {
                watchers.push(self.propagator_var);
            }
        }
    }
}
