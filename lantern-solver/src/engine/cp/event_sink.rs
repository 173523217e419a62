use enumset::EnumSet;

use super::DomainEvent;
use crate::containers::KeyedVec;
use crate::engine::variables::DomainId;

/// Domain changes are captured as events in the event sink. Once the change that caused them is
/// complete, the sink is drained to notify the propagators which subscribe to those events.
///
/// Duplicate events for the same domain are reported only once per drain.
#[derive(Default, Clone, Debug)]
pub(crate) struct EventSink {
    present: KeyedVec<DomainId, EnumSet<DomainEvent>>,
    events: Vec<(DomainEvent, DomainId)>,
}

impl EventSink {
    pub(crate) fn grow(&mut self) {
        let _ = self.present.push(EnumSet::new());
    }

    pub(crate) fn event_occurred(&mut self, event: DomainEvent, domain: DomainId) {
        let present = &mut self.present[domain];

        if present.insert(event) {
            self.events.push((event, domain));
        }
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (DomainEvent, DomainId)> + '_ {
        self.events.drain(..).inspect(|&(event, domain)| {
            let _ = self.present[domain].remove(event);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink_with_domains(num_domains: usize) -> EventSink {
        let mut sink = EventSink::default();
        for _ in 0..num_domains {
            sink.grow();
        }
        sink
    }

    #[test]
    fn events_are_observed_in_the_drain() {
        let mut sink = sink_with_domains(2);

        sink.event_occurred(DomainEvent::LowerBound, DomainId::new(0));
        sink.event_occurred(DomainEvent::Removal, DomainId::new(1));

        let events = sink.drain().collect::<Vec<_>>();

        assert_eq!(
            vec![
                (DomainEvent::LowerBound, DomainId::new(0)),
                (DomainEvent::Removal, DomainId::new(1))
            ],
            events
        );
        assert_eq!(0, sink.drain().count());
    }

    #[test]
    fn duplicate_events_are_ignored_until_drained() {
        let mut sink = sink_with_domains(1);

        sink.event_occurred(DomainEvent::Removal, DomainId::new(0));
        sink.event_occurred(DomainEvent::Removal, DomainId::new(0));
        assert_eq!(1, sink.drain().count());

        sink.event_occurred(DomainEvent::Removal, DomainId::new(0));
        assert_eq!(1, sink.drain().count());
    }
}
