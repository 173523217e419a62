use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// What happened to a domain.
///
/// A single change can raise several events: removing the lower bound of `{1, 2}` is a
/// [`DomainEvent::Removal`], a [`DomainEvent::LowerBound`] and a [`DomainEvent::Assign`].
#[derive(Debug, EnumSetType, Hash)]
pub enum DomainEvent {
    LowerBound,
    UpperBound,
    Assign,
    Removal,
}

/// A [`DomainEvent`] on the underlying domain of a variable.
///
/// Propagators watching a view have to translate it with
/// [`IntegerVariable::unpack_event`](crate::variables::IntegerVariable::unpack_event), since a
/// decreasing view turns lower bound events into upper bound events.
#[derive(Clone, Copy, Debug)]
pub struct OpaqueDomainEvent(DomainEvent);

impl From<DomainEvent> for OpaqueDomainEvent {
    fn from(event: DomainEvent) -> Self {
        OpaqueDomainEvent(event)
    }
}

impl OpaqueDomainEvent {
    pub(crate) fn unwrap(self) -> DomainEvent {
        self.0
    }
}

/// The events a propagator registers for on one of its variables.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DomainEvents(EnumSet<DomainEvent>);

impl DomainEvents {
    pub(crate) const BOUNDS: DomainEvents =
        DomainEvents(enum_set!(DomainEvent::LowerBound | DomainEvent::UpperBound));
    pub(crate) const ANY_INT: DomainEvents = DomainEvents(enum_set!(
        DomainEvent::Assign
            | DomainEvent::LowerBound
            | DomainEvent::UpperBound
            | DomainEvent::Removal
    ));
    pub(crate) const LOWER_BOUND: DomainEvents = DomainEvents(enum_set!(DomainEvent::LowerBound));
    pub(crate) const ASSIGN: DomainEvents = DomainEvents(enum_set!(DomainEvent::Assign));

    pub(crate) fn events(&self) -> EnumSet<DomainEvent> {
        self.0
    }
}
