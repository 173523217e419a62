mod assignments;
mod domain_events;
mod event_sink;
pub(crate) mod propagation;
mod propagator_queue;
#[cfg(test)]
pub(crate) mod test_solver;
mod watch_list_cp;

pub use assignments::Assignments;
pub use assignments::EmptyDomain;
pub use domain_events::DomainEvent;
pub(crate) use domain_events::DomainEvents;
pub use domain_events::OpaqueDomainEvent;
pub(crate) use event_sink::EventSink;
pub(crate) use propagator_queue::PropagatorQueue;
pub(crate) use watch_list_cp::WatchListCP;
pub use watch_list_cp::Watchers;
