use std::fmt::Display;

use itertools::Itertools;

use super::statistic_logging::log_statistic;

/// Logs statistics under a common name, such as `Regular_number_0`.
///
/// Each [`Propagator`](crate::engine::cp::propagation::Propagator) receives a logger named after
/// itself and its position in the solver; the fields of its statistics extend that name.
#[derive(Clone, Debug, Default)]
pub struct StatisticLogger {
    name: String,
}

impl StatisticLogger {
    /// A logger named by the `parts` joined with underscores.
    pub fn new(parts: impl IntoIterator<Item = impl Display>) -> Self {
        StatisticLogger {
            name: parts.into_iter().join("_"),
        }
    }

    /// A logger for the statistic `suffix` under this logger.
    pub fn attach_to_prefix(&self, suffix: impl Display) -> Self {
        StatisticLogger {
            name: format!("{}_{suffix}", self.name),
        }
    }

    pub fn log_statistic(&self, value: impl Display) {
        log_statistic(&self.name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_joined_with_underscores() {
        let logger = StatisticLogger::new(["Regular", "number", "2"]).attach_to_prefix("num_calls");

        assert_eq!("Regular_number_2_num_calls", logger.name);
    }

    #[test]
    fn prefixes_can_be_attached_repeatedly() {
        let logger = StatisticLogger::new(["State"])
            .attach_to_prefix("propagators")
            .attach_to_prefix(3);

        assert_eq!("State_propagators_3", logger.name);
    }
}
