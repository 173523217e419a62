//! Statistics which the solver and its propagators collect, and the functions which write them.
//!
//! Statistics are only written after [`configure_statistic_logging`] was called; see
//! [`Solver::log_statistics`].
pub(crate) mod statistic_logger;
pub(crate) mod statistic_logging;

use std::fmt::Display;

pub use statistic_logger::StatisticLogger;
pub use statistic_logging::configure_statistic_logging;
pub use statistic_logging::log_statistic;
pub use statistic_logging::log_statistic_postfix;
pub use statistic_logging::should_log_statistics;
pub use statistic_logging::StatisticOptions;

#[cfg(doc)]
use crate::Solver;

/// A value which can be written as one or more statistics.
///
/// Structs of counters are most easily made loggable with [`create_statistics_struct!`].
pub trait Statistic {
    /// Writes the [`Statistic`] under the name given by the [`StatisticLogger`].
    fn log(&self, statistic_logger: StatisticLogger);
}

impl<Value: Display> Statistic for Value {
    fn log(&self, statistic_logger: StatisticLogger) {
        statistic_logger.log_statistic(self);
    }
}

/// Declares a struct of counters which implements [`Statistic`]; every field is logged under
/// its own name.
///
/// # Example
/// ```rust
/// # use lantern_solver::create_statistics_struct;
/// create_statistics_struct!(
///     /// Counters of a propagator.
///     PropagatorStatistics {
///         num_calls: usize,
///         num_pruned_values: u64,
///     }
/// );
///
/// let mut statistics = PropagatorStatistics::default();
/// statistics.num_calls += 1;
///
/// assert_eq!(statistics.num_calls, 1);
/// assert_eq!(statistics.num_pruned_values, 0);
/// ```
#[macro_export]
macro_rules! create_statistics_struct {
    ($(#[$struct_documentation:meta])* $name:ident { $($(#[$variable_documentation:meta])* $field:ident : $type:ident),+ $(,)? }) => {
        $(#[$struct_documentation])*
        #[derive(Default, Debug, Copy, Clone)]
        pub(crate) struct $name {
            $($(#[$variable_documentation])* pub(crate) $field: $type),+
        }

        impl $crate::statistics::Statistic for $name {
            fn log(&self, statistic_logger: $crate::statistics::StatisticLogger) {
                $($crate::statistics::Statistic::log(
                    &self.$field,
                    statistic_logger.attach_to_prefix(stringify!($field)),
                ));+
            }
        }
    };
}
