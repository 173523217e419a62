//! The process-wide destination of statistics.
//!
//! Nothing is written until [`configure_statistic_logging`] is called, which makes logging
//! statistics free for library users which never ask for them.

use std::fmt::Display;
use std::io::stdout;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::RwLock;

use convert_case::Case;
use convert_case::Casing;
use log::debug;

/// Where and how statistics are written. Every statistic is written on its own line as
/// `{prefix} {name}={value}`.
pub struct StatisticOptions<'a> {
    statistic_prefix: &'a str,
    /// Written once all statistics have been logged.
    after_statistics: Option<&'a str>,
    /// Applied to the statistic names.
    statistics_casing: Option<Case>,
    statistics_writer: Box<dyn Write + Send + Sync>,
}

impl std::fmt::Debug for StatisticOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("statistic_prefix", &self.statistic_prefix)
            .field("after_statistics", &self.after_statistics)
            .field("statistics_casing", &self.statistics_casing)
            .finish_non_exhaustive()
    }
}

impl StatisticOptions<'_> {
    fn write_line(&mut self, line: impl Display) {
        if let Err(e) = writeln!(self.statistics_writer, "{line}") {
            debug!("Could not write statistic: {e}");
        }
    }
}

static STATISTIC_OPTIONS: OnceLock<RwLock<StatisticOptions>> = OnceLock::new();

/// Runs `action` on the configured options; does nothing if statistics are not configured.
fn with_statistic_options(action: impl FnOnce(&mut StatisticOptions<'static>)) {
    if let Some(lock) = STATISTIC_OPTIONS.get() {
        if let Ok(mut options) = lock.write() {
            action(&mut options);
        }
    }
}

/// Enables the logging of statistics.
///
/// Every statistic is prefixed by `prefix`, `after` is written by [`log_statistic_postfix`], and
/// names are converted to `casing` when it is given. Statistics go to `writer`, or to stdout if
/// there is none. Only the first call has an effect.
pub fn configure_statistic_logging(
    prefix: &'static str,
    after: Option<&'static str>,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send + Sync>>,
) {
    let _ = STATISTIC_OPTIONS.get_or_init(|| {
        RwLock::new(StatisticOptions {
            statistic_prefix: prefix,
            after_statistics: after,
            statistics_casing: casing,
            statistics_writer: writer.unwrap_or_else(|| Box::new(stdout())),
        })
    });
}

/// Writes the statistic `name` with `value`.
pub fn log_statistic(name: impl Display, value: impl Display) {
    with_statistic_options(|options| {
        let name = match options.statistics_casing {
            Some(casing) => name.to_string().to_case(casing),
            None => name.to_string(),
        };
        let line = format!("{} {name}={value}", options.statistic_prefix);
        options.write_line(line);
    });
}

/// Writes the closing line of a block of statistics, if one was configured.
pub fn log_statistic_postfix() {
    with_statistic_options(|options| {
        if let Some(after) = options.after_statistics {
            options.write_line(after);
        }
    });
}

/// Whether [`configure_statistic_logging`] has been called.
pub fn should_log_statistics() -> bool {
    STATISTIC_OPTIONS.get().is_some()
}
