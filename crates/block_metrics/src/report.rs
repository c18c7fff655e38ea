//! Unit-scaled text reports
//!
//! A report for one metric looks like this:
//!
//! ```text
//! foo_loop metrics:
//! 	Entered: 100
//! 	Total: 5355843ns
//! 	Average: 53558ns
//! 	Min: 26478ns
//! 	Max: 85410ns
//! ```
//!
//! Reports never go coarser than seconds. Asking for minutes or hours
//! produces the same report as asking for seconds.

use crate::registry::{global_registry, Registry};
use crate::stats::UnitStats;
use crate::units::{Seconds, TimeUnit};
use std::fmt;
use std::io;

/// Suffix a report in `U` is rendered with.
pub fn suffix_of<U: TimeUnit>() -> &'static str {
    if U::is_coarser_than_seconds() {
        Seconds::SUFFIX
    } else {
        U::SUFFIX
    }
}

/// The formatted statistics of one metric.
///
/// Rendered through [`fmt::Display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricReport<'a> {
    name: &'a str,
    entered: u64,
    total: i64,
    average: i64,
    min: i64,
    max: i64,
    suffix: &'static str,
}

impl<'a> MetricReport<'a> {
    fn new<U: TimeUnit>(name: &'a str, stats: UnitStats<U>) -> Self {
        Self {
            name,
            entered: stats.entered,
            total: stats.total.count(),
            average: stats.average.count(),
            min: stats.min.count(),
            max: stats.max.count(),
            suffix: U::SUFFIX,
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn suffix(&self) -> &'static str {
        self.suffix
    }
}

impl fmt::Display for MetricReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.suffix;
        writeln!(f, "{} metrics:", self.name)?;
        writeln!(f, "\tEntered: {}", self.entered)?;
        writeln!(f, "\tTotal: {}{unit}", self.total)?;
        writeln!(f, "\tAverage: {}{unit}", self.average)?;
        writeln!(f, "\tMin: {}{unit}", self.min)?;
        writeln!(f, "\tMax: {}{unit}", self.max)
    }
}

/// Formats registry statistics as text.
#[derive(Debug, Clone, Copy)]
pub struct Reporter<'r> {
    registry: &'r Registry,
}

impl Reporter<'static> {
    /// Reporter over the global registry.
    pub fn global() -> Self {
        Self::new(global_registry())
    }
}

impl<'r> Reporter<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Build the report of `name` in `U`.
    ///
    /// Units coarser than seconds are replaced by seconds. Unknown names
    /// produce an all-zero report.
    pub fn report<'a, U: TimeUnit>(&self, name: &'a str) -> MetricReport<'a> {
        if U::is_coarser_than_seconds() {
            return self.report::<Seconds>(name);
        }
        MetricReport::new(name, self.registry.unit_stats::<U>(name))
    }

    /// Render the report of `name` in `U`.
    pub fn format<U: TimeUnit>(&self, name: &str) -> String {
        self.report::<U>(name).to_string()
    }

    /// Render every known metric, each block followed by an empty line.
    ///
    /// Metrics appear in no particular order.
    pub fn format_all<U: TimeUnit>(&self) -> String {
        let mut out = String::new();
        for name in self.registry.metric_names() {
            out.push_str(&self.format::<U>(&name));
            out.push('\n');
        }
        out
    }

    /// Write the report of `name` in `U` to `sink`.
    pub fn write_metric<U: TimeUnit, W: io::Write>(&self, name: &str, sink: &mut W) -> io::Result<()> {
        write!(sink, "{}", self.report::<U>(name))
    }

    /// Write every known metric to `sink`, in the layout of [`Reporter::format_all`].
    pub fn write_all<U: TimeUnit, W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        for name in self.registry.metric_names() {
            self.write_metric::<U, W>(&name, sink)?;
            writeln!(sink)?;
        }
        Ok(())
    }

    /// Emit one `info` event per metric with its statistics in `U`.
    pub fn log_all<U: TimeUnit>(&self) {
        for name in self.registry.metric_names() {
            let report = self.report::<U>(&name);
            tracing::info!(
                target: "block_metrics::report",
                metric = report.name,
                entered = report.entered,
                total = report.total,
                average = report.average,
                min = report.min,
                max = report.max,
                unit = report.suffix,
                "metric summary"
            );
        }
    }
}
