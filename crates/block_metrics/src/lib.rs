//! Block Metrics
//!
//! This crate measures how long named blocks of code take and aggregates the
//! measurements per name:
//! - RAII scope timers and the `record_block!` macro
//! - A bounded wrap-around history of recent samples per metric
//! - A thread-safe registry with count, total, min, max and average queries
//!   in any time unit
//! - Unit-scaled text reports and JSON snapshots
//!
//! # Feature Flags
//!
//! - `collect` (default): `record_block!` materializes a timer. Without it the
//!   macro expands to nothing and no metric is ever created.
//!
//! # Example
//!
//! ```rust
//! use block_metrics::{record_block, Nanoseconds, Registry, Reporter};
//!
//! let registry = Registry::new();
//! for _ in 0..10 {
//!     record_block!(&registry, "work");
//!     // ... work ...
//! }
//!
//! # #[cfg(feature = "collect")]
//! assert_eq!(registry.times_entered("work"), 10);
//! let (min, max) = registry.min_max::<Nanoseconds>("work");
//! assert!(min <= max);
//! println!("{}", Reporter::new(&registry).format::<Nanoseconds>("work"));
//! ```

mod config;
mod error;
mod history;
mod registry;
mod report;
mod snapshot;
mod stats;
mod timer;
mod units;

pub use config::MetricsConfig;
pub use error::{MetricsError, MetricsResult};
pub use history::{History, DEFAULT_CAPACITY};
pub use registry::{global_registry, Registry};
pub use report::{suffix_of, MetricReport, Reporter};
pub use snapshot::{MetricSummary, MetricsSnapshot};
pub use stats::{HistoryStats, UnitStats};
pub use timer::ScopedTimer;
pub use units::{
    Hours, Measure, Microseconds, Milliseconds, Minutes, Nanos, Nanoseconds, Seconds, TimeUnit,
};
