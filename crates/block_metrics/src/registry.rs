//! Mapping from metric names to their histories

use crate::config::MetricsConfig;
use crate::error::MetricsResult;
use crate::history::{History, DEFAULT_CAPACITY};
use crate::snapshot::MetricsSnapshot;
use crate::stats::{HistoryStats, UnitStats};
use crate::timer::ScopedTimer;
use crate::units::{Measure, Nanos, TimeUnit};
use parking_lot::{Mutex, RwLock};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Global registry instance
static GLOBAL_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Get the global registry.
///
/// This is the registry `record_block!` and [`ScopedTimer::new`] record
/// into. It is created on first use with [`DEFAULT_CAPACITY`] and lives for
/// the rest of the process.
pub fn global_registry() -> &'static Registry {
    GLOBAL_REGISTRY.get_or_init(Registry::new)
}

/// Thread-safe mapping from metric name to [`History`].
///
/// Each history sits behind its own mutex, so recording into one metric
/// never waits on another. The outer map lock is only taken for writing
/// when a name is seen for the first time.
///
/// Queries for names that were never recorded return zero.
pub struct Registry {
    metrics: RwLock<HashMap<String, Arc<Mutex<History>>>>,
    capacity: usize,
}

impl Registry {
    /// Create a registry whose histories keep [`DEFAULT_CAPACITY`] samples.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a registry whose histories keep `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            metrics: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Create a registry from a validated configuration.
    pub fn from_config(config: &MetricsConfig) -> MetricsResult<Self> {
        config.validate()?;
        Ok(Self::with_capacity(config.history_capacity))
    }

    /// Record one elapsed duration under `name`.
    pub fn record(&self, name: &str, elapsed: Nanos) {
        let history = match self.history(name) {
            Some(history) => history,
            None => self.insert(name),
        };
        history.lock().update(elapsed);

        tracing::trace!(
            target: "block_metrics::registry",
            metric = name,
            elapsed_ns = elapsed.count(),
            "sample recorded"
        );
    }

    fn insert(&self, name: &str) -> Arc<Mutex<History>> {
        let mut metrics = self.metrics.write();
        let history = metrics.entry(name.to_string()).or_insert_with(|| {
            tracing::debug!(
                target: "block_metrics::registry",
                metric = name,
                capacity = self.capacity,
                "new metric"
            );
            Arc::new(Mutex::new(History::with_capacity(self.capacity)))
        });
        Arc::clone(history)
    }

    fn history(&self, name: &str) -> Option<Arc<Mutex<History>>> {
        self.metrics.read().get(name).cloned()
    }

    /// Build a timer that records into this registry when dropped.
    pub fn timer(&self, name: impl Into<Cow<'static, str>>) -> ScopedTimer<'_> {
        ScopedTimer::with_registry(name, self)
    }

    /// Samples recorded under `name` since it was first seen.
    pub fn times_entered(&self, name: &str) -> u64 {
        self.history(name)
            .map(|history| history.lock().times_entered())
            .unwrap_or(0)
    }

    /// Smallest sample in the window of `name`.
    pub fn min<U: TimeUnit>(&self, name: &str) -> Measure<U> {
        self.query(name, History::min)
    }

    /// Largest sample in the window of `name`.
    pub fn max<U: TimeUnit>(&self, name: &str) -> Measure<U> {
        self.query(name, History::max)
    }

    /// `(min, max)` of `name`, read from a single view of the history.
    pub fn min_max<U: TimeUnit>(&self, name: &str) -> (Measure<U>, Measure<U>) {
        let stats = self.unit_stats::<U>(name);
        (stats.min, stats.max)
    }

    /// Truncated mean of the window of `name`.
    pub fn average<U: TimeUnit>(&self, name: &str) -> Measure<U> {
        self.query(name, History::average)
    }

    /// Sum of the window of `name`.
    pub fn total<U: TimeUnit>(&self, name: &str) -> Measure<U> {
        self.query(name, History::total)
    }

    fn query<U: TimeUnit>(&self, name: &str, read: impl FnOnce(&History) -> Nanos) -> Measure<U> {
        self.history(name)
            .map(|history| read(&*history.lock()).convert())
            .unwrap_or_else(Measure::zero)
    }

    /// All statistics of `name`, or `None` if it was never recorded.
    pub fn stats(&self, name: &str) -> Option<HistoryStats> {
        self.history(name).map(|history| history.lock().stats())
    }

    /// All statistics of `name` in `U`; zero for unknown names.
    pub fn unit_stats<U: TimeUnit>(&self, name: &str) -> UnitStats<U> {
        self.stats(name).unwrap_or_default().in_unit()
    }

    /// Statistics for every known metric.
    ///
    /// Each history is read under its own lock, so the result is consistent
    /// per metric but not across metrics.
    pub fn all_stats(&self) -> Vec<(String, HistoryStats)> {
        let histories: Vec<(String, Arc<Mutex<History>>)> = self
            .metrics
            .read()
            .iter()
            .map(|(name, history)| (name.clone(), Arc::clone(history)))
            .collect();

        histories
            .into_iter()
            .map(|(name, history)| {
                let stats = history.lock().stats();
                (name, stats)
            })
            .collect()
    }

    /// Capture every metric for export.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot::from_registry(self)
    }

    /// Whether `name` has been recorded.
    pub fn contains(&self, name: &str) -> bool {
        self.metrics.read().contains_key(name)
    }

    /// Names of all known metrics, in no particular order.
    pub fn metric_names(&self) -> Vec<String> {
        self.metrics.read().keys().cloned().collect()
    }

    /// Number of known metrics.
    pub fn len(&self) -> usize {
        self.metrics.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.read().is_empty()
    }

    /// Capacity given to each new history.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("metrics", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
