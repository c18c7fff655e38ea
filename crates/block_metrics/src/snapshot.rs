//! Metrics export and snapshot functionality

use crate::error::MetricsResult;
use crate::registry::Registry;
use crate::stats::HistoryStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statistics of every metric at a point in time, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub metrics: BTreeMap<String, MetricSummary>,
}

/// Serializable statistics of one metric, in nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSummary {
    /// Samples recorded since creation
    pub entered: u64,
    /// Samples currently in the window
    pub window: usize,
    pub total_ns: i64,
    pub average_ns: i64,
    pub min_ns: i64,
    pub max_ns: i64,
}

impl From<HistoryStats> for MetricSummary {
    fn from(stats: HistoryStats) -> Self {
        Self {
            entered: stats.entered,
            window: stats.window,
            total_ns: stats.total.count(),
            average_ns: stats.average.count(),
            min_ns: stats.min.count(),
            max_ns: stats.max.count(),
        }
    }
}

impl MetricsSnapshot {
    /// Create a snapshot from a registry.
    pub fn from_registry(registry: &Registry) -> Self {
        let metrics = registry
            .all_stats()
            .into_iter()
            .map(|(name, stats)| (name, MetricSummary::from(stats)))
            .collect();

        Self { metrics }
    }

    /// Summary of one metric, if present.
    pub fn get(&self, name: &str) -> Option<&MetricSummary> {
        self.metrics.get(name)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Export snapshot as JSON string
    pub fn to_json(&self) -> MetricsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Export snapshot as compact JSON string
    pub fn to_json_compact(&self) -> MetricsResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
