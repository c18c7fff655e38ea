//! Statistics derived from a history window

use crate::units::{Measure, Nanos, TimeUnit};

/// Statistical summary of one metric's current window.
///
/// `entered` counts every sample ever recorded, while the remaining fields
/// only describe the samples still held in the window. Once a history has
/// wrapped around, `entered` is larger than `window`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryStats {
    /// Number of samples recorded since the history was created
    pub entered: u64,
    /// Number of samples in the window
    pub window: usize,
    /// Sum of the window
    pub total: Nanos,
    /// Smallest sample in the window
    pub min: Nanos,
    /// Largest sample in the window
    pub max: Nanos,
    /// `total / window`, truncated
    pub average: Nanos,
}

impl HistoryStats {
    /// Calculate statistics over a window of samples.
    ///
    /// An empty window yields zero for every duration field.
    pub fn from_window(entered: u64, window: &[Nanos]) -> Self {
        if window.is_empty() {
            return Self {
                entered,
                ..Self::default()
            };
        }

        let mut sum: i128 = 0;
        let mut min = i64::MAX;
        let mut max = i64::MIN;
        for sample in window {
            let nanos = sample.count();
            sum += i128::from(nanos);
            min = min.min(nanos);
            max = max.max(nanos);
        }

        let len = window.len();
        Self {
            entered,
            window: len,
            total: Nanos::from_count(saturate(sum)),
            min: Nanos::from_count(min),
            max: Nanos::from_count(max),
            average: Nanos::from_count(saturate(sum / len as i128)),
        }
    }

    /// Express every duration field in `U`.
    pub fn in_unit<U: TimeUnit>(&self) -> UnitStats<U> {
        UnitStats {
            entered: self.entered,
            total: self.total.convert(),
            average: self.average.convert(),
            min: self.min.convert(),
            max: self.max.convert(),
        }
    }
}

/// [`HistoryStats`] converted into a caller-chosen unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitStats<U: TimeUnit> {
    pub entered: u64,
    pub total: Measure<U>,
    pub average: Measure<U>,
    pub min: Measure<U>,
    pub max: Measure<U>,
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}
