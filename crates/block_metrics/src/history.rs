//! Bounded wrap-around sample history for a single metric

use crate::stats::HistoryStats;
use crate::units::Nanos;

/// Number of samples a history keeps unless told otherwise.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Fixed-capacity ring of the most recent samples of one metric.
///
/// Once `capacity` samples have been recorded, each new sample overwrites
/// the oldest one. Statistics therefore describe a sliding window, while
/// [`History::times_entered`] keeps counting every sample ever recorded.
#[derive(Debug, Clone)]
pub struct History {
    capacity: usize,
    samples: Vec<Nanos>,
    entries: u64,
}

impl History {
    /// Create an empty history with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty history holding at most `capacity` samples.
    ///
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: Vec::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            entries: 0,
        }
    }

    /// Record one sample, overwriting the oldest once the ring is full.
    pub fn update(&mut self, elapsed: Nanos) {
        if self.samples.len() < self.capacity {
            self.samples.push(elapsed);
        } else {
            let slot = (self.entries % self.capacity as u64) as usize;
            self.samples[slot] = elapsed;
        }
        self.entries = self.entries.saturating_add(1);
    }

    /// Samples recorded since creation, not clipped to the capacity.
    #[inline]
    pub fn times_entered(&self) -> u64 {
        self.entries
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of samples in the window: `min(times_entered, capacity)`.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The window in ring-slot order.
    ///
    /// After wrap-around the newest samples sit in the lowest slots.
    #[inline]
    pub fn as_slice(&self) -> &[Nanos] {
        &self.samples
    }

    /// The window from oldest to newest sample.
    pub fn iter_chronological(&self) -> impl Iterator<Item = Nanos> + '_ {
        let oldest = if self.entries > self.capacity as u64 {
            (self.entries % self.capacity as u64) as usize
        } else {
            0
        };
        let (newer, older) = self.samples.split_at(oldest);
        older.iter().chain(newer.iter()).copied()
    }

    /// Smallest sample in the window, zero when empty.
    pub fn min(&self) -> Nanos {
        self.stats().min
    }

    /// Largest sample in the window, zero when empty.
    pub fn max(&self) -> Nanos {
        self.stats().max
    }

    /// Sum of the window. Samples that were overwritten are not included.
    pub fn total(&self) -> Nanos {
        self.stats().total
    }

    /// Truncated mean of the window, zero when empty.
    pub fn average(&self) -> Nanos {
        self.stats().average
    }

    /// All statistics computed in a single pass over the window.
    pub fn stats(&self) -> HistoryStats {
        HistoryStats::from_window(self.entries, &self.samples)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
