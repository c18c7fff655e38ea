//! Scope-based block timing

use crate::registry::{global_registry, Registry};
use crate::units::Nanos;
use std::borrow::Cow;
use std::time::Instant;

/// A timer that records elapsed time from creation to drop.
///
/// Dropping the timer, whether by leaving the scope normally, through an
/// early return, `?` or a panic unwinding, records the elapsed time exactly
/// once into its registry.
///
/// # Example
///
/// ```rust
/// use block_metrics::{Registry, ScopedTimer};
///
/// let registry = Registry::new();
/// {
///     let _timer = ScopedTimer::with_registry("parse", &registry);
///     // ... parsing ...
/// }
/// assert_eq!(registry.times_entered("parse"), 1);
/// ```
#[derive(Debug)]
pub struct ScopedTimer<'r> {
    name: Cow<'static, str>,
    start: Instant,
    registry: Option<&'r Registry>,
}

impl ScopedTimer<'static> {
    /// Start a timer that records into the global registry.
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self::with_registry(name, global_registry())
    }
}

impl<'r> ScopedTimer<'r> {
    /// Start a timer that records into `registry`.
    #[inline]
    pub fn with_registry(name: impl Into<Cow<'static, str>>, registry: &'r Registry) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            registry: Some(registry),
        }
    }

    /// Metric name this timer records under.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time since the timer started.
    #[inline]
    pub fn elapsed(&self) -> Nanos {
        Nanos::from(self.start.elapsed())
    }

    /// Restart the timer from now.
    #[inline]
    pub fn restart(&mut self) {
        self.start = Instant::now();
    }

    /// Record now and return the elapsed time.
    ///
    /// Consumes the timer, so the drop does not record a second sample.
    pub fn stop(mut self) -> Nanos {
        let elapsed = self.elapsed();
        if let Some(registry) = self.registry.take() {
            registry.record(&self.name, elapsed);
        }
        elapsed
    }

    /// Drop the timer without recording anything.
    #[inline]
    pub fn discard(mut self) {
        self.registry = None;
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        let Some(registry) = self.registry.take() else {
            return;
        };
        let elapsed = self.elapsed();

        tracing::trace!(
            target: "block_metrics::timer",
            metric = %self.name,
            elapsed_ns = elapsed.count(),
            "timer completed"
        );

        registry.record(&self.name, elapsed);
    }
}

/// Time the rest of the enclosing block.
///
/// Records into the global registry, or into the registry given as the
/// first argument.
///
/// # Example
///
/// ```rust
/// use block_metrics::{global_registry, record_block};
///
/// fn load() {
///     record_block!("load");
///     // ... work ...
/// } // recorded here
///
/// load();
/// # #[cfg(feature = "collect")]
/// assert_eq!(global_registry().times_entered("load"), 1);
/// ```
#[cfg(feature = "collect")]
#[macro_export]
macro_rules! record_block {
    ($name:expr) => {
        let _block_timer = $crate::ScopedTimer::new($name);
    };
    ($registry:expr, $name:expr) => {
        let _block_timer = $crate::ScopedTimer::with_registry($name, $registry);
    };
}

/// Time the rest of the enclosing block (disabled: expands to nothing).
#[cfg(not(feature = "collect"))]
#[macro_export]
macro_rules! record_block {
    ($name:expr) => {};
    ($registry:expr, $name:expr) => {};
}
