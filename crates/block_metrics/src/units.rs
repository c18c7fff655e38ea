//! Time units and unit-generic duration conversion
//!
//! Every measurement is stored as a signed nanosecond count ([`Nanos`]).
//! Coarser units are derived by truncating integer division, driven by a
//! single per-unit factor so that no query needs a per-unit branch.

use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

/// A unit of time that measurements can be expressed in.
///
/// Implementors are zero-sized markers. The conversion factor and the
/// report suffix are the only per-unit data.
pub trait TimeUnit:
    Copy + Clone + Debug + Default + PartialEq + Eq + PartialOrd + Ord + Hash + Send + Sync + 'static
{
    /// How many nanoseconds make up one unit.
    const NANOS_PER_UNIT: i64;

    /// Suffix appended to values in text reports.
    ///
    /// Units coarser than seconds report with `"s"`.
    const SUFFIX: &'static str;

    /// Whether this unit is coarser than [`Seconds`].
    #[inline]
    fn is_coarser_than_seconds() -> bool {
        Self::NANOS_PER_UNIT > Seconds::NANOS_PER_UNIT
    }
}

macro_rules! time_unit {
    ($(#[$doc:meta])* $name:ident, $nanos:expr, $suffix:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name;

        impl TimeUnit for $name {
            const NANOS_PER_UNIT: i64 = $nanos;
            const SUFFIX: &'static str = $suffix;
        }
    };
}

time_unit!(
    /// Nanoseconds, the internal unit.
    Nanoseconds,
    1,
    "ns"
);
time_unit!(
    /// Microseconds.
    Microseconds,
    1_000,
    "us"
);
time_unit!(
    /// Milliseconds.
    Milliseconds,
    1_000_000,
    "ms"
);
time_unit!(
    /// Seconds.
    Seconds,
    1_000_000_000,
    "s"
);
time_unit!(
    /// Minutes. Reports collapse to seconds.
    Minutes,
    60_000_000_000,
    "s"
);
time_unit!(
    /// Hours. Reports collapse to seconds.
    Hours,
    3_600_000_000_000,
    "s"
);

/// A signed count of some [`TimeUnit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Measure<U: TimeUnit> {
    count: i64,
    unit: PhantomData<U>,
}

/// A nanosecond measurement, the universal internal duration.
pub type Nanos = Measure<Nanoseconds>;

impl<U: TimeUnit> Measure<U> {
    /// The zero measure of this unit.
    #[inline]
    pub const fn zero() -> Self {
        Self::from_count(0)
    }

    /// Wrap a raw count of `U`.
    #[inline]
    pub const fn from_count(count: i64) -> Self {
        Self {
            count,
            unit: PhantomData,
        }
    }

    /// Convert a nanosecond count into this unit, truncating toward zero.
    #[inline]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self::from_count(nanos / U::NANOS_PER_UNIT)
    }

    /// The raw count of `U`.
    #[inline]
    pub const fn count(self) -> i64 {
        self.count
    }

    /// The value in nanoseconds, saturating at the `i64` bounds.
    #[inline]
    pub const fn as_nanos(self) -> i64 {
        self.count.saturating_mul(U::NANOS_PER_UNIT)
    }

    /// Re-express this measure in another unit.
    ///
    /// Always goes through nanoseconds, so converting to a coarser unit
    /// truncates exactly like [`Measure::from_nanos`].
    #[inline]
    pub fn convert<V: TimeUnit>(self) -> Measure<V> {
        Measure::from_nanos(self.as_nanos())
    }

    /// Report suffix of the unit.
    #[inline]
    pub fn suffix(self) -> &'static str {
        U::SUFFIX
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.count == 0
    }
}

impl From<std::time::Duration> for Nanos {
    /// Durations beyond `i64::MAX` nanoseconds (about 292 years) saturate.
    fn from(duration: std::time::Duration) -> Self {
        Self::from_count(i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX))
    }
}
