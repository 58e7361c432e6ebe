//! TimeUnit: a (seconds, nanoseconds) stamp used for change detection on
//! committed property values. It is not a clock; producers decide what the
//! stamps mean as long as they only ever grow.

use std::fmt;

use serde::{Deserialize, Serialize};

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Ordered pair (seconds, sub-second nanoseconds).
///
/// Field order gives the derived ordering: seconds first, then nanoseconds.
/// The all-zero value is the "never updated" sentinel.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimeUnit {
    seconds: u64,
    nanos: u32,
}

impl TimeUnit {
    /// Sentinel for a property that has never been written.
    pub const NEVER: TimeUnit = TimeUnit {
        seconds: 0,
        nanos: 0,
    };

    /// Build a stamp, carrying excess nanoseconds into seconds.
    pub fn new(seconds: u64, nanos: u32) -> Self {
        let carry = u64::from(nanos / NANOS_PER_SEC);
        Self {
            seconds: seconds.saturating_add(carry),
            nanos: nanos % NANOS_PER_SEC,
        }
    }

    /// Build a stamp from fractional seconds. Negative and non-finite inputs map to `NEVER`.
    pub fn from_secs_f64(secs: f64) -> Self {
        if !secs.is_finite() || secs <= 0.0 {
            return Self::NEVER;
        }
        let whole = secs.trunc();
        let nanos = ((secs - whole) * f64::from(NANOS_PER_SEC)).round() as u32;
        Self::new(whole as u64, nanos)
    }

    #[inline]
    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    #[inline]
    pub fn nanoseconds(&self) -> u32 {
        self.nanos
    }

    #[inline]
    pub fn is_never(&self) -> bool {
        *self == Self::NEVER
    }

    /// Advance by `nanos` nanoseconds, saturating at the maximum representable stamp.
    pub fn saturating_add_nanos(self, nanos: u64) -> Self {
        let total = u64::from(self.nanos) + nanos % u64::from(NANOS_PER_SEC);
        let seconds = self
            .seconds
            .saturating_add(nanos / u64::from(NANOS_PER_SEC))
            .saturating_add(total / u64::from(NANOS_PER_SEC));
        Self {
            seconds,
            nanos: (total % u64::from(NANOS_PER_SEC)) as u32,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}s", self.seconds, self.nanos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_lexicographic() {
        let a = TimeUnit::new(1, 999_999_999);
        let b = TimeUnit::new(2, 0);
        let c = TimeUnit::new(2, 1);
        assert!(a < b);
        assert!(b < c);
        assert!(TimeUnit::NEVER < a);
        assert_eq!(TimeUnit::new(2, 0), b);
        assert_ne!(TimeUnit::new(2, 0), c);
    }

    #[test]
    fn new_carries_nanos() {
        let t = TimeUnit::new(1, 1_500_000_000);
        assert_eq!(t.seconds(), 2);
        assert_eq!(t.nanoseconds(), 500_000_000);
    }

    #[test]
    fn add_nanos_rolls_over() {
        let t = TimeUnit::new(0, 999_999_999).saturating_add_nanos(1);
        assert_eq!(t, TimeUnit::new(1, 0));
        let t = TimeUnit::new(u64::MAX, 0).saturating_add_nanos(5_000_000_000);
        assert_eq!(t.seconds(), u64::MAX);
    }

    #[test]
    fn default_is_never() {
        assert!(TimeUnit::default().is_never());
        assert!(TimeUnit::from_secs_f64(-3.0).is_never());
        let t = TimeUnit::from_secs_f64(1.25);
        assert_eq!(t.seconds(), 1);
        assert_eq!(t.nanoseconds(), 250_000_000);
    }
}
