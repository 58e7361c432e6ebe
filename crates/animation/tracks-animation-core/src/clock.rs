//! Commit stamps for value properties.
//!
//! The scheduler asks its clock for one stamp per poll and writes it next to
//! every value committed during that pass. Stamps only need to grow; they are
//! not wall-clock readings.

use tracks_api_core::TimeUnit;

pub trait UpdateClock: Send {
    /// Next stamp. Must be strictly greater than any previous one and never
    /// [`TimeUnit::NEVER`].
    fn now(&mut self) -> TimeUnit;
}

/// Counts polls: 1ns, 2ns, 3ns...
#[derive(Debug, Default, Clone)]
pub struct TickClock {
    last: TimeUnit,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UpdateClock for TickClock {
    fn now(&mut self) -> TimeUnit {
        self.last = self.last.saturating_add_nanos(1);
        self.last
    }
}
