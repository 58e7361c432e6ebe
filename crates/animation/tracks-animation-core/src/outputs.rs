//! Output contracts from the scheduler.
//!
//! Outputs carry the value commits made during one poll, keyed by track and
//! property, and a separate list of lifecycle notices. They are cleared at
//! the start of every poll.

use serde::{Deserialize, Serialize};
use tracks_api_core::Value;

use crate::ids::{EventId, TrackKey};
use crate::names::PropertyId;

/// One value-property commit. `value: None` means the property was cleared.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub event: EventId,
    pub track: TrackKey,
    pub property: PropertyId,
    pub value: Option<Value>,
}

/// Lifecycle signals emitted while polling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EventNotice {
    /// Ran its last cycle and left the active set.
    Completed {
        event: EventId,
        track: TrackKey,
        cycles: u32,
    },
    /// Removed because its track or property no longer exists.
    Dropped { event: EventId, track: TrackKey },
}

/// Outputs returned by `CoroutineManager::poll`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PollOutputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<EventNotice>,
}

impl PollOutputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    pub fn completed(&self) -> impl Iterator<Item = (EventId, u32)> + '_ {
        self.events.iter().filter_map(|e| match e {
            EventNotice::Completed { event, cycles, .. } => Some((*event, *cycles)),
            _ => None,
        })
    }

    pub fn dropped(&self) -> impl Iterator<Item = EventId> + '_ {
        self.events.iter().filter_map(|e| match e {
            EventNotice::Dropped { event, .. } => Some(*event),
            _ => None,
        })
    }
}
