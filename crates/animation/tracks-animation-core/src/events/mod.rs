//! Events: declarative requests to drive a track property over a time window.

mod coroutine;
mod descriptor;

pub use coroutine::CoroutineManager;
pub use descriptor::{EventDescriptor, EventKind, TrackRef};

use serde::{Deserialize, Serialize};

use crate::ids::TrackKey;
use crate::interp::Functions;
use crate::names::PropertyId;
use crate::point_definition::BasePointDefinition;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// Write sampled values into a value property.
    AnimateTrack(PropertyId),
    /// Swap a new curve into a path property and drive its blend cursor.
    AssignPathAnimation(PropertyId),
}

impl EventType {
    pub fn property(&self) -> &PropertyId {
        match self {
            EventType::AnimateTrack(p) | EventType::AssignPathAnimation(p) => p,
        }
    }

    #[inline]
    pub fn is_path(&self) -> bool {
        matches!(self, EventType::AssignPathAnimation(_))
    }
}

/// A resolved event, ready for `CoroutineManager::start_event`.
#[derive(Clone, Debug, PartialEq)]
pub struct EventData {
    /// Length of one cycle in beats.
    pub raw_duration: f32,
    pub easing: Functions,
    /// Extra cycles after the first; 0 runs once.
    pub repeat: u32,
    /// Song time in seconds at which the first cycle starts.
    pub start_time: f32,
    pub event_type: EventType,
    pub track_key: TrackKey,
    pub point_data: Option<BasePointDefinition>,
}

impl EventData {
    pub fn animate(track_key: TrackKey, property: impl Into<PropertyId>) -> Self {
        Self {
            raw_duration: 0.0,
            easing: Functions::EaseLinear,
            repeat: 0,
            start_time: 0.0,
            event_type: EventType::AnimateTrack(property.into()),
            track_key,
            point_data: None,
        }
    }

    pub fn assign_path(track_key: TrackKey, property: impl Into<PropertyId>) -> Self {
        Self {
            event_type: EventType::AssignPathAnimation(property.into()),
            ..Self::animate(track_key, PropertyId::Custom(String::new()))
        }
    }

    pub fn with_duration(mut self, beats: f32) -> Self {
        self.raw_duration = beats;
        self
    }

    pub fn with_start_time(mut self, seconds: f32) -> Self {
        self.start_time = seconds;
        self
    }

    pub fn with_easing(mut self, easing: Functions) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_point_data(mut self, point_data: impl Into<BasePointDefinition>) -> Self {
        self.point_data = Some(point_data.into());
        self
    }
}
