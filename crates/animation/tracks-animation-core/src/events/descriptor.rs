//! Serializable event descriptors, resolved against a registry into [`EventData`].

use serde::{Deserialize, Serialize};
use tracks_api_core::{JsonError, JsonValue};

use super::{EventData, EventType};
use crate::error::{Result, TracksError};
use crate::holder::TracksHolder;
use crate::ids::TrackKey;
use crate::interp::Functions;
use crate::names::PropertyId;
use crate::point_definition::BasePointDefinition;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    AnimateTrack,
    AssignPathAnimation,
}

/// A track addressed by raw 64-bit handle or by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackRef {
    Handle(u64),
    Name(String),
}

impl TrackRef {
    fn resolve(&self, holder: &TracksHolder) -> Option<TrackKey> {
        match self {
            TrackRef::Handle(raw) => {
                let key = TrackKey::from_ffi(*raw);
                holder.contains(key).then_some(key)
            }
            TrackRef::Name(name) => holder.get_track_key(name),
        }
    }
}

impl std::fmt::Display for TrackRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackRef::Handle(raw) => write!(f, "{}", TrackKey::from_ffi(*raw)),
            TrackRef::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDescriptor {
    /// Beats per cycle.
    pub duration: f32,
    #[serde(default)]
    pub easing: Functions,
    #[serde(default)]
    pub repeat: u32,
    #[serde(default)]
    pub start_time: f32,
    pub kind: EventKind,
    pub property: String,
    pub track: TrackRef,
    #[serde(default)]
    pub point_data: JsonValue,
}

impl EventDescriptor {
    /// Parse one descriptor from a JSON document.
    pub fn from_json_str(src: &str) -> Result<Self> {
        serde_json::from_str(src).map_err(|e| JsonError::Parse(e.to_string()).into())
    }

    /// Look up the target track and property, then parse `point_data` as a
    /// curve of the property's kind.
    pub fn resolve(&self, holder: &TracksHolder) -> Result<EventData> {
        let track_key = self
            .track
            .resolve(holder)
            .ok_or_else(|| TracksError::TrackNotFound {
                track: self.track.to_string(),
            })?;
        let track = holder.track(track_key);

        let property = PropertyId::parse(&self.property);
        let kind = match self.kind {
            EventKind::AnimateTrack => track.property(&property).map(|p| p.kind()),
            EventKind::AssignPathAnimation => track.path_property(&property).map(|p| p.kind()),
        }
        .ok_or_else(|| TracksError::UnknownProperty {
            track: track_key,
            property: self.property.clone(),
        })?;

        let point_data = if self.point_data.is_null() {
            None
        } else {
            Some(BasePointDefinition::from_json(&self.point_data, kind)?)
        };
        let event_type = match self.kind {
            EventKind::AnimateTrack => EventType::AnimateTrack(property),
            EventKind::AssignPathAnimation => EventType::AssignPathAnimation(property),
        };

        Ok(EventData {
            raw_duration: self.duration,
            easing: self.easing,
            repeat: self.repeat,
            start_time: self.start_time,
            event_type,
            track_key,
            point_data,
        })
    }
}
