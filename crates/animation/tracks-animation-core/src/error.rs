//! Error types for curve construction and event scheduling.
//!
//! Only malformed input is reported here. Absent base values, samples before
//! the first keyframe and events whose track disappeared resolve to defaults
//! and never surface as errors.

use tracks_api_core::{JsonError, ValueKind};

use crate::ids::TrackKey;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TracksError {
    /// Keyframe times must be finite and non-decreasing.
    #[error("keyframe {index} at time {time} precedes the previous keyframe at {previous}")]
    NonMonotonicTime {
        index: usize,
        time: f32,
        previous: f32,
    },

    #[error("invalid point definition: {reason}")]
    InvalidPointDefinition { reason: String },

    #[error("unknown easing function: {name}")]
    UnknownEasing { name: String },

    #[error("unknown point flag '{flag}' for {kind:?} curve")]
    UnknownFlag { flag: String, kind: ValueKind },

    #[error("operation {op} is not supported for {kind:?} values")]
    UnsupportedOperation { op: String, kind: ValueKind },

    #[error("event duration must be positive, got {duration}")]
    NonPositiveDuration { duration: f32 },

    #[error("bpm must be positive and finite, got {bpm}")]
    InvalidBpm { bpm: f32 },

    #[error("track not found: {track}")]
    TrackNotFound { track: String },

    #[error("property '{property}' not found on track {track:?}")]
    UnknownProperty { track: TrackKey, property: String },

    #[error("value type mismatch: expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error(transparent)]
    Json(#[from] JsonError),
}

impl TracksError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        TracksError::InvalidPointDefinition {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TracksError>;
