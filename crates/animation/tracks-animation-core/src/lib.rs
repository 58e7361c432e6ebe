//! Tracks Animation Core (engine-agnostic)
//!
//! Keyframe curves ("point definitions") over float, vector and quaternion
//! values, tracks that own animated properties, a generational track
//! registry, and a song-time driven event scheduler. Hosts drive everything
//! through `CoroutineManager::poll` with their own song time; the crate never
//! reads a wall clock and never installs a logger.

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod holder;
pub mod ids;
pub mod interp;
pub mod names;
pub mod outputs;
pub mod point_definition;
pub mod property;
pub mod track;

// Re-exports for consumers (hosts and adapters)
pub use clock::{TickClock, UpdateClock};
pub use config::Config;
pub use error::{Result, TracksError};
pub use events::{
    CoroutineManager, EventData, EventDescriptor, EventKind, EventType, TrackRef,
};
pub use holder::TracksHolder;
pub use ids::{CallbackToken, EventId, GameObject, TrackKey};
pub use interp::Functions;
pub use names::{PropertyId, PropertyNames};
pub use outputs::{Change, EventNotice, PollOutputs};
pub use point_definition::{
    BasePointDefinition, FloatPointDefinition, Keyframe, PointDefinition,
    QuaternionPointDefinition, Vector3PointDefinition, Vector4PointDefinition,
};
pub use property::{PathProperty, PointDefinitionInterpolation, ValueProperty};
pub use track::{PathPropertiesValues, PropertiesValues, Track};
pub use tracks_api_core::{JsonValue, TimeUnit, Value, ValueKind};
pub use tracks_base_provider_core::{BaseProviderContext, BaseValue};
