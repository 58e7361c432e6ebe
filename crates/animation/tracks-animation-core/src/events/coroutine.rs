//! CoroutineManager: the set of running events, advanced by song time.
//!
//! Each poll recomputes every instance from `song_time - start_time` alone,
//! so polling is seek-safe and repeated polls at one time commit the same
//! values. Instances are processed in insertion order; starting an event on
//! a (track, property) that is already animated replaces the older instance.

use log::{debug, trace};
use tracks_api_core::{TimeUnit, ValueKind};
use tracks_base_provider_core::BaseProviderContext;

use super::{EventData, EventType};
use crate::clock::{TickClock, UpdateClock};
use crate::config::Config;
use crate::error::{Result, TracksError};
use crate::holder::TracksHolder;
use crate::ids::{EventId, IdAllocator, TrackKey};
use crate::interp::Functions;
use crate::names::PropertyId;
use crate::outputs::{Change, EventNotice, PollOutputs};
use crate::point_definition::BasePointDefinition;
use crate::track::Track;

#[derive(Debug)]
struct Coroutine {
    id: EventId,
    track: TrackKey,
    event_type: EventType,
    /// `event_type`'s property with the alias table applied; identifies conflicts.
    target: PropertyId,
    /// Seconds per cycle.
    duration: f32,
    start_time: f32,
    easing: Functions,
    repeat: u32,
    point_data: Option<BasePointDefinition>,
    installed: bool,
}

/// Where an instance stands at a given song time.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Phase {
    Scheduled,
    Running { cycle: u32, progress: f32 },
    Finished { cycles: u32 },
}

impl Coroutine {
    fn phase(&self, song_time: f32) -> Phase {
        let elapsed = song_time - self.start_time;
        // NaN song times never start an instance.
        if elapsed.is_nan() || elapsed < 0.0 {
            return Phase::Scheduled;
        }
        let cycles = self.repeat.saturating_add(1);
        if elapsed >= self.duration * cycles as f32 {
            return Phase::Finished { cycles };
        }
        let cycle = ((elapsed / self.duration).floor() as u32).min(self.repeat);
        let local = elapsed - cycle as f32 * self.duration;
        Phase::Running {
            cycle,
            progress: (local / self.duration).clamp(0.0, 1.0),
        }
    }
}

enum Step {
    Keep,
    Retire { cycles: u32 },
    Drop,
}

pub struct CoroutineManager {
    active: Vec<Coroutine>,
    ids: IdAllocator,
    clock: Box<dyn UpdateClock>,
    outputs: PollOutputs,
    max_outputs: usize,
}

impl Default for CoroutineManager {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl std::fmt::Debug for CoroutineManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoroutineManager")
            .field("active", &self.active)
            .field("max_outputs", &self.max_outputs)
            .finish()
    }
}

impl CoroutineManager {
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, Box::new(TickClock::new()))
    }

    pub fn with_clock(config: &Config, clock: Box<dyn UpdateClock>) -> Self {
        Self {
            active: Vec::with_capacity(config.event_capacity),
            ids: IdAllocator::new(),
            clock,
            outputs: PollOutputs::default(),
            max_outputs: config.max_outputs_per_poll,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn contains(&self, event: EventId) -> bool {
        self.active.iter().any(|c| c.id == event)
    }

    pub fn cancel(&mut self, event: EventId) -> bool {
        let before = self.active.len();
        self.active.retain(|c| c.id != event);
        self.active.len() != before
    }

    /// Cancel every instance targeting `track`; returns how many were removed.
    pub fn cancel_track(&mut self, track: TrackKey) -> usize {
        let before = self.active.len();
        self.active.retain(|c| c.track != track);
        before - self.active.len()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Outputs of the most recent poll.
    pub fn outputs(&self) -> &PollOutputs {
        &self.outputs
    }

    /// Validate `event` and schedule it. Nothing is written until the next poll.
    ///
    /// `raw_duration` is in beats and converted with `bpm`; the point data is
    /// cloned, so the caller keeps its copy. Base values are read at poll time;
    /// `context` is only checked for keys the curve binds but nobody publishes.
    pub fn start_event(
        &mut self,
        event: &EventData,
        bpm: f32,
        song_time: f32,
        context: Option<&BaseProviderContext>,
        holder: &TracksHolder,
    ) -> Result<EventId> {
        if !(bpm.is_finite() && bpm > 0.0) {
            return Err(TracksError::InvalidBpm { bpm });
        }
        if !(event.raw_duration.is_finite() && event.raw_duration > 0.0) {
            return Err(TracksError::NonPositiveDuration {
                duration: event.raw_duration,
            });
        }
        let track = holder
            .get(event.track_key)
            .ok_or_else(|| TracksError::TrackNotFound {
                track: event.track_key.to_string(),
            })?;

        let property = event.event_type.property();
        let expected = target_kind(track, &event.event_type).ok_or_else(|| {
            TracksError::UnknownProperty {
                track: event.track_key,
                property: property.to_string(),
            }
        })?;
        if let Some(def) = &event.point_data {
            if def.kind() != expected {
                return Err(TracksError::TypeMismatch {
                    expected,
                    actual: def.kind(),
                });
            }
        }

        if let (Some(ctx), Some(def)) = (context, &event.point_data) {
            for key in def.base_keys().into_iter().filter(|key| !ctx.contains(key)) {
                debug!(
                    "event on track {} binds base value '{key}', which is not published yet",
                    event.track_key
                );
            }
        }

        let target = match property.well_known() {
            Some(name) => PropertyId::Name(name.alias(track.legacy_aliases())),
            None => property.clone(),
        };
        let is_path = event.event_type.is_path();
        if let Some(pos) = self.active.iter().position(|c| {
            c.track == event.track_key && c.target == target && c.event_type.is_path() == is_path
        }) {
            let old = self.active.remove(pos);
            debug!(
                "replacing event {:?} on track {} property {}",
                old.id, event.track_key, target
            );
        }

        let id = self.ids.alloc_event();
        let duration = 60.0 * event.raw_duration / bpm;
        debug!(
            "start event {id:?} on track {} property {} at {}s for {duration}s (song time {song_time}, repeat {})",
            event.track_key, target, event.start_time, event.repeat
        );
        self.active.push(Coroutine {
            id,
            track: event.track_key,
            event_type: event.event_type.clone(),
            target,
            duration,
            start_time: event.start_time,
            easing: event.easing,
            repeat: event.repeat,
            point_data: event.point_data.clone(),
            installed: false,
        });
        Ok(id)
    }

    /// Advance every instance to `song_time` and commit results into `holder`.
    pub fn poll(
        &mut self,
        song_time: f32,
        ctx: &BaseProviderContext,
        holder: &mut TracksHolder,
    ) -> &PollOutputs {
        self.outputs.clear();
        let stamp = self.clock.now();
        let max_outputs = self.max_outputs;
        let outputs = &mut self.outputs;

        self.active.retain_mut(|c| {
            let step = match holder.get_mut(c.track) {
                Some(track) => advance(c, song_time, ctx, stamp, track, outputs, max_outputs),
                None => Step::Drop,
            };
            match step {
                Step::Keep => true,
                Step::Retire { cycles } => {
                    trace!("event {:?} finished after {cycles} cycle(s)", c.id);
                    if outputs.events.len() < max_outputs {
                        outputs.events.push(EventNotice::Completed {
                            event: c.id,
                            track: c.track,
                            cycles,
                        });
                    }
                    false
                }
                Step::Drop => {
                    debug!(
                        "dropping event {:?}: track {} or property {} is gone",
                        c.id, c.track, c.target
                    );
                    if outputs.events.len() < max_outputs {
                        outputs.events.push(EventNotice::Dropped {
                            event: c.id,
                            track: c.track,
                        });
                    }
                    false
                }
            }
        });
        &self.outputs
    }
}

fn target_kind(track: &Track, event_type: &EventType) -> Option<ValueKind> {
    match event_type {
        EventType::AnimateTrack(p) => track.property(p).map(|p| p.kind()),
        EventType::AssignPathAnimation(p) => track.path_property(p).map(|p| p.kind()),
    }
}

fn advance(
    c: &mut Coroutine,
    song_time: f32,
    ctx: &BaseProviderContext,
    stamp: TimeUnit,
    track: &mut Track,
    outputs: &mut PollOutputs,
    max_outputs: usize,
) -> Step {
    let (t, finished) = match c.phase(song_time) {
        Phase::Scheduled => return Step::Keep,
        Phase::Running { progress, .. } => (c.easing.interpolate(progress), None),
        Phase::Finished { cycles } => (c.easing.interpolate(1.0), Some(cycles)),
    };

    match &c.event_type {
        EventType::AnimateTrack(id) => {
            let Some(property) = track.property_mut(id) else {
                return Step::Drop;
            };
            let Some(def) = &c.point_data else {
                // No curve: clear once and retire.
                if property.set(None, stamp).is_err() {
                    return Step::Drop;
                }
                push_change(outputs, max_outputs, c, None);
                return Step::Retire { cycles: 0 };
            };
            // An unresolved base value holds the previous commit.
            if let (Some(value), _) = def.interpolate(t, Some(ctx)) {
                if property.set(Some(value), stamp).is_err() {
                    return Step::Drop;
                }
                push_change(outputs, max_outputs, c, Some(value));
            }
        }
        EventType::AssignPathAnimation(id) => {
            let Some(path) = track.path_property_mut(id) else {
                return Step::Drop;
            };
            if !c.installed {
                if path.init(c.point_data.clone()).is_err() {
                    return Step::Drop;
                }
                c.installed = true;
            }
            path.set_time(t);
            if finished.is_some() {
                path.finish();
            }
        }
    }

    match finished {
        Some(cycles) => Step::Retire { cycles },
        None => Step::Keep,
    }
}

fn push_change(
    outputs: &mut PollOutputs,
    max_outputs: usize,
    c: &Coroutine,
    value: Option<tracks_api_core::Value>,
) {
    if outputs.changes.len() < max_outputs {
        outputs.changes.push(Change {
            event: c.id,
            track: c.track,
            property: c.event_type.property().clone(),
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coroutine(duration: f32, start: f32, repeat: u32) -> Coroutine {
        Coroutine {
            id: EventId(0),
            track: TrackKey::INVALID,
            event_type: EventType::AnimateTrack(PropertyId::Custom("x".into())),
            target: PropertyId::Custom("x".into()),
            duration,
            start_time: start,
            easing: Functions::EaseLinear,
            repeat,
            point_data: None,
            installed: false,
        }
    }

    #[test]
    fn phase_walks_through_cycles() {
        let c = coroutine(2.0, 1.0, 1);
        assert_eq!(c.phase(0.5), Phase::Scheduled);
        assert_eq!(
            c.phase(2.0),
            Phase::Running {
                cycle: 0,
                progress: 0.5
            }
        );
        assert_eq!(
            c.phase(4.0),
            Phase::Running {
                cycle: 1,
                progress: 0.5
            }
        );
        assert_eq!(c.phase(5.0), Phase::Finished { cycles: 2 });
    }

    #[test]
    fn nan_song_time_stays_scheduled() {
        let c = coroutine(2.0, 0.0, 0);
        assert_eq!(c.phase(f32::NAN), Phase::Scheduled);
        assert_eq!(c.phase(f32::INFINITY), Phase::Finished { cycles: 1 });
    }
}
