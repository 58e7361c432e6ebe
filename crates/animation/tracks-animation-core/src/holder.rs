//! TracksHolder: generational arena owning every track body.
//!
//! Handles carry the slot generation, so a handle to a removed track stays
//! dead even after its slot is reused. `track`/`track_mut` treat a dead
//! handle as a caller bug and panic; `get`/`get_mut` return `None`.

use log::warn;

use crate::config::Config;
use crate::ids::TrackKey;
use crate::track::Track;

#[derive(Debug)]
struct Slot {
    generation: u32,
    /// Insertion sequence of the current occupant; breaks name ties.
    seq: u64,
    track: Option<Track>,
}

#[derive(Debug)]
pub struct TracksHolder {
    slots: Vec<Slot>,
    free: Vec<u32>,
    next_seq: u64,
    len: usize,
    legacy_aliases: bool,
}

impl Default for TracksHolder {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl TracksHolder {
    pub fn new(config: &Config) -> Self {
        Self {
            slots: Vec::with_capacity(config.track_capacity),
            free: Vec::new(),
            next_seq: 0,
            len: 0,
            legacy_aliases: config.legacy_property_aliases,
        }
    }

    #[inline]
    pub fn legacy_aliases(&self) -> bool {
        self.legacy_aliases
    }

    /// Take ownership of `track` and return its handle. The track inherits
    /// the holder's alias mode.
    pub fn add_track(&mut self, mut track: Track) -> TrackKey {
        track.set_legacy_aliases(self.legacy_aliases);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.seq = seq;
            slot.track = Some(track);
            return TrackKey {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            seq,
            track: Some(track),
        });
        TrackKey {
            index,
            generation: 0,
        }
    }

    /// Destroy the track behind `key`, returning its body.
    pub fn remove_track(&mut self, key: TrackKey) -> Option<Track> {
        let slot = self.slot_mut(key)?;
        let track = slot.track.take()?;
        // Skip the all-ones generation so INVALID is never a live handle.
        slot.generation = match slot.generation.wrapping_add(1) {
            u32::MAX => 0,
            g => g,
        };
        self.free.push(key.index);
        self.len -= 1;
        Some(track)
    }

    fn slot(&self, key: TrackKey) -> Option<&Slot> {
        self.slots
            .get(key.index as usize)
            .filter(|s| s.generation == key.generation)
    }

    fn slot_mut(&mut self, key: TrackKey) -> Option<&mut Slot> {
        self.slots
            .get_mut(key.index as usize)
            .filter(|s| s.generation == key.generation)
    }

    pub fn contains(&self, key: TrackKey) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: TrackKey) -> Option<&Track> {
        self.slot(key)?.track.as_ref()
    }

    pub fn get_mut(&mut self, key: TrackKey) -> Option<&mut Track> {
        self.slot_mut(key)?.track.as_mut()
    }

    /// Resolve a handle that must be live.
    ///
    /// # Panics
    /// When `key` does not name a live track.
    pub fn track(&self, key: TrackKey) -> &Track {
        self.get(key)
            .unwrap_or_else(|| panic!("stale or invalid track handle {key}"))
    }

    /// Mutable counterpart of [`TracksHolder::track`].
    ///
    /// # Panics
    /// When `key` does not name a live track.
    pub fn track_mut(&mut self, key: TrackKey) -> &mut Track {
        self.get_mut(key)
            .unwrap_or_else(|| panic!("stale or invalid track handle {key}"))
    }

    /// Handle of the most recently added track named `name`.
    pub fn get_track_key(&self, name: &str) -> Option<TrackKey> {
        let mut best: Option<(u64, TrackKey)> = None;
        let mut matches = 0usize;
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(track) = &slot.track else { continue };
            if track.name() != name {
                continue;
            }
            matches += 1;
            if best.map_or(true, |(seq, _)| slot.seq > seq) {
                best = Some((
                    slot.seq,
                    TrackKey {
                        index: index as u32,
                        generation: slot.generation,
                    },
                ));
            }
        }
        if matches > 1 {
            warn!("{matches} tracks share the name '{name}', using the last added");
        }
        best.map(|(_, key)| key)
    }

    pub fn get_track_by_name(&self, name: &str) -> Option<&Track> {
        self.get_track_key(name).and_then(|key| self.get(key))
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (TrackKey, &Track)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.track.as_ref().map(|track| {
                (
                    TrackKey {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    track,
                )
            })
        })
    }
}
