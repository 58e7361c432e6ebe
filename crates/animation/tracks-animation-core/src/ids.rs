//! Identifiers and simple allocators for core entities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to a track inside a [`TracksHolder`](crate::holder::TracksHolder).
///
/// The generation distinguishes successive occupants of one arena slot, so a
/// handle to a removed track never resolves to its replacement.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackKey {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl TrackKey {
    /// All-ones sentinel; never handed out by a holder.
    pub const INVALID: TrackKey = TrackKey {
        index: u32::MAX,
        generation: u32::MAX,
    };

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[inline]
    pub fn is_invalid(&self) -> bool {
        *self == Self::INVALID
    }

    /// Pack into the 64-bit host form: generation high, slot low.
    #[inline]
    pub fn to_ffi(self) -> u64 {
        (u64::from(self.generation) << 32) | u64::from(self.index)
    }

    #[inline]
    pub fn from_ffi(raw: u64) -> Self {
        Self {
            index: raw as u32,
            generation: (raw >> 32) as u32,
        }
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Identifier of a running event instance.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

/// Removal token returned when registering a game-object listener.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CallbackToken(pub u64);

/// Opaque host object reference attached to a track.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GameObject(pub u64);

/// Monotonic allocator for EventId and CallbackToken. Values are never reused.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_event: u64,
    next_callback: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_event(&mut self) -> EventId {
        let id = EventId(self.next_event);
        self.next_event = self.next_event.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_callback(&mut self) -> CallbackToken {
        let id = CallbackToken(self.next_callback);
        self.next_callback = self.next_callback.wrapping_add(1);
        id
    }
}
