//! Core configuration for tracks-animation-core.

use serde::{Deserialize, Serialize};

/// Registry and scheduler sizing plus the legacy naming switch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resolve v2 property names through the legacy alias table
    /// (`offsetPosition` addresses the `position` slot).
    pub legacy_property_aliases: bool,

    /// Initial capacity hint for the track arena.
    pub track_capacity: usize,

    /// Initial capacity hint for the active event set.
    pub event_capacity: usize,

    /// Maximum notifications recorded in one poll pass; extras are discarded.
    pub max_outputs_per_poll: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            legacy_property_aliases: false,
            track_capacity: 64,
            event_capacity: 256,
            max_outputs_per_poll: 1024,
        }
    }
}
