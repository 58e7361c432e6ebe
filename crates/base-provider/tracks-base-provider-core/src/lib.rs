//! tracks-base-provider-core: the base provider context.
//!
//! Hosts publish named values here (head position, note colors, song
//! progress...) or bind a name to a callback, and curves bound to those
//! names re-read them on every sample.

pub mod context;
pub mod keys;

pub use context::{BaseProviderContext, BaseValue};
