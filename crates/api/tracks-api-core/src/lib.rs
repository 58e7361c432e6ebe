//! tracks-api-core: value & time model shared by the tracks crates (engine-agnostic)

pub mod blend;
pub mod coercion;
pub mod json;
pub mod time;
pub mod value;

pub use json::{JsonError, JsonValue};
pub use time::TimeUnit;
pub use value::{Value, ValueKind};
