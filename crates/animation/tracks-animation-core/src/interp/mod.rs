//! Easing functions applied to normalized segment progress.

pub mod functions;

pub use functions::Functions;
