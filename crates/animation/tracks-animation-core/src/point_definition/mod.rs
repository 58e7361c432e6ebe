//! Point definitions: ordered keyframe curves typed over one value shape.
//!
//! Model:
//! - Each keyframe holds a time, a value (literal or base-provider reference),
//!   the easing for the segment it starts and an optional list of modifiers.
//! - Segment [k_i -> k_(i+1)] progress is `(t - k_i.time) / (k_(i+1).time - k_i.time)`,
//!   shaped by k_i's easing, then blended linearly (slerp for quaternions,
//!   Catmull-Rom or HSV when k_i asks for it).
//! - Base references are resolved on every sample, never cached.
//!
//! API:
//! - `PointDefinition::<T>::from_json(&JsonValue)` builds and validates a curve.
//! - `interpolate(t, ctx)` returns `(Option<T>, is_last)`.

mod base;
mod parse;
mod values;

pub use base::BasePointDefinition;
pub use values::{Operation, PointValue, Quaternion, Vector3, Vector4};

use tracks_api_core::coercion::{swizzle, Swizzle};
use tracks_api_core::JsonValue;
use tracks_base_provider_core::BaseProviderContext;

use crate::error::{Result, TracksError};
use crate::interp::Functions;

/// Where a keyframe or modifier gets its value from.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueProvider<T> {
    Static(T),
    Base {
        key: String,
        swizzle: Option<Swizzle>,
    },
}

impl<T: PointValue> ValueProvider<T> {
    #[inline]
    pub fn is_base(&self) -> bool {
        matches!(self, ValueProvider::Base { .. })
    }

    /// Resolve against the context. Missing keys and a missing context yield `None`.
    pub fn resolve(&self, ctx: Option<&BaseProviderContext>) -> Option<T> {
        match self {
            ValueProvider::Static(v) => Some(*v),
            ValueProvider::Base { key, swizzle: sw } => {
                let raw = ctx?.get_array(key);
                if raw.is_empty() {
                    return None;
                }
                match sw {
                    Some(indices) => T::from_components(&swizzle(&raw, indices)?),
                    None => T::from_components(&raw),
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Modifier<T> {
    pub value: ValueProvider<T>,
    pub op: Operation,
}

/// How the segment starting at a keyframe blends toward the next one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SegmentShape {
    #[default]
    Linear,
    /// Catmull-Rom through the neighbouring keyframes (vector3 only).
    CatmullRom,
    /// Blend rgb through HSV space (vector4 only).
    Hsv,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe<T> {
    pub time: f32,
    pub value: ValueProvider<T>,
    pub easing: Functions,
    pub shape: SegmentShape,
    pub modifiers: Vec<Modifier<T>>,
}

impl<T: PointValue> Keyframe<T> {
    pub fn new(time: f32, value: T) -> Self {
        Self {
            time,
            value: ValueProvider::Static(value),
            easing: Functions::EaseLinear,
            shape: SegmentShape::Linear,
            modifiers: Vec::new(),
        }
    }

    pub fn with_easing(mut self, easing: Functions) -> Self {
        self.easing = easing;
        self
    }

    pub fn uses_base(&self) -> bool {
        self.value.is_base() || self.modifiers.iter().any(|m| m.value.is_base())
    }

    /// Value with modifiers folded in, in authoring order.
    pub fn resolve(&self, ctx: Option<&BaseProviderContext>) -> Option<T> {
        let mut acc = self.value.resolve(ctx)?;
        for m in &self.modifiers {
            acc = acc.apply(m.op, m.value.resolve(ctx)?);
        }
        Some(acc)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointDefinition<T> {
    points: Vec<Keyframe<T>>,
    has_base_provider: bool,
}

pub type FloatPointDefinition = PointDefinition<f32>;
pub type Vector3PointDefinition = PointDefinition<Vector3>;
pub type Vector4PointDefinition = PointDefinition<Vector4>;
pub type QuaternionPointDefinition = PointDefinition<Quaternion>;

impl<T: PointValue> Default for PointDefinition<T> {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            has_base_provider: false,
        }
    }
}

impl<T: PointValue> PointDefinition<T> {
    /// Build from keyframes; times must be finite and non-decreasing.
    pub fn new(points: Vec<Keyframe<T>>) -> Result<Self> {
        let mut previous = f32::NEG_INFINITY;
        for (index, k) in points.iter().enumerate() {
            if !k.time.is_finite() || k.time < previous {
                return Err(TracksError::NonMonotonicTime {
                    index,
                    time: k.time,
                    previous,
                });
            }
            previous = k.time;
        }
        let has_base_provider = points.iter().any(Keyframe::uses_base);
        Ok(Self {
            points,
            has_base_provider,
        })
    }

    /// Parse authoring JSON into a validated curve.
    pub fn from_json(json: &JsonValue) -> Result<Self> {
        Self::new(parse::parse_points::<T>(json)?)
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn has_base_provider(&self) -> bool {
        self.has_base_provider
    }

    /// Base-provider keys referenced by any keyframe or modifier, in authoring order.
    pub fn base_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        let providers = self
            .points
            .iter()
            .flat_map(|k| std::iter::once(&k.value).chain(k.modifiers.iter().map(|m| &m.value)));
        for provider in providers {
            if let ValueProvider::Base { key, .. } = provider {
                if !keys.contains(&key.as_str()) {
                    keys.push(key.as_str());
                }
            }
        }
        keys
    }

    pub fn points(&self) -> &[Keyframe<T>] {
        &self.points
    }

    /// Sample at `time`. The flag is true once `time` reaches the last keyframe.
    ///
    /// Empty curves, a NaN `time` and unresolved base references sample as `None`.
    pub fn interpolate(&self, time: f32, ctx: Option<&BaseProviderContext>) -> (Option<T>, bool) {
        if time.is_nan() {
            return (None, false);
        }
        let ctx = if self.has_base_provider { ctx } else { None };
        let n = self.points.len();
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return (None, false);
        };
        if time >= last.time {
            return (last.resolve(ctx), true);
        }
        if time <= first.time {
            return (first.resolve(ctx), false);
        }

        // first.time < time < last.time, so 1 <= next <= n - 1.
        let next = self.points.partition_point(|k| k.time <= time);
        let i = next - 1;
        let left = &self.points[i];
        let right = &self.points[next];
        let span = right.time - left.time;
        let u = ((time - left.time) / span).clamp(0.0, 1.0);
        let eased = left.easing.interpolate(u);

        let (Some(a), Some(b)) = (left.resolve(ctx), right.resolve(ctx)) else {
            return (None, false);
        };
        let value = match left.shape {
            SegmentShape::CatmullRom => {
                let p0 = self.points[i.saturating_sub(1)].resolve(ctx).unwrap_or(a);
                let p3 = self.points[(next + 1).min(n - 1)].resolve(ctx).unwrap_or(b);
                T::catmull_rom(p0, a, b, p3, eased)
            }
            SegmentShape::Hsv => T::lerp_hsv(a, b, eased),
            SegmentShape::Linear => None,
        }
        .unwrap_or_else(|| T::lerp(a, b, eased));
        (Some(value), false)
    }
}
