//! Value properties (last committed value + stamp) and path properties
//! (a live curve sampled on demand).

use tracks_api_core::blend::blend_values;
use tracks_api_core::{TimeUnit, Value, ValueKind};
use tracks_base_provider_core::BaseProviderContext;

use crate::error::{Result, TracksError};
use crate::point_definition::BasePointDefinition;

/// Last value committed by the scheduler and when it was committed.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueProperty {
    kind: ValueKind,
    value: Option<Value>,
    last_updated: TimeUnit,
}

impl ValueProperty {
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            value: None,
            last_updated: TimeUnit::NEVER,
        }
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    #[inline]
    pub fn value(&self) -> Option<Value> {
        self.value
    }

    #[inline]
    pub fn last_updated(&self) -> TimeUnit {
        self.last_updated
    }

    /// Commit `value` (or clear with `None`) stamped with `stamp`.
    pub fn set(&mut self, value: Option<Value>, stamp: TimeUnit) -> Result<()> {
        if let Some(v) = &value {
            if v.kind() != self.kind {
                return Err(TracksError::TypeMismatch {
                    expected: self.kind,
                    actual: v.kind(),
                });
            }
        }
        self.value = value;
        self.last_updated = stamp;
        Ok(())
    }

    /// True when written at or after `last_checked`, or always for the never sentinel.
    pub fn has_updated(&self, last_checked: TimeUnit) -> bool {
        last_checked.is_never() || self.last_updated >= last_checked
    }

    fn fresh(&self, last_checked: TimeUnit) -> Option<&Value> {
        if self.has_updated(last_checked) {
            self.value.as_ref()
        } else {
            None
        }
    }

    pub fn get_float(&self, last_checked: TimeUnit) -> Option<f32> {
        self.fresh(last_checked)?.as_float()
    }

    pub fn get_vec3(&self, last_checked: TimeUnit) -> Option<[f32; 3]> {
        self.fresh(last_checked)?.as_vec3()
    }

    pub fn get_vec4(&self, last_checked: TimeUnit) -> Option<[f32; 4]> {
        self.fresh(last_checked)?.as_vec4()
    }

    pub fn get_quat(&self, last_checked: TimeUnit) -> Option<[f32; 4]> {
        self.fresh(last_checked)?.as_quat()
    }
}

/// Curve currently assigned to a path property, plus the curve it replaced.
///
/// While a previous curve is kept, samples blend previous -> current by the
/// `time` cursor. `finish` drops the previous curve.
#[derive(Clone, Debug, PartialEq)]
pub struct PointDefinitionInterpolation {
    kind: ValueKind,
    point_data: Option<BasePointDefinition>,
    prev_point_data: Option<BasePointDefinition>,
    time: f32,
}

pub type PathProperty = PointDefinitionInterpolation;

impl PointDefinitionInterpolation {
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            point_data: None,
            prev_point_data: None,
            time: 0.0,
        }
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    pub fn point_data(&self) -> Option<&BasePointDefinition> {
        self.point_data.as_ref()
    }

    pub fn is_blending(&self) -> bool {
        self.prev_point_data.is_some()
    }

    /// Install `new` as the current curve; the old one becomes the blend source.
    pub fn init(&mut self, new: Option<BasePointDefinition>) -> Result<()> {
        if let Some(def) = &new {
            if def.kind() != self.kind {
                return Err(TracksError::TypeMismatch {
                    expected: self.kind,
                    actual: def.kind(),
                });
            }
        }
        self.time = 0.0;
        self.prev_point_data = std::mem::replace(&mut self.point_data, new);
        Ok(())
    }

    pub fn finish(&mut self) {
        self.prev_point_data = None;
    }

    pub fn interpolate(&self, time: f32, ctx: Option<&BaseProviderContext>) -> Option<Value> {
        let current = self.point_data.as_ref()?.interpolate(time, ctx).0?;
        let previous = self
            .prev_point_data
            .as_ref()
            .and_then(|prev| prev.interpolate(time, ctx).0);
        Some(match previous {
            Some(prev) => blend_values(&prev, &current, self.time),
            None => current,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracks_api_core::JsonValue;

    fn float_curve(src: &str) -> BasePointDefinition {
        BasePointDefinition::from_json(&JsonValue::parse_str(src).unwrap(), ValueKind::Float)
            .unwrap()
    }

    #[test]
    fn has_updated_compares_stamps() {
        let mut p = ValueProperty::new(ValueKind::Float);
        assert!(p.has_updated(TimeUnit::NEVER));
        assert!(!p.has_updated(TimeUnit::new(0, 5)));

        p.set(Some(Value::Float(1.0)), TimeUnit::new(0, 5)).unwrap();
        assert_eq!(p.get_float(TimeUnit::new(0, 5)), Some(1.0));
        assert_eq!(p.get_float(TimeUnit::new(0, 6)), None);
        assert_eq!(p.get_vec3(TimeUnit::NEVER), None);
    }

    #[test]
    fn set_rejects_wrong_kind() {
        let mut p = ValueProperty::new(ValueKind::Vec3);
        let err = p.set(Some(Value::Float(1.0)), TimeUnit::new(1, 0)).unwrap_err();
        assert!(matches!(err, TracksError::TypeMismatch { .. }));
        assert!(p.last_updated().is_never());
    }

    #[test]
    fn path_blends_from_previous_curve() {
        let mut path = PathProperty::new(ValueKind::Float);
        assert_eq!(path.interpolate(0.0, None), None);

        path.init(Some(float_curve("0"))).unwrap();
        path.finish();
        path.init(Some(float_curve("10"))).unwrap();
        assert!(path.is_blending());

        path.set_time(0.25);
        assert_eq!(path.interpolate(0.0, None), Some(Value::Float(2.5)));

        path.finish();
        assert_eq!(path.interpolate(0.0, None), Some(Value::Float(10.0)));
    }
}
