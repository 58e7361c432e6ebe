//! Type-erased point definition, chosen by [`ValueKind`] at build time.

use tracks_api_core::{JsonValue, Value, ValueKind};
use tracks_base_provider_core::BaseProviderContext;

use super::{
    FloatPointDefinition, PointDefinition, PointValue, QuaternionPointDefinition,
    Vector3PointDefinition, Vector4PointDefinition,
};
use crate::error::Result;

#[derive(Clone, Debug, PartialEq)]
pub enum BasePointDefinition {
    Float(FloatPointDefinition),
    Vector3(Vector3PointDefinition),
    Vector4(Vector4PointDefinition),
    Quaternion(QuaternionPointDefinition),
}

macro_rules! dispatch {
    ($self:expr, $def:ident => $body:expr) => {
        match $self {
            BasePointDefinition::Float($def) => $body,
            BasePointDefinition::Vector3($def) => $body,
            BasePointDefinition::Vector4($def) => $body,
            BasePointDefinition::Quaternion($def) => $body,
        }
    };
}

fn erase<T: PointValue>(
    def: &PointDefinition<T>,
    time: f32,
    ctx: Option<&BaseProviderContext>,
) -> (Option<Value>, bool) {
    let (value, last) = def.interpolate(time, ctx);
    (value.map(PointValue::into_value), last)
}

impl BasePointDefinition {
    pub fn from_json(json: &JsonValue, kind: ValueKind) -> Result<Self> {
        Ok(match kind {
            ValueKind::Float => Self::Float(PointDefinition::from_json(json)?),
            ValueKind::Vec3 => Self::Vector3(PointDefinition::from_json(json)?),
            ValueKind::Vec4 => Self::Vector4(PointDefinition::from_json(json)?),
            ValueKind::Quat => Self::Quaternion(PointDefinition::from_json(json)?),
        })
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Float(_) => ValueKind::Float,
            Self::Vector3(_) => ValueKind::Vec3,
            Self::Vector4(_) => ValueKind::Vec4,
            Self::Quaternion(_) => ValueKind::Quat,
        }
    }

    pub fn count(&self) -> usize {
        dispatch!(self, def => def.count())
    }

    pub fn has_base_provider(&self) -> bool {
        dispatch!(self, def => def.has_base_provider())
    }

    pub fn base_keys(&self) -> Vec<&str> {
        dispatch!(self, def => def.base_keys())
    }

    pub fn interpolate(
        &self,
        time: f32,
        ctx: Option<&BaseProviderContext>,
    ) -> (Option<Value>, bool) {
        dispatch!(self, def => erase(def, time, ctx))
    }
}

impl From<FloatPointDefinition> for BasePointDefinition {
    fn from(def: FloatPointDefinition) -> Self {
        Self::Float(def)
    }
}

impl From<Vector3PointDefinition> for BasePointDefinition {
    fn from(def: Vector3PointDefinition) -> Self {
        Self::Vector3(def)
    }
}

impl From<Vector4PointDefinition> for BasePointDefinition {
    fn from(def: Vector4PointDefinition) -> Self {
        Self::Vector4(def)
    }
}

impl From<QuaternionPointDefinition> for BasePointDefinition {
    fn from(def: QuaternionPointDefinition) -> Self {
        Self::Quaternion(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_request() {
        let json = JsonValue::parse_str("[[0, 0, 0, 0], [1, 1, 1, 1]]").unwrap();
        let def = BasePointDefinition::from_json(&json, ValueKind::Vec3).unwrap();
        assert_eq!(def.kind(), ValueKind::Vec3);
        assert_eq!(def.count(), 2);
        let (v, last) = def.interpolate(0.5, None);
        assert_eq!(v, Some(Value::vec3(0.5, 0.5, 0.5)));
        assert!(!last);
    }

    #[test]
    fn same_json_different_kind() {
        let json = JsonValue::parse_str("[[0, 0], [10, 1]]").unwrap();
        let def = BasePointDefinition::from_json(&json, ValueKind::Float).unwrap();
        assert_eq!(def.interpolate(1.0, None), (Some(Value::Float(10.0)), true));
        assert!(BasePointDefinition::from_json(&json, ValueKind::Vec4).is_err());
    }
}
