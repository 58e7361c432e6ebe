//! Value: the tagged union every curve, property and base provider speaks.
//! All numeric components are f32.

use serde::{Deserialize, Serialize};

/// Coarse kind tag for a [`Value`]. The discriminants match the wire tags used
/// by hosts (vector3 = 0, quaternion = 1, vector4 = 2, float = 3).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Vec3 = 0,
    Quat = 1,
    Vec4 = 2,
    Float = 3,
}

impl ValueKind {
    /// Number of f32 components carried by values of this kind.
    #[inline]
    pub const fn components(self) -> usize {
        match self {
            ValueKind::Float => 1,
            ValueKind::Vec3 => 3,
            ValueKind::Vec4 | ValueKind::Quat => 4,
        }
    }

    /// Wire tag for this kind.
    #[inline]
    pub const fn tag(self) -> i32 {
        self as i32
    }

    /// Parse a wire tag. Unknown tags (including the host's `-1`) yield `None`.
    pub fn from_tag(tag: i32) -> Option<Self> {
        match tag {
            0 => Some(ValueKind::Vec3),
            1 => Some(ValueKind::Quat),
            2 => Some(ValueKind::Vec4),
            3 => Some(ValueKind::Float),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    /// Scalar float
    Float(f32),

    /// 3D vector
    Vec3([f32; 3]),

    /// 4D vector (colors are carried as rgba vec4)
    Vec4([f32; 4]),

    /// Quaternion (x, y, z, w)
    Quat([f32; 4]),
}

impl Value {
    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Vec4(_) => ValueKind::Vec4,
            Value::Quat(_) => ValueKind::Quat,
        }
    }

    /// Borrow the raw components (x, y, z, w order).
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        match self {
            Value::Float(v) => std::slice::from_ref(v),
            Value::Vec3(v) => v,
            Value::Vec4(v) | Value::Quat(v) => v,
        }
    }

    /// Build a value of `kind` from exactly `kind.components()` components.
    pub fn from_components(kind: ValueKind, components: &[f32]) -> Option<Self> {
        if components.len() != kind.components() {
            return None;
        }
        Some(match kind {
            ValueKind::Float => Value::Float(components[0]),
            ValueKind::Vec3 => Value::Vec3([components[0], components[1], components[2]]),
            ValueKind::Vec4 => Value::Vec4([
                components[0],
                components[1],
                components[2],
                components[3],
            ]),
            ValueKind::Quat => Value::Quat([
                components[0],
                components[1],
                components[2],
                components[3],
            ]),
        })
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<[f32; 3]> {
        match self {
            Value::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec4(&self) -> Option<[f32; 4]> {
        match self {
            Value::Vec4(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_quat(&self) -> Option<[f32; 4]> {
        match self {
            Value::Quat(v) => Some(*v),
            _ => None,
        }
    }

    /// Convenience constructors
    pub fn f(v: f32) -> Self {
        Value::Float(v)
    }

    pub fn vec3(x: f32, y: f32, z: f32) -> Self {
        Value::Vec3([x, y, z])
    }

    pub fn vec4(x: f32, y: f32, z: f32, w: f32) -> Self {
        Value::Vec4([x, y, z, w])
    }

    pub fn quat(x: f32, y: f32, z: f32, w: f32) -> Self {
        Value::Quat([x, y, z, w])
    }

    /// The identity quaternion.
    pub fn quat_identity() -> Self {
        Value::Quat([0.0, 0.0, 0.0, 1.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_roundtrip() {
        for kind in [
            ValueKind::Vec3,
            ValueKind::Quat,
            ValueKind::Vec4,
            ValueKind::Float,
        ] {
            assert_eq!(ValueKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ValueKind::from_tag(-1), None);
    }

    #[test]
    fn from_components_checks_arity() {
        assert_eq!(
            Value::from_components(ValueKind::Vec3, &[1.0, 2.0, 3.0]),
            Some(Value::vec3(1.0, 2.0, 3.0))
        );
        assert_eq!(Value::from_components(ValueKind::Vec3, &[1.0, 2.0]), None);
        assert_eq!(
            Value::from_components(ValueKind::Quat, &[0.0, 0.0, 0.0, 1.0]),
            Some(Value::quat_identity())
        );
    }

    #[test]
    fn json_shape_is_tagged() {
        let s = serde_json::to_string(&Value::vec3(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(s, r#"{"type":"vec3","data":[1.0,0.0,0.0]}"#);
    }
}
