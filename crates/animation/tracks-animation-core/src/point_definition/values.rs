//! Value shapes a point definition can be typed over.
//!
//! Authored numbers and base-provider component arrays are converted through
//! the same trait so the sampler stays generic over float, vector3, vector4
//! and quaternion curves.

use serde::{Deserialize, Serialize};
use tracks_api_core::blend::{
    catmull_rom, lerp_array, lerp_f, lerp_hsv, normalize_quat, quat_from_euler_degrees, quat_mul,
    slerp,
};
use tracks_api_core::coercion::value_from_slice;
use tracks_api_core::{Value, ValueKind};

/// Arithmetic applied by a point modifier to the value accumulated so far.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Replace the accumulated value.
    #[serde(rename = "opNone")]
    None,
    #[serde(rename = "opAdd")]
    Add,
    #[serde(rename = "opSub")]
    Sub,
    #[serde(rename = "opMul")]
    Mul,
    #[serde(rename = "opDiv")]
    Div,
}

impl Operation {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "opNone" => Operation::None,
            "opAdd" => Operation::Add,
            "opSub" => Operation::Sub,
            "opMul" => Operation::Mul,
            "opDiv" => Operation::Div,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::None => "opNone",
            Operation::Add => "opAdd",
            Operation::Sub => "opSub",
            Operation::Mul => "opMul",
            Operation::Div => "opDiv",
        }
    }
}

#[inline]
fn apply_f(op: Operation, a: f32, b: f32) -> f32 {
    match op {
        Operation::None => b,
        Operation::Add => a + b,
        Operation::Sub => a - b,
        Operation::Mul => a * b,
        Operation::Div => a / b,
    }
}

pub trait PointValue: Copy + std::fmt::Debug + PartialEq + Send + Sync + 'static {
    const KIND: ValueKind;
    /// Numbers making up one authored value (quaternions are authored as Euler degrees).
    const AUTHORED_COMPONENTS: usize;
    const SUPPORTS_SPLINE: bool = false;
    const SUPPORTS_HSV: bool = false;

    fn from_authored(components: &[f32]) -> Option<Self>;

    /// Convert a base-provider component array.
    fn from_components(components: &[f32]) -> Option<Self> {
        value_from_slice(Self::KIND, components).and_then(|v| Self::from_value(&v))
    }

    /// Whether a base swizzle selecting `n` components can feed this shape.
    fn accepts_components(n: usize) -> bool {
        n == 1 || n == Self::KIND.components()
    }

    fn from_value(value: &Value) -> Option<Self>;
    fn into_value(self) -> Value;
    fn lerp(a: Self, b: Self, t: f32) -> Self;
    fn supports(op: Operation) -> bool;
    fn apply(self, op: Operation, rhs: Self) -> Self;

    fn catmull_rom(_p0: Self, _p1: Self, _p2: Self, _p3: Self, _t: f32) -> Option<Self> {
        None
    }

    fn lerp_hsv(_a: Self, _b: Self, _t: f32) -> Option<Self> {
        None
    }
}

impl PointValue for f32 {
    const KIND: ValueKind = ValueKind::Float;
    const AUTHORED_COMPONENTS: usize = 1;

    fn from_authored(components: &[f32]) -> Option<Self> {
        match components {
            [v] => Some(*v),
            _ => None,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_float()
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn lerp(a: Self, b: Self, t: f32) -> Self {
        lerp_f(a, b, t)
    }

    fn supports(_op: Operation) -> bool {
        true
    }

    fn apply(self, op: Operation, rhs: Self) -> Self {
        apply_f(op, self, rhs)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3(pub [f32; 3]);

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector4(pub [f32; 4]);

/// Rotation as (x, y, z, w).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion(pub [f32; 4]);

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion([0.0, 0.0, 0.0, 1.0])
    }
}

impl PointValue for Vector3 {
    const KIND: ValueKind = ValueKind::Vec3;
    const AUTHORED_COMPONENTS: usize = 3;
    const SUPPORTS_SPLINE: bool = true;

    fn from_authored(components: &[f32]) -> Option<Self> {
        match components {
            [x, y, z] => Some(Vector3([*x, *y, *z])),
            _ => None,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_vec3().map(Vector3)
    }

    fn into_value(self) -> Value {
        Value::Vec3(self.0)
    }

    fn lerp(a: Self, b: Self, t: f32) -> Self {
        Vector3(lerp_array(&a.0, &b.0, t))
    }

    fn supports(_op: Operation) -> bool {
        true
    }

    fn apply(self, op: Operation, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0) {
            *o = apply_f(op, *o, r);
        }
        Vector3(out)
    }

    fn catmull_rom(p0: Self, p1: Self, p2: Self, p3: Self, t: f32) -> Option<Self> {
        Some(Vector3(catmull_rom(p0.0, p1.0, p2.0, p3.0, t)))
    }
}

impl PointValue for Vector4 {
    const KIND: ValueKind = ValueKind::Vec4;
    const AUTHORED_COMPONENTS: usize = 4;
    const SUPPORTS_HSV: bool = true;

    fn from_authored(components: &[f32]) -> Option<Self> {
        match components {
            [x, y, z, w] => Some(Vector4([*x, *y, *z, *w])),
            _ => None,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_vec4().map(Vector4)
    }

    fn into_value(self) -> Value {
        Value::Vec4(self.0)
    }

    fn lerp(a: Self, b: Self, t: f32) -> Self {
        Vector4(lerp_array(&a.0, &b.0, t))
    }

    fn supports(_op: Operation) -> bool {
        true
    }

    fn apply(self, op: Operation, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0) {
            *o = apply_f(op, *o, r);
        }
        Vector4(out)
    }

    fn lerp_hsv(a: Self, b: Self, t: f32) -> Option<Self> {
        Some(Vector4(lerp_hsv(a.0, b.0, t)))
    }
}

impl PointValue for Quaternion {
    const KIND: ValueKind = ValueKind::Quat;
    const AUTHORED_COMPONENTS: usize = 3;

    fn from_authored(components: &[f32]) -> Option<Self> {
        match components {
            [x, y, z] => Some(Quaternion(quat_from_euler_degrees([*x, *y, *z]))),
            _ => None,
        }
    }

    /// Four components are a quaternion, three are Euler degrees.
    fn from_components(components: &[f32]) -> Option<Self> {
        match components {
            [x, y, z, w] => Some(Quaternion(normalize_quat([*x, *y, *z, *w]))),
            [_, _, _] => Self::from_authored(components),
            _ => None,
        }
    }

    fn accepts_components(n: usize) -> bool {
        n == 3 || n == 4
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_quat().map(Quaternion)
    }

    fn into_value(self) -> Value {
        Value::Quat(self.0)
    }

    fn lerp(a: Self, b: Self, t: f32) -> Self {
        Quaternion(slerp(a.0, b.0, t))
    }

    fn supports(op: Operation) -> bool {
        matches!(op, Operation::None | Operation::Mul)
    }

    fn apply(self, op: Operation, rhs: Self) -> Self {
        match op {
            Operation::None => rhs,
            Operation::Mul => Quaternion(quat_mul(self.0, rhs.0)),
            // Rejected when the curve is built.
            Operation::Add | Operation::Sub | Operation::Div => self,
        }
    }
}
