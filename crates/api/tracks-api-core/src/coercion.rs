//! Coercion helpers between Value shapes and raw component arrays.
//! Base-provider bindings read component arrays and may select a subset of
//! them through a swizzle suffix (`"name.xz"`).

use crate::{Value, ValueKind};

/// Component indices selected by a swizzle such as `xyz` or `wx`.
pub type Swizzle = Vec<usize>;

/// Parse swizzle letters (`x`, `y`, `z`, `w`) into component indices.
/// Returns `None` for an empty string or any other letter.
pub fn parse_swizzle(s: &str) -> Option<Swizzle> {
    if s.is_empty() || s.len() > 4 {
        return None;
    }
    s.chars()
        .map(|c| match c {
            'x' => Some(0),
            'y' => Some(1),
            'z' => Some(2),
            'w' => Some(3),
            _ => None,
        })
        .collect()
}

/// Split a base reference into its key and optional swizzle.
///
/// `"headPos.xz"` -> `("headPos", Some([0, 2]))`. A trailing segment that is
/// not a valid swizzle stays part of the key.
pub fn split_base_reference(reference: &str) -> (&str, Option<Swizzle>) {
    if let Some((key, suffix)) = reference.rsplit_once('.') {
        if let Some(sw) = parse_swizzle(suffix) {
            return (key, Some(sw));
        }
    }
    (reference, None)
}

/// Select components from `src`. Out-of-range indices yield `None`.
pub fn swizzle(src: &[f32], indices: &[usize]) -> Option<Vec<f32>> {
    indices.iter().map(|&i| src.get(i).copied()).collect()
}

/// Build a value of `kind` from an arbitrary component slice.
///
/// - exact arity -> direct
/// - a single component -> broadcast (quaternions are not broadcast)
/// - anything else -> `None`
pub fn value_from_slice(kind: ValueKind, components: &[f32]) -> Option<Value> {
    if components.len() == kind.components() {
        return Value::from_components(kind, components);
    }
    match (kind, components) {
        (ValueKind::Vec3, [s]) => Some(Value::Vec3([*s; 3])),
        (ValueKind::Vec4, [s]) => Some(Value::Vec4([*s; 4])),
        _ => None,
    }
}
