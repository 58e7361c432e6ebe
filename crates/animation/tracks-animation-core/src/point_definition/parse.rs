//! Authoring JSON -> keyframes.
//!
//! Shapes accepted:
//! - `null` -> no keyframes
//! - `2.5` (float curves) -> one keyframe at time 0
//! - `"baseName.xyz"` -> one base-bound keyframe at time 0
//! - `[values..., time?, flags/modifiers...]` -> one keyframe
//! - `[[...], [...]]` -> one keyframe per inner array
//!
//! Time ordering is checked by `PointDefinition::new`, not here.

use tracks_api_core::coercion::split_base_reference;
use tracks_api_core::JsonValue;

use super::values::{Operation, PointValue};
use super::{Keyframe, Modifier, SegmentShape, ValueProvider};
use crate::error::{Result, TracksError};
use crate::interp::Functions;

const FLAG_SPLINE: &str = "splineCatmullRom";
const FLAG_HSV: &str = "lerpHSV";

pub(super) fn parse_points<T: PointValue>(json: &JsonValue) -> Result<Vec<Keyframe<T>>> {
    match json {
        JsonValue::Null => Ok(Vec::new()),
        JsonValue::Number(n) => {
            let value = T::from_authored(&[*n as f32]).ok_or_else(|| {
                TracksError::invalid(format!(
                    "a bare number cannot describe a {:?} curve",
                    T::KIND
                ))
            })?;
            Ok(vec![Keyframe::new(0.0, value)])
        }
        JsonValue::String(reference) => Ok(vec![Keyframe {
            time: 0.0,
            value: parse_base::<T>(reference)?,
            easing: Functions::EaseLinear,
            shape: SegmentShape::Linear,
            modifiers: Vec::new(),
        }]),
        JsonValue::Array(items) => match items.first() {
            None => Ok(Vec::new()),
            Some(JsonValue::Array(_)) => items
                .iter()
                .map(|item| match item {
                    JsonValue::Array(point) => parse_point::<T>(point),
                    other => Err(TracksError::invalid(format!(
                        "expected a point array, found {}",
                        other.type_name()
                    ))),
                })
                .collect(),
            Some(_) => Ok(vec![parse_point::<T>(items)?]),
        },
    }
}

fn parse_base<T: PointValue>(reference: &str) -> Result<ValueProvider<T>> {
    let (key, swizzle) = split_base_reference(reference);
    if key.is_empty() {
        return Err(TracksError::invalid(format!(
            "base reference '{reference}' has no name"
        )));
    }
    if let Some(indices) = &swizzle {
        if !T::accepts_components(indices.len()) {
            return Err(TracksError::invalid(format!(
                "swizzle in '{reference}' selects {} components for a {:?} curve",
                indices.len(),
                T::KIND
            )));
        }
    }
    Ok(ValueProvider::Base {
        key: key.to_string(),
        swizzle,
    })
}

/// Leading value of a point or modifier. Returns the provider and how many
/// items it consumed.
fn parse_value<T: PointValue>(items: &[JsonValue]) -> Result<(ValueProvider<T>, usize)> {
    if let Some(JsonValue::String(reference)) = items.first() {
        return Ok((parse_base::<T>(reference)?, 1));
    }
    let n = T::AUTHORED_COMPONENTS;
    let mut components = Vec::with_capacity(n);
    for item in items.iter().take(n) {
        match item.as_f64() {
            Some(v) => components.push(v as f32),
            None => break,
        }
    }
    let value = T::from_authored(&components).ok_or_else(|| {
        TracksError::invalid(format!(
            "{:?} point needs {n} numbers, found {}",
            T::KIND,
            components.len()
        ))
    })?;
    Ok((ValueProvider::Static(value), n))
}

fn parse_point<T: PointValue>(items: &[JsonValue]) -> Result<Keyframe<T>> {
    let (value, mut idx) = parse_value::<T>(items)?;
    let mut time = 0.0;
    if let Some(t) = items.get(idx).and_then(JsonValue::as_f64) {
        time = t as f32;
        idx += 1;
    }

    let mut keyframe = Keyframe {
        time,
        value,
        easing: Functions::EaseLinear,
        shape: SegmentShape::Linear,
        modifiers: Vec::new(),
    };

    for item in &items[idx..] {
        match item {
            JsonValue::String(flag) => apply_flag(&mut keyframe, flag)?,
            JsonValue::Array(modifier) => keyframe.modifiers.push(parse_modifier::<T>(modifier)?),
            other => {
                return Err(TracksError::invalid(format!(
                    "unexpected {} after point time",
                    other.type_name()
                )))
            }
        }
    }
    Ok(keyframe)
}

fn apply_flag<T: PointValue>(keyframe: &mut Keyframe<T>, flag: &str) -> Result<()> {
    if flag.starts_with("ease") {
        keyframe.easing = flag.parse()?;
        return Ok(());
    }
    keyframe.shape = match flag {
        FLAG_SPLINE if T::SUPPORTS_SPLINE => SegmentShape::CatmullRom,
        FLAG_HSV if T::SUPPORTS_HSV => SegmentShape::Hsv,
        _ => {
            return Err(TracksError::UnknownFlag {
                flag: flag.to_string(),
                kind: T::KIND,
            })
        }
    };
    Ok(())
}

fn parse_modifier<T: PointValue>(items: &[JsonValue]) -> Result<Modifier<T>> {
    let (value, idx) = parse_value::<T>(items)?;
    let rest = &items[idx..];
    let name = match rest {
        [JsonValue::String(name)] => name,
        _ => {
            return Err(TracksError::invalid(
                "modifier must end with exactly one operation name",
            ))
        }
    };
    let op = Operation::from_name(name).ok_or_else(|| {
        TracksError::invalid(format!("unknown modifier operation '{name}'"))
    })?;
    if !T::supports(op) {
        return Err(TracksError::UnsupportedOperation {
            op: name.clone(),
            kind: T::KIND,
        });
    }
    Ok(Modifier { value, op })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_definition::{Quaternion, Vector3, Vector4};
    use tracks_api_core::ValueKind;

    fn json(src: &str) -> JsonValue {
        JsonValue::parse_str(src).unwrap()
    }

    #[test]
    fn single_point_without_time() {
        let points = parse_points::<Vector3>(&json("[1, 2, 3]")).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].time, 0.0);
        assert_eq!(points[0].value, ValueProvider::Static(Vector3([1.0, 2.0, 3.0])));
    }

    #[test]
    fn flags_and_modifiers() {
        let points = parse_points::<Vector3>(&json(
            r#"[[0, 0, 0, 0], [1, 1, 1, 1, "easeOutCubic", "splineCatmullRom", [2, 2, 2, "opMul"]]]"#,
        ))
        .unwrap();
        let k = &points[1];
        assert_eq!(k.easing, Functions::EaseOutCubic);
        assert_eq!(k.shape, SegmentShape::CatmullRom);
        assert_eq!(k.modifiers.len(), 1);
        assert_eq!(k.modifiers[0].op, Operation::Mul);
    }

    #[test]
    fn base_reference_with_swizzle() {
        let points = parse_points::<f32>(&json(r#"[["baseHeadPosition.y", 0.5]]"#)).unwrap();
        assert_eq!(points[0].time, 0.5);
        assert_eq!(
            points[0].value,
            ValueProvider::Base {
                key: "baseHeadPosition".into(),
                swizzle: Some(vec![1])
            }
        );
    }

    #[test]
    fn spline_flag_rejected_on_colors() {
        let err = parse_points::<Vector4>(&json(r#"[1, 1, 1, 1, 0, "splineCatmullRom"]"#))
            .unwrap_err();
        assert_eq!(
            err,
            TracksError::UnknownFlag {
                flag: "splineCatmullRom".into(),
                kind: ValueKind::Vec4
            }
        );
    }

    #[test]
    fn quaternion_add_rejected() {
        let err = parse_points::<Quaternion>(&json(r#"[0, 0, 0, 0, [0, 90, 0, "opAdd"]]"#))
            .unwrap_err();
        assert!(matches!(err, TracksError::UnsupportedOperation { .. }));
    }

    #[test]
    fn unknown_easing_is_reported() {
        let err = parse_points::<f32>(&json(r#"[0, 0, "easeSideways"]"#)).unwrap_err();
        assert_eq!(
            err,
            TracksError::UnknownEasing {
                name: "easeSideways".into()
            }
        );
    }

    #[test]
    fn short_vector_point_rejected() {
        assert!(parse_points::<Vector3>(&json("[[1, 2]]")).is_err());
        assert!(parse_points::<Vector3>(&json("4")).is_err());
    }
}
