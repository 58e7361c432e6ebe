//! Minimal JSON model for authoring point definitions.
//!
//! Curves are described with numbers, strings, nulls and nested arrays only;
//! booleans and objects never appear in keyframe data and are rejected when
//! converting from `serde_json::Value`.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as SerdeJson;
use thiserror::Error;

/// Errors produced while converting authoring JSON into [`JsonValue`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum JsonError {
    #[error("authoring json parse error: {0}")]
    Parse(String),
    #[error("booleans are not valid in point data (at {path})")]
    Bool { path: String },
    #[error("objects are not valid in point data (at {path})")]
    Object { path: String },
    #[error("number at {path} is not representable as f64")]
    Number { path: String },
}

/// Number | Null | String | Array of the same.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum JsonValue {
    Number(f64),
    #[default]
    Null,
    String(String),
    Array(Vec<JsonValue>),
}

impl JsonValue {
    /// Parse a JSON document directly into the authoring model.
    pub fn parse_str(src: &str) -> Result<Self, JsonError> {
        let raw: SerdeJson =
            serde_json::from_str(src).map_err(|e| JsonError::Parse(e.to_string()))?;
        Self::try_from(raw)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Number(_) => "number",
            JsonValue::Null => "null",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
        }
    }

    fn convert(raw: SerdeJson, path: &mut String) -> Result<Self, JsonError> {
        match raw {
            SerdeJson::Null => Ok(JsonValue::Null),
            SerdeJson::Number(n) => n
                .as_f64()
                .map(JsonValue::Number)
                .ok_or_else(|| JsonError::Number { path: path.clone() }),
            SerdeJson::String(s) => Ok(JsonValue::String(s)),
            SerdeJson::Bool(_) => Err(JsonError::Bool { path: path.clone() }),
            SerdeJson::Object(_) => Err(JsonError::Object { path: path.clone() }),
            SerdeJson::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.into_iter().enumerate() {
                    let len = path.len();
                    path.push_str(&format!("[{i}]"));
                    out.push(Self::convert(item, path)?);
                    path.truncate(len);
                }
                Ok(JsonValue::Array(out))
            }
        }
    }
}

impl TryFrom<SerdeJson> for JsonValue {
    type Error = JsonError;

    fn try_from(raw: SerdeJson) -> Result<Self, Self::Error> {
        let mut path = String::from("$");
        Self::convert(raw, &mut path)
    }
}

impl From<&JsonValue> for SerdeJson {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(SerdeJson::Number)
                .unwrap_or(SerdeJson::Null),
            JsonValue::Null => SerdeJson::Null,
            JsonValue::String(s) => SerdeJson::String(s.clone()),
            JsonValue::Array(items) => SerdeJson::Array(items.iter().map(SerdeJson::from).collect()),
        }
    }
}

impl From<f64> for JsonValue {
    fn from(n: f64) -> Self {
        JsonValue::Number(n)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(items: Vec<JsonValue>) -> Self {
        JsonValue::Array(items)
    }
}

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SerdeJson::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = SerdeJson::deserialize(deserializer)?;
        JsonValue::try_from(raw).map_err(D::Error::custom)
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", SerdeJson::from(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_nested_points() {
        let v = JsonValue::try_from(json!([[0, 0, 0, 0], [1, 2, 3, 1, "easeInQuad"]])).unwrap();
        let points = v.as_array().unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].as_array().unwrap()[4].as_str(), Some("easeInQuad"));
        assert_eq!(points[0].as_array().unwrap()[0].as_f64(), Some(0.0));
    }

    #[test]
    fn rejects_bool_with_path() {
        let err = JsonValue::try_from(json!([[0, true]])).unwrap_err();
        assert_eq!(
            err,
            JsonError::Bool {
                path: "$[0][1]".into()
            }
        );
    }

    #[test]
    fn rejects_objects() {
        let err = JsonValue::parse_str(r#"{"x": 1}"#).unwrap_err();
        assert!(matches!(err, JsonError::Object { .. }));
    }

    #[test]
    fn deserializes_inside_structs() {
        #[derive(Deserialize)]
        struct Holder {
            points: JsonValue,
        }
        let h: Holder = serde_json::from_str(r#"{"points": null}"#).unwrap();
        assert!(h.points.is_null());
        let bad = serde_json::from_str::<Holder>(r#"{"points": [false]}"#);
        assert!(bad.is_err());
    }
}
