//! Well-known property names and the fixed slots they occupy on a track.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracks_api_core::ValueKind;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u32)]
pub enum PropertyNames {
    Position,
    OffsetPosition,
    Rotation,
    Scale,
    LocalRotation,
    LocalPosition,
    DefinitePosition,
    Dissolve,
    DissolveArrow,
    Time,
    Cuttable,
    Color,
    Attenuation,
    FogOffset,
    HeightFogStartY,
    HeightFogHeight,
    UnknownPropertyName,
}

/// Value property slots in storage order.
pub const VALUE_SLOTS: [PropertyNames; 14] = [
    PropertyNames::Position,
    PropertyNames::Rotation,
    PropertyNames::Scale,
    PropertyNames::LocalRotation,
    PropertyNames::LocalPosition,
    PropertyNames::Dissolve,
    PropertyNames::DissolveArrow,
    PropertyNames::Time,
    PropertyNames::Cuttable,
    PropertyNames::Color,
    PropertyNames::Attenuation,
    PropertyNames::FogOffset,
    PropertyNames::HeightFogStartY,
    PropertyNames::HeightFogHeight,
];

/// Path property slots in storage order.
pub const PATH_SLOTS: [PropertyNames; 10] = [
    PropertyNames::Position,
    PropertyNames::Rotation,
    PropertyNames::Scale,
    PropertyNames::LocalRotation,
    PropertyNames::LocalPosition,
    PropertyNames::DefinitePosition,
    PropertyNames::Dissolve,
    PropertyNames::DissolveArrow,
    PropertyNames::Cuttable,
    PropertyNames::Color,
];

impl PropertyNames {
    /// Parse a property id. Accepts the v2 underscore-prefixed spellings.
    pub fn from_str_id(id: &str) -> PropertyNames {
        use PropertyNames::*;
        match id.strip_prefix('_').unwrap_or(id) {
            "position" => Position,
            "offsetPosition" => OffsetPosition,
            "rotation" => Rotation,
            "scale" => Scale,
            "localRotation" => LocalRotation,
            "localPosition" => LocalPosition,
            "definitePosition" => DefinitePosition,
            "dissolve" => Dissolve,
            "dissolveArrow" => DissolveArrow,
            "time" => Time,
            "interactable" | "cuttable" => Cuttable,
            "color" => Color,
            "attenuation" => Attenuation,
            "offset" => FogOffset,
            "startY" => HeightFogStartY,
            "height" => HeightFogHeight,
            _ => UnknownPropertyName,
        }
    }

    /// Canonical id, the inverse of [`PropertyNames::from_str_id`].
    pub fn id(self) -> &'static str {
        use PropertyNames::*;
        match self {
            Position => "position",
            OffsetPosition => "offsetPosition",
            Rotation => "rotation",
            Scale => "scale",
            LocalRotation => "localRotation",
            LocalPosition => "localPosition",
            DefinitePosition => "definitePosition",
            Dissolve => "dissolve",
            DissolveArrow => "dissolveArrow",
            Time => "time",
            Cuttable => "interactable",
            Color => "color",
            Attenuation => "attenuation",
            FogOffset => "offset",
            HeightFogStartY => "startY",
            HeightFogHeight => "height",
            UnknownPropertyName => "",
        }
    }

    /// Apply the legacy alias table.
    #[inline]
    pub fn alias(self, legacy: bool) -> PropertyNames {
        match self {
            PropertyNames::OffsetPosition if legacy => PropertyNames::Position,
            other => other,
        }
    }

    /// Kind stored in this property's slots, if it has any.
    pub fn kind(self) -> Option<ValueKind> {
        use PropertyNames::*;
        Some(match self {
            Position | OffsetPosition | Scale | LocalPosition => ValueKind::Vec3,
            Rotation | LocalRotation => ValueKind::Quat,
            Color => ValueKind::Vec4,
            DefinitePosition | Dissolve | DissolveArrow | Time | Cuttable | Attenuation
            | FogOffset | HeightFogStartY | HeightFogHeight => ValueKind::Float,
            UnknownPropertyName => return None,
        })
    }

    /// Index into [`VALUE_SLOTS`].
    #[inline]
    pub const fn value_slot(self) -> Option<usize> {
        use PropertyNames::*;
        Some(match self {
            Position => 0,
            Rotation => 1,
            Scale => 2,
            LocalRotation => 3,
            LocalPosition => 4,
            Dissolve => 5,
            DissolveArrow => 6,
            Time => 7,
            Cuttable => 8,
            Color => 9,
            Attenuation => 10,
            FogOffset => 11,
            HeightFogStartY => 12,
            HeightFogHeight => 13,
            OffsetPosition | DefinitePosition | UnknownPropertyName => return None,
        })
    }

    /// Index into [`PATH_SLOTS`].
    #[inline]
    pub const fn path_slot(self) -> Option<usize> {
        use PropertyNames::*;
        Some(match self {
            Position => 0,
            Rotation => 1,
            Scale => 2,
            LocalRotation => 3,
            LocalPosition => 4,
            DefinitePosition => 5,
            Dissolve => 6,
            DissolveArrow => 7,
            Cuttable => 8,
            Color => 9,
            OffsetPosition | Time | Attenuation | FogOffset | HeightFogStartY
            | HeightFogHeight | UnknownPropertyName => return None,
        })
    }
}

impl fmt::Display for PropertyNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A property addressed either by well-known name or by custom string id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyId {
    Name(PropertyNames),
    Custom(String),
}

impl PropertyId {
    /// Well-known ids become [`PropertyId::Name`], anything else is custom.
    pub fn parse(id: &str) -> Self {
        match PropertyNames::from_str_id(id) {
            PropertyNames::UnknownPropertyName => PropertyId::Custom(id.to_string()),
            name => PropertyId::Name(name),
        }
    }
}

impl PropertyId {
    /// The well-known name behind this id, whichever way it was built.
    pub fn well_known(&self) -> Option<PropertyNames> {
        match self {
            PropertyId::Name(PropertyNames::UnknownPropertyName) => None,
            PropertyId::Name(name) => Some(*name),
            PropertyId::Custom(id) => match PropertyNames::from_str_id(id) {
                PropertyNames::UnknownPropertyName => None,
                name => Some(name),
            },
        }
    }
}

impl From<PropertyNames> for PropertyId {
    fn from(name: PropertyNames) -> Self {
        PropertyId::Name(name)
    }
}

impl From<&str> for PropertyId {
    fn from(id: &str) -> Self {
        PropertyId::parse(id)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyId::Name(name) => write!(f, "{name}"),
            PropertyId::Custom(id) => f.write_str(id),
        }
    }
}
