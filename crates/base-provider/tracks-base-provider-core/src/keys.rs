//! Well-known base value names published by hosts.
//!
//! [`DEFAULTS`] pairs each name with its kind so a context can be seeded
//! before the host has written anything.

use tracks_api_core::ValueKind;

pub const SONG_TIME: &str = "baseSongTime";
pub const SONG_LENGTH: &str = "baseSongLength";
pub const COMBO: &str = "baseCombo";
pub const ENERGY: &str = "baseEnergy";
pub const RELATIVE_SCORE: &str = "baseRelativeScore";

pub const HEAD_POSITION: &str = "baseHeadPosition";
pub const HEAD_ROTATION: &str = "baseHeadRotation";
pub const HEAD_LOCAL_POSITION: &str = "baseHeadLocalPosition";
pub const HEAD_LOCAL_ROTATION: &str = "baseHeadLocalRotation";
pub const LEFT_HAND_POSITION: &str = "baseLeftHandPosition";
pub const LEFT_HAND_ROTATION: &str = "baseLeftHandRotation";
pub const RIGHT_HAND_POSITION: &str = "baseRightHandPosition";
pub const RIGHT_HAND_ROTATION: &str = "baseRightHandRotation";

pub const NOTE_0_COLOR: &str = "baseNote0Color";
pub const NOTE_1_COLOR: &str = "baseNote1Color";
pub const OBSTACLES_COLOR: &str = "baseObstaclesColor";
pub const ENVIRONMENT_COLOR_0: &str = "baseEnvironmentColor0";
pub const ENVIRONMENT_COLOR_1: &str = "baseEnvironmentColor1";

pub const DEFAULTS: &[(&str, ValueKind)] = &[
    (SONG_TIME, ValueKind::Float),
    (SONG_LENGTH, ValueKind::Float),
    (COMBO, ValueKind::Float),
    (ENERGY, ValueKind::Float),
    (RELATIVE_SCORE, ValueKind::Float),
    (HEAD_POSITION, ValueKind::Vec3),
    (HEAD_ROTATION, ValueKind::Quat),
    (HEAD_LOCAL_POSITION, ValueKind::Vec3),
    (HEAD_LOCAL_ROTATION, ValueKind::Quat),
    (LEFT_HAND_POSITION, ValueKind::Vec3),
    (LEFT_HAND_ROTATION, ValueKind::Quat),
    (RIGHT_HAND_POSITION, ValueKind::Vec3),
    (RIGHT_HAND_ROTATION, ValueKind::Quat),
    (NOTE_0_COLOR, ValueKind::Vec4),
    (NOTE_1_COLOR, ValueKind::Vec4),
    (OBSTACLES_COLOR, ValueKind::Vec4),
    (ENVIRONMENT_COLOR_0, ValueKind::Vec4),
    (ENVIRONMENT_COLOR_1, ValueKind::Vec4),
];
