use std::sync::{Arc, Mutex};

use tracks_animation_core::property::{PathProperty, ValueProperty};
use tracks_animation_core::{
    BasePointDefinition, Config, GameObject, JsonValue, PropertyId, PropertyNames, TimeUnit,
    Track, TrackKey, TracksError, TracksHolder, Value, ValueKind,
};

#[test]
fn handles_round_trip_through_ffi() {
    let mut holder = TracksHolder::default();
    let key = holder.add_track(Track::new("a"));
    let raw = key.to_ffi();
    assert_eq!(TrackKey::from_ffi(raw), key);
    assert_eq!(TrackKey::INVALID.to_ffi(), u64::MAX);
    assert!(TrackKey::from_ffi(u64::MAX).is_invalid());
    assert_eq!(holder.track(TrackKey::from_ffi(raw)).name(), "a");
}

#[test]
fn removed_handles_stay_dead() {
    let mut holder = TracksHolder::default();
    let a = holder.add_track(Track::new("a"));
    let removed = holder.remove_track(a).expect("removed");
    assert_eq!(removed.name(), "a");
    assert!(holder.remove_track(a).is_none());

    let b = holder.add_track(Track::new("b"));
    assert!(!holder.contains(a));
    assert!(holder.contains(b));
    assert!(holder.get_mut(a).is_none());
    assert!(!holder.is_empty());
    assert_eq!(holder.count(), 1);
}

#[test]
fn name_lookup_prefers_the_latest_track() {
    let mut holder = TracksHolder::default();
    let first = holder.add_track(Track::new("lights"));
    let second = holder.add_track(Track::new("lights"));
    holder.add_track(Track::new("other"));

    assert_eq!(holder.get_track_key("lights"), Some(second));
    holder.remove_track(second);
    assert_eq!(holder.get_track_key("lights"), Some(first));
    assert!(holder.get_track_by_name("missing").is_none());

    let names: Vec<_> = holder.iter().map(|(_, t)| t.name().to_string()).collect();
    assert_eq!(names, vec!["lights", "other"]);
}

#[test]
fn legacy_mode_aliases_offset_position() {
    let config = Config {
        legacy_property_aliases: true,
        ..Config::default()
    };
    let mut holder = TracksHolder::new(&config);
    let key = holder.add_track(Track::new("t"));
    let track = holder.track_mut(key);
    assert!(track.legacy_aliases());

    let stamp = TimeUnit::new(0, 5);
    track
        .get_property_mut("offsetPosition")
        .expect("aliased slot")
        .set(Some(Value::vec3(1.0, 2.0, 3.0)), stamp)
        .expect("set");
    assert_eq!(
        track.get_property("_position").and_then(|p| p.value()),
        Some(Value::vec3(1.0, 2.0, 3.0))
    );

    let plain = Track::new("plain");
    assert!(plain.get_property("offsetPosition").is_none());
}

#[test]
fn well_known_slots_have_fixed_kinds() {
    let track = Track::new("t");
    let kind = |id: &str| track.get_property(id).map(ValueProperty::kind);
    assert_eq!(kind("position"), Some(ValueKind::Vec3));
    assert_eq!(kind("rotation"), Some(ValueKind::Quat));
    assert_eq!(kind("color"), Some(ValueKind::Vec4));
    assert_eq!(kind("_interactable"), Some(ValueKind::Float));
    assert_eq!(kind("definitePosition"), None);

    let path_kind = |id: &str| track.get_path_property(id).map(PathProperty::kind);
    assert_eq!(path_kind("definitePosition"), Some(ValueKind::Float));
    assert_eq!(path_kind("height"), None);
}

#[test]
fn custom_properties_are_registered_by_id() {
    let mut track = Track::new("fog");
    track
        .register_property("glow", ValueProperty::new(ValueKind::Float))
        .expect("register");
    track
        .register_path_property("sway", PathProperty::new(ValueKind::Vec3))
        .expect("register");

    assert!(track.property(&PropertyId::from("glow")).is_some());
    assert!(track.path_property(&PropertyId::Custom("sway".into())).is_some());

    let err = track
        .register_property("scale", ValueProperty::new(ValueKind::Float))
        .unwrap_err();
    assert_eq!(
        err,
        TracksError::TypeMismatch {
            expected: ValueKind::Vec3,
            actual: ValueKind::Float
        }
    );
}

#[test]
fn hand_built_custom_ids_reach_well_known_slots() {
    let mut track = Track::new("t");
    track
        .property_mut(&PropertyId::Custom("_dissolve".into()))
        .expect("slot")
        .set(Some(Value::Float(0.75)), TimeUnit::new(0, 1))
        .expect("set");
    assert_eq!(track.properties_values().dissolve, Some(0.75));
    assert!(track
        .path_property(&PropertyId::Custom("definitePosition".into()))
        .is_some());
    assert!(track.property(&PropertyId::Custom("glow".into())).is_none());
}

#[test]
fn value_properties_track_updates() {
    let mut property = ValueProperty::new(ValueKind::Float);
    assert_eq!(property.get_float(TimeUnit::NEVER), None);

    property
        .set(Some(Value::Float(0.5)), TimeUnit::new(1, 0))
        .expect("set");
    assert_eq!(property.get_float(TimeUnit::NEVER), Some(0.5));
    assert_eq!(property.get_float(TimeUnit::new(1, 0)), Some(0.5));
    assert_eq!(property.get_float(TimeUnit::new(2, 0)), None);
    assert_eq!(property.get_vec3(TimeUnit::NEVER), None);

    let err = property.set(Some(Value::vec3(0.0, 0.0, 0.0)), TimeUnit::new(3, 0));
    assert!(matches!(err, Err(TracksError::TypeMismatch { .. })));
    assert_eq!(property.last_updated(), TimeUnit::new(1, 0));
}

#[test]
fn snapshots_and_reset() {
    let mut track = Track::new("t");
    track
        .get_property_by_name_mut(PropertyNames::Dissolve)
        .expect("slot")
        .set(Some(Value::Float(0.25)), TimeUnit::new(0, 1))
        .expect("set");
    let curve = BasePointDefinition::from_json(
        &JsonValue::parse_str("[[0, 0], [1, 1]]").expect("json"),
        ValueKind::Float,
    )
    .expect("curve");
    track
        .get_path_property_by_name_mut(PropertyNames::DefinitePosition)
        .expect("slot")
        .init(Some(curve))
        .expect("init");
    track.register_game_object(GameObject(9));

    let values = track.properties_values();
    assert_eq!(values.dissolve, Some(0.25));
    assert_eq!(values.position, None);
    let paths = track.path_properties_values(0.5, None);
    assert_eq!(paths.definite_position, Some(0.5));

    track.reset();
    assert_eq!(track.properties_values().dissolve, None);
    assert_eq!(track.path_properties_values(0.5, None).definite_position, None);
    assert_eq!(track.game_object_count(), 1);
    assert_eq!(track.name(), "t");
}

#[test]
fn game_object_callbacks_fire_on_changes_only() {
    let mut track = Track::new("t");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let token = track.register_game_object_callback(move |object, added| {
        sink.lock().expect("lock").push((object, added));
    });

    assert!(track.register_game_object(GameObject(1)));
    assert!(!track.register_game_object(GameObject(1)));
    assert!(track.register_game_object(GameObject(2)));
    assert!(track.unregister_game_object(GameObject(1)));
    assert!(!track.unregister_game_object(GameObject(1)));
    assert_eq!(track.game_objects().collect::<Vec<_>>(), vec![GameObject(2)]);

    assert!(track.remove_game_object_callback(token));
    assert!(!track.remove_game_object_callback(token));
    track.register_game_object(GameObject(3));

    assert_eq!(
        *seen.lock().expect("lock"),
        vec![
            (GameObject(1), true),
            (GameObject(2), true),
            (GameObject(1), false),
        ]
    );
}

#[test]
fn callback_tokens_are_never_reused() {
    let mut track = Track::new("t");
    let a = track.register_game_object_callback(|_, _| {});
    assert!(track.remove_game_object_callback(a));
    let b = track.register_game_object_callback(|_, _| {});
    assert_ne!(a, b);
    assert!(!track.remove_game_object_callback(a));
}
