//! Track: a named bag of value/path properties plus attached game objects.
//!
//! Well-known properties live in fixed slots so enum lookups never allocate;
//! string ids resolve to the same slots, falling back to the custom tables
//! for anything that is not well-known. The legacy alias table is applied
//! once, in `resolve_value`/`resolve_path`.

use std::fmt;

use hashbrown::HashMap;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracks_api_core::{TimeUnit, ValueKind};
use tracks_base_provider_core::BaseProviderContext;

use crate::error::{Result, TracksError};
use crate::ids::{CallbackToken, GameObject, IdAllocator};
use crate::names::{PropertyId, PropertyNames, PATH_SLOTS, VALUE_SLOTS};
use crate::property::{PathProperty, ValueProperty};

/// Listener invoked with `(object, added)` whenever the attachment set changes.
pub type GameObjectCallback = Box<dyn Fn(GameObject, bool) + Send + Sync>;

fn slot_kind(name: PropertyNames) -> ValueKind {
    name.kind().unwrap_or(ValueKind::Float)
}

/// Where a property id lands on a track.
enum SlotRef<'a> {
    Fixed(usize),
    Custom(&'a str),
}

/// Well-known value properties, indexed like [`VALUE_SLOTS`].
#[derive(Clone, Debug, PartialEq)]
pub struct PropertiesMap {
    slots: [ValueProperty; VALUE_SLOTS.len()],
}

impl Default for PropertiesMap {
    fn default() -> Self {
        Self {
            slots: VALUE_SLOTS.map(|name| ValueProperty::new(slot_kind(name))),
        }
    }
}

impl PropertiesMap {
    pub fn get(&self, name: PropertyNames) -> Option<&ValueProperty> {
        self.slots.get(name.value_slot()?)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertyNames, &ValueProperty)> {
        VALUE_SLOTS.iter().copied().zip(self.slots.iter())
    }
}

/// Well-known path properties, indexed like [`PATH_SLOTS`].
#[derive(Clone, Debug, PartialEq)]
pub struct PathPropertiesMap {
    slots: [PathProperty; PATH_SLOTS.len()],
}

impl Default for PathPropertiesMap {
    fn default() -> Self {
        Self {
            slots: PATH_SLOTS.map(|name| PathProperty::new(slot_kind(name))),
        }
    }
}

impl PathPropertiesMap {
    pub fn get(&self, name: PropertyNames) -> Option<&PathProperty> {
        self.slots.get(name.path_slot()?)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertyNames, &PathProperty)> {
        PATH_SLOTS.iter().copied().zip(self.slots.iter())
    }
}

/// Latest committed value of every well-known value property.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertiesValues {
    pub position: Option<[f32; 3]>,
    pub rotation: Option<[f32; 4]>,
    pub scale: Option<[f32; 3]>,
    pub local_rotation: Option<[f32; 4]>,
    pub local_position: Option<[f32; 3]>,
    pub dissolve: Option<f32>,
    pub dissolve_arrow: Option<f32>,
    pub time: Option<f32>,
    pub cuttable: Option<f32>,
    pub color: Option<[f32; 4]>,
    pub attenuation: Option<f32>,
    pub fog_offset: Option<f32>,
    pub height_fog_start_y: Option<f32>,
    pub height_fog_height: Option<f32>,
}

/// Every well-known path property sampled at one time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathPropertiesValues {
    pub position: Option<[f32; 3]>,
    pub rotation: Option<[f32; 4]>,
    pub scale: Option<[f32; 3]>,
    pub local_rotation: Option<[f32; 4]>,
    pub local_position: Option<[f32; 3]>,
    pub definite_position: Option<f32>,
    pub dissolve: Option<f32>,
    pub dissolve_arrow: Option<f32>,
    pub cuttable: Option<f32>,
    pub color: Option<[f32; 4]>,
}

pub struct Track {
    name: String,
    legacy_aliases: bool,
    properties: PropertiesMap,
    path_properties: PathPropertiesMap,
    custom_properties: HashMap<String, ValueProperty>,
    custom_path_properties: HashMap<String, PathProperty>,
    game_objects: IndexSet<GameObject>,
    callbacks: Vec<(CallbackToken, GameObjectCallback)>,
    ids: IdAllocator,
}

impl Default for Track {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Track")
            .field("name", &self.name)
            .field("legacy_aliases", &self.legacy_aliases)
            .field("custom_properties", &self.custom_properties.len())
            .field("custom_path_properties", &self.custom_path_properties.len())
            .field("game_objects", &self.game_objects)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl Track {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            legacy_aliases: false,
            properties: PropertiesMap::default(),
            path_properties: PathPropertiesMap::default(),
            custom_properties: HashMap::new(),
            custom_path_properties: HashMap::new(),
            game_objects: IndexSet::new(),
            callbacks: Vec::new(),
            ids: IdAllocator::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn legacy_aliases(&self) -> bool {
        self.legacy_aliases
    }

    /// Normally set by the holder from its configuration.
    pub fn set_legacy_aliases(&mut self, legacy: bool) {
        self.legacy_aliases = legacy;
    }

    /// Restore default slots and drop custom properties. Name, alias mode,
    /// attached objects and listeners are kept.
    pub fn reset(&mut self) {
        self.properties = PropertiesMap::default();
        self.path_properties = PathPropertiesMap::default();
        self.custom_properties.clear();
        self.custom_path_properties.clear();
    }

    fn resolve_value<'a>(&self, id: &'a PropertyId) -> SlotRef<'a> {
        let Some(name) = id.well_known() else {
            return match id {
                PropertyId::Custom(id) => SlotRef::Custom(id),
                PropertyId::Name(name) => SlotRef::Custom(name.id()),
            };
        };
        let name = name.alias(self.legacy_aliases);
        match name.value_slot() {
            Some(i) => SlotRef::Fixed(i),
            None => SlotRef::Custom(name.id()),
        }
    }

    fn resolve_path<'a>(&self, id: &'a PropertyId) -> SlotRef<'a> {
        let Some(name) = id.well_known() else {
            return match id {
                PropertyId::Custom(id) => SlotRef::Custom(id),
                PropertyId::Name(name) => SlotRef::Custom(name.id()),
            };
        };
        let name = name.alias(self.legacy_aliases);
        match name.path_slot() {
            Some(i) => SlotRef::Fixed(i),
            None => SlotRef::Custom(name.id()),
        }
    }

    // ---- value properties ----

    /// Install or replace a value property by string id.
    pub fn register_property(&mut self, id: &str, property: ValueProperty) -> Result<()> {
        let id = PropertyId::parse(id);
        match self.resolve_value(&id) {
            SlotRef::Fixed(i) => {
                let slot = &mut self.properties.slots[i];
                if slot.kind() != property.kind() {
                    return Err(TracksError::TypeMismatch {
                        expected: slot.kind(),
                        actual: property.kind(),
                    });
                }
                *slot = property;
            }
            SlotRef::Custom(key) => {
                self.custom_properties.insert(key.to_string(), property);
            }
        }
        Ok(())
    }

    pub fn property(&self, id: &PropertyId) -> Option<&ValueProperty> {
        match self.resolve_value(id) {
            SlotRef::Fixed(i) => self.properties.slots.get(i),
            SlotRef::Custom(key) => self.custom_properties.get(key),
        }
    }

    pub fn property_mut(&mut self, id: &PropertyId) -> Option<&mut ValueProperty> {
        match self.resolve_value(id) {
            SlotRef::Fixed(i) => self.properties.slots.get_mut(i),
            SlotRef::Custom(key) => self.custom_properties.get_mut(key),
        }
    }

    pub fn get_property(&self, id: &str) -> Option<&ValueProperty> {
        self.property(&PropertyId::parse(id))
    }

    pub fn get_property_mut(&mut self, id: &str) -> Option<&mut ValueProperty> {
        self.property_mut(&PropertyId::parse(id))
    }

    pub fn get_property_by_name(&self, name: PropertyNames) -> Option<&ValueProperty> {
        self.property(&PropertyId::Name(name))
    }

    pub fn get_property_by_name_mut(&mut self, name: PropertyNames) -> Option<&mut ValueProperty> {
        self.property_mut(&PropertyId::Name(name))
    }

    pub fn properties_map(&self) -> &PropertiesMap {
        &self.properties
    }

    // ---- path properties ----

    /// Install or replace a path property by string id.
    pub fn register_path_property(&mut self, id: &str, property: PathProperty) -> Result<()> {
        let id = PropertyId::parse(id);
        match self.resolve_path(&id) {
            SlotRef::Fixed(i) => {
                let slot = &mut self.path_properties.slots[i];
                if slot.kind() != property.kind() {
                    return Err(TracksError::TypeMismatch {
                        expected: slot.kind(),
                        actual: property.kind(),
                    });
                }
                *slot = property;
            }
            SlotRef::Custom(key) => {
                self.custom_path_properties.insert(key.to_string(), property);
            }
        }
        Ok(())
    }

    pub fn path_property(&self, id: &PropertyId) -> Option<&PathProperty> {
        match self.resolve_path(id) {
            SlotRef::Fixed(i) => self.path_properties.slots.get(i),
            SlotRef::Custom(key) => self.custom_path_properties.get(key),
        }
    }

    pub fn path_property_mut(&mut self, id: &PropertyId) -> Option<&mut PathProperty> {
        match self.resolve_path(id) {
            SlotRef::Fixed(i) => self.path_properties.slots.get_mut(i),
            SlotRef::Custom(key) => self.custom_path_properties.get_mut(key),
        }
    }

    pub fn get_path_property(&self, id: &str) -> Option<&PathProperty> {
        self.path_property(&PropertyId::parse(id))
    }

    pub fn get_path_property_mut(&mut self, id: &str) -> Option<&mut PathProperty> {
        self.path_property_mut(&PropertyId::parse(id))
    }

    pub fn get_path_property_by_name(&self, name: PropertyNames) -> Option<&PathProperty> {
        self.path_property(&PropertyId::Name(name))
    }

    pub fn get_path_property_by_name_mut(
        &mut self,
        name: PropertyNames,
    ) -> Option<&mut PathProperty> {
        self.path_property_mut(&PropertyId::Name(name))
    }

    pub fn path_properties_map(&self) -> &PathPropertiesMap {
        &self.path_properties
    }

    // ---- snapshots ----

    pub fn properties_values(&self) -> PropertiesValues {
        let v = |name| self.get_property_by_name(name);
        let t = TimeUnit::NEVER;
        use PropertyNames::*;
        PropertiesValues {
            position: v(Position).and_then(|p| p.get_vec3(t)),
            rotation: v(Rotation).and_then(|p| p.get_quat(t)),
            scale: v(Scale).and_then(|p| p.get_vec3(t)),
            local_rotation: v(LocalRotation).and_then(|p| p.get_quat(t)),
            local_position: v(LocalPosition).and_then(|p| p.get_vec3(t)),
            dissolve: v(Dissolve).and_then(|p| p.get_float(t)),
            dissolve_arrow: v(DissolveArrow).and_then(|p| p.get_float(t)),
            time: v(Time).and_then(|p| p.get_float(t)),
            cuttable: v(Cuttable).and_then(|p| p.get_float(t)),
            color: v(Color).and_then(|p| p.get_vec4(t)),
            attenuation: v(Attenuation).and_then(|p| p.get_float(t)),
            fog_offset: v(FogOffset).and_then(|p| p.get_float(t)),
            height_fog_start_y: v(HeightFogStartY).and_then(|p| p.get_float(t)),
            height_fog_height: v(HeightFogHeight).and_then(|p| p.get_float(t)),
        }
    }

    pub fn path_properties_values(
        &self,
        time: f32,
        ctx: Option<&BaseProviderContext>,
    ) -> PathPropertiesValues {
        let v = |name| {
            self.get_path_property_by_name(name)
                .and_then(|p| p.interpolate(time, ctx))
        };
        use PropertyNames::*;
        PathPropertiesValues {
            position: v(Position).and_then(|x| x.as_vec3()),
            rotation: v(Rotation).and_then(|x| x.as_quat()),
            scale: v(Scale).and_then(|x| x.as_vec3()),
            local_rotation: v(LocalRotation).and_then(|x| x.as_quat()),
            local_position: v(LocalPosition).and_then(|x| x.as_vec3()),
            definite_position: v(DefinitePosition).and_then(|x| x.as_float()),
            dissolve: v(Dissolve).and_then(|x| x.as_float()),
            dissolve_arrow: v(DissolveArrow).and_then(|x| x.as_float()),
            cuttable: v(Cuttable).and_then(|x| x.as_float()),
            color: v(Color).and_then(|x| x.as_vec4()),
        }
    }

    // ---- game objects ----

    /// Attach `object`. Listeners fire only when it was not attached yet.
    pub fn register_game_object(&mut self, object: GameObject) -> bool {
        let added = self.game_objects.insert(object);
        if added {
            self.notify(object, true);
        }
        added
    }

    /// Detach `object`. Listeners fire only when it was attached.
    pub fn unregister_game_object(&mut self, object: GameObject) -> bool {
        let removed = self.game_objects.shift_remove(&object);
        if removed {
            self.notify(object, false);
        }
        removed
    }

    pub fn game_objects(&self) -> impl Iterator<Item = GameObject> + '_ {
        self.game_objects.iter().copied()
    }

    pub fn game_object_count(&self) -> usize {
        self.game_objects.len()
    }

    pub fn register_game_object_callback<F>(&mut self, callback: F) -> CallbackToken
    where
        F: Fn(GameObject, bool) + Send + Sync + 'static,
    {
        let token = self.ids.alloc_callback();
        self.callbacks.push((token, Box::new(callback)));
        token
    }

    /// Returns false when the token is unknown or already removed.
    pub fn remove_game_object_callback(&mut self, token: CallbackToken) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(t, _)| *t != token);
        self.callbacks.len() != before
    }

    fn notify(&self, object: GameObject, added: bool) {
        for (_, callback) in &self.callbacks {
            callback(object, added);
        }
    }
}
