//! BaseProviderContext: string key -> base value table read by curves at sample time.
//!
//! A key holds one [`Value`], a kind-tagged float array of any length, or a
//! host-computed provider that is evaluated on every read.
//!
//! Missing keys are not errors. `get` yields `None`, `get_array` an empty
//! slice and `get_type` `None`, so a curve bound to a key the host has not
//! published yet simply produces no value for that frame.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use log::debug;
use serde::{Deserialize, Serialize};
use tracks_api_core::{Value, ValueKind};

use crate::keys;

/// A stored base entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BaseValue {
    Value(Value),
    /// Raw components; `kind` is what readers asking for a typed value get.
    Array { kind: ValueKind, values: Vec<f32> },
}

impl BaseValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            BaseValue::Value(v) => v.kind(),
            BaseValue::Array { kind, .. } => *kind,
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        match self {
            BaseValue::Value(v) => v.as_slice(),
            BaseValue::Array { values, .. } => values.as_slice(),
        }
    }

    /// Typed view. Arrays whose length does not match their kind have none.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            BaseValue::Value(v) => Some(*v),
            BaseValue::Array { kind, values } => Value::from_components(*kind, values),
        }
    }
}

impl From<Value> for BaseValue {
    fn from(value: Value) -> Self {
        BaseValue::Value(value)
    }
}

type ProviderFn = dyn Fn(&BaseProviderContext) -> Vec<f32> + Send + Sync;

#[derive(Clone)]
struct Provider {
    kind: ValueKind,
    func: Arc<ProviderFn>,
}

impl Provider {
    fn read(&self, ctx: &BaseProviderContext) -> Vec<f32> {
        (self.func)(ctx)
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Stored entries serialize; providers are host code and are skipped.
/// A key lives in at most one of the two tables.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct BaseProviderContext {
    values: HashMap<String, BaseValue>,
    #[serde(skip)]
    providers: HashMap<String, Provider>,
}

impl BaseProviderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: HashMap::with_capacity(capacity),
            providers: HashMap::new(),
        }
    }

    /// Context seeded with every well-known key from [`keys::DEFAULTS`]:
    /// zeroed floats and vectors, identity rotations.
    pub fn with_defaults() -> Self {
        let mut ctx = Self::with_capacity(keys::DEFAULTS.len());
        for (name, kind) in keys::DEFAULTS {
            let value = match kind {
                ValueKind::Float => Value::Float(0.0),
                ValueKind::Vec3 => Value::Vec3([0.0; 3]),
                ValueKind::Vec4 => Value::Vec4([0.0; 4]),
                ValueKind::Quat => Value::quat_identity(),
            };
            ctx.values.insert((*name).to_string(), BaseValue::Value(value));
        }
        ctx
    }

    /// Publish `value` under `name`, returning the previous stored entry if any.
    pub fn set(&mut self, name: &str, value: Value) -> Option<BaseValue> {
        self.insert(name, BaseValue::Value(value))
    }

    /// Publish a float array of any length under `name`.
    pub fn set_array(
        &mut self,
        name: &str,
        kind: ValueKind,
        values: impl Into<Vec<f32>>,
    ) -> Option<BaseValue> {
        self.insert(
            name,
            BaseValue::Array {
                kind,
                values: values.into(),
            },
        )
    }

    /// Bind `name` to a host callback evaluated on every read.
    ///
    /// The callback receives this context and may read other keys, but not
    /// `name` itself.
    pub fn set_provider<F>(&mut self, name: &str, kind: ValueKind, func: F)
    where
        F: Fn(&BaseProviderContext) -> Vec<f32> + Send + Sync + 'static,
    {
        if self.values.remove(name).is_some() {
            debug!("base value '{name}' is now host-computed");
        }
        self.providers.insert(
            name.to_string(),
            Provider {
                kind,
                func: Arc::new(func),
            },
        );
    }

    fn insert(&mut self, name: &str, entry: BaseValue) -> Option<BaseValue> {
        if self.providers.remove(name).is_some() {
            debug!("base value '{name}' replaces its provider");
        }
        if let Some(slot) = self.values.get_mut(name) {
            if slot.kind() != entry.kind() {
                debug!(
                    "base value '{name}' changed kind {:?} -> {:?}",
                    slot.kind(),
                    entry.kind()
                );
            }
            return Some(std::mem::replace(slot, entry));
        }
        self.values.insert(name.to_string(), entry);
        None
    }

    /// Typed value under `name`. Arrays that do not fit their kind read as `None`.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(provider) = self.providers.get(name) {
            return Value::from_components(provider.kind, &provider.read(self));
        }
        self.values.get(name).and_then(BaseValue::to_value)
    }

    /// Raw components under `name`; empty when missing.
    pub fn get_array(&self, name: &str) -> Cow<'_, [f32]> {
        if let Some(provider) = self.providers.get(name) {
            return Cow::Owned(provider.read(self));
        }
        match self.values.get(name) {
            Some(entry) => Cow::Borrowed(entry.as_slice()),
            None => Cow::Borrowed(&[]),
        }
    }

    pub fn get_type(&self, name: &str) -> Option<ValueKind> {
        match self.providers.get(name) {
            Some(provider) => Some(provider.kind),
            None => self.values.get(name).map(BaseValue::kind),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name) || self.values.contains_key(name)
    }

    pub fn is_provided(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Forget `name`, whether stored or host-computed.
    pub fn remove(&mut self, name: &str) -> bool {
        let provider = self.providers.remove(name).is_some();
        let stored = self.values.remove(name).is_some();
        provider || stored
    }

    pub fn len(&self) -> usize {
        self.values.len() + self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.providers.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.providers.clear();
    }

    /// Stored entries. Providers are not listed; read them by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BaseValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_returns_previous() {
        let mut ctx = BaseProviderContext::new();
        assert_eq!(ctx.set("a", Value::Float(1.0)), None);
        assert_eq!(
            ctx.set("a", Value::Float(2.0)),
            Some(BaseValue::Value(Value::Float(1.0)))
        );
        assert_eq!(ctx.get("a"), Some(Value::Float(2.0)));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn defaults_are_typed() {
        let ctx = BaseProviderContext::with_defaults();
        assert_eq!(ctx.len(), keys::DEFAULTS.len());
        assert_eq!(ctx.get_type(keys::HEAD_ROTATION), Some(ValueKind::Quat));
        assert_eq!(*ctx.get_array(keys::HEAD_ROTATION), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(ctx.get_type(keys::NOTE_0_COLOR), Some(ValueKind::Vec4));
    }

    #[test]
    fn arrays_keep_every_component() {
        let mut ctx = BaseProviderContext::new();
        ctx.set_array("spectrum", ValueKind::Float, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        assert_eq!(ctx.get_array("spectrum").len(), 6);
        assert_eq!(ctx.get_type("spectrum"), Some(ValueKind::Float));
        // Six floats are not one float.
        assert_eq!(ctx.get("spectrum"), None);

        ctx.set_array("tint", ValueKind::Vec3, [1.0, 0.5, 0.0]);
        assert_eq!(ctx.get("tint"), Some(Value::vec3(1.0, 0.5, 0.0)));
    }

    #[test]
    fn stored_values_and_providers_shadow_each_other() {
        let mut ctx = BaseProviderContext::new();
        ctx.set("k", Value::Float(1.0));
        ctx.set_provider("k", ValueKind::Float, |_| vec![2.0]);
        assert!(ctx.is_provided("k"));
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.get("k"), Some(Value::Float(2.0)));

        assert_eq!(ctx.set("k", Value::Float(3.0)), None);
        assert!(!ctx.is_provided("k"));
        assert_eq!(ctx.get("k"), Some(Value::Float(3.0)));
    }
}
