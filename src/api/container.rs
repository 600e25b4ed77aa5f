use crate::core::{
    FromNative, NativeArray, NativeObject, NativeValue, RawElement, define_field, has_own_field,
    json, remove_field,
};
use crate::error::{BridgeError, BridgeResult};

use super::BridgeConfig;

/// Name of a field on a host object.
pub trait Key {
    fn name(&self) -> &str;
}

impl Key for str {
    fn name(&self) -> &str {
        self
    }
}

impl Key for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

/// Closed set of keys, persisted on the host side by name.
pub trait EnumKey: Key + Clone + PartialEq + 'static {
    fn values() -> &'static [Self];

    /// Case-insensitive lookup by persisted name.
    fn from_name(name: &str) -> Option<Self> {
        Self::values()
            .iter()
            .find(|value| value.name().eq_ignore_ascii_case(name))
            .cloned()
    }
}

/// Typed facade over a host number array, used as an element of an array
/// of arrays.
pub trait NativeArrayContainer {
    fn native_array(&self) -> &NativeArray<f64>;

    /// Current contents, copied out of the host array.
    fn values(&self) -> Vec<f64> {
        self.native_array().to_vec()
    }
}

/// Typed facade over a host object.
///
/// Implementors only provide the backing object; every accessor goes
/// through the property-descriptor bridge. Setters taking `Option` remove
/// the field on `None`, so an unset option and a missing field read the
/// same way. Clearing a field that is not configurable fails with
/// [`BridgeError::NonConfigurable`] and leaves it in place.
pub trait NativeObjectContainer {
    fn native_object(&self) -> &NativeObject;

    fn has<K: Key + ?Sized>(&self, key: &K) -> bool {
        has_own_field(self.native_object(), key.name())
    }

    fn has_all<K: Key>(&self, keys: &[K]) -> bool {
        keys.iter().all(|key| self.has(key))
    }

    /// Enumerable field names in definition order.
    fn keys(&self) -> Vec<String> {
        self.native_object().keys()
    }

    /// Removes `key` if present; returns `false` only for a locked field.
    fn remove<K: Key + ?Sized>(&self, key: &K) -> bool {
        if !self.has(key) {
            return true;
        }
        remove_field(self.native_object(), key.name())
    }

    fn remove_all<K: Key>(&self, keys: &[K]) {
        for key in keys {
            self.remove(key);
        }
    }

    fn value<T: FromNative, K: Key + ?Sized>(&self, key: &K) -> Option<T> {
        if !self.has(key) {
            return None;
        }
        self.native_object()
            .get(key.name())
            .and_then(|value| T::from_native(&value))
    }

    /// Typed read falling back to `default` when the field is missing or
    /// holds another type.
    fn value_or<T: FromNative, K: Key + ?Sized>(&self, key: &K, default: T) -> T {
        self.value(key).unwrap_or(default)
    }

    fn set_value<T: Into<NativeValue>, K: Key + ?Sized>(
        &self,
        key: &K,
        value: Option<T>,
    ) -> BridgeResult<()> {
        match value {
            Some(value) => define_field(self.native_object(), key.name(), value),
            None if self.remove(key) => Ok(()),
            None => Err(BridgeError::NonConfigurable {
                name: key.name().to_owned(),
            }),
        }
    }

    fn key_value<E: EnumKey, K: Key + ?Sized>(&self, key: &K, default: E) -> E {
        self.value::<String, K>(key)
            .and_then(|name| E::from_name(&name))
            .unwrap_or(default)
    }

    fn set_key_value<E: EnumKey, K: Key + ?Sized>(
        &self,
        key: &K,
        value: Option<E>,
    ) -> BridgeResult<()> {
        self.set_value(key, value.map(|value| value.name().to_owned()))
    }

    fn object<K: Key + ?Sized>(&self, key: &K) -> Option<NativeObject> {
        self.value(key)
    }

    fn set_object<K: Key + ?Sized>(&self, key: &K, value: Option<NativeObject>) -> BridgeResult<()> {
        self.set_value(key, value)
    }

    /// Array field, if present and of element kind `R`.
    fn array<R: RawElement, K: Key + ?Sized>(&self, key: &K) -> Option<NativeArray<R>> {
        match self.value::<NativeValue, K>(key)? {
            NativeValue::Array(array) => R::from_any_array(&array),
            _ => None,
        }
    }

    fn set_array<R: RawElement, K: Key + ?Sized>(
        &self,
        key: &K,
        value: Option<NativeArray<R>>,
    ) -> BridgeResult<()> {
        self.set_value(key, value.map(|array| NativeValue::Array(R::into_any_array(array))))
    }

    /// Renders the backing object with the default configuration.
    fn to_json(&self) -> BridgeResult<String> {
        self.to_json_with(BridgeConfig::default())
    }

    fn to_json_with(&self, config: BridgeConfig) -> BridgeResult<String> {
        json::stringify_object(self.native_object(), config.json_options())
    }
}
