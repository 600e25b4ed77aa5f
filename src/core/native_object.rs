use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::trace;

use crate::core::value::NativeValue;
use crate::error::{BridgeError, BridgeResult};

/// Attributes of one named field on a host object.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub value: NativeValue,
    pub configurable: bool,
    pub enumerable: bool,
    pub writable: bool,
}

impl PropertyDescriptor {
    /// Data descriptor with every attribute enabled.
    #[must_use]
    pub fn new(value: impl Into<NativeValue>) -> Self {
        Self {
            value: value.into(),
            configurable: true,
            enumerable: true,
            writable: true,
        }
    }

    #[must_use]
    pub fn with_configurable(mut self, configurable: bool) -> Self {
        self.configurable = configurable;
        self
    }

    #[must_use]
    pub fn with_enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = enumerable;
        self
    }

    #[must_use]
    pub fn with_writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }
}

/// Free-form record owned by the host runtime.
///
/// Fields keep insertion order. Like [`crate::core::NativeArray`], the
/// handle is shared: clones see the same fields and compare equal only to
/// each other.
#[derive(Clone, Default)]
pub struct NativeObject {
    inner: Rc<RefCell<IndexMap<String, PropertyDescriptor>>>,
}

impl PartialEq for NativeObject {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

// Objects may reference themselves, so only keys are printed.
impl fmt::Debug for NativeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(fields) => f
                .debug_struct("NativeObject")
                .field("keys", &fields.keys().collect::<Vec<_>>())
                .finish(),
            Err(_) => f.write_str("NativeObject(<borrowed>)"),
        }
    }
}

impl NativeObject {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn same_object(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    #[must_use]
    pub fn has_own_property(&self, name: &str) -> bool {
        self.inner.borrow().contains_key(name)
    }

    #[must_use]
    pub fn get_own_property_descriptor(&self, name: &str) -> Option<PropertyDescriptor> {
        self.inner.borrow().get(name).cloned()
    }

    /// Defines or redefines `name`.
    ///
    /// A field that is not configurable may only have its value replaced,
    /// and only while it stays writable with unchanged attributes.
    pub fn define_property(&self, name: &str, descriptor: PropertyDescriptor) -> BridgeResult<()> {
        let mut fields = self.inner.borrow_mut();
        if let Some(current) = fields.get_mut(name) {
            if !current.configurable {
                let value_only = current.writable
                    && !descriptor.configurable
                    && descriptor.enumerable == current.enumerable;
                if !value_only {
                    return Err(BridgeError::NonConfigurable {
                        name: name.to_owned(),
                    });
                }
            }
            trace!(field = name, "redefine native field");
            *current = descriptor;
            return Ok(());
        }
        trace!(field = name, "define native field");
        fields.insert(name.to_owned(), descriptor);
        Ok(())
    }

    /// Deletes an own field. Returns `false` only when the field exists and
    /// is not configurable.
    pub fn delete_property(&self, name: &str) -> bool {
        let mut fields = self.inner.borrow_mut();
        match fields.get(name) {
            Some(descriptor) if !descriptor.configurable => false,
            Some(_) => {
                fields.shift_remove(name);
                true
            }
            None => true,
        }
    }

    /// Enumerable own field names in definition order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner
            .borrow()
            .iter()
            .filter(|(_, descriptor)| descriptor.enumerable)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Value of an own field, regardless of its attributes.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<NativeValue> {
        self.inner
            .borrow()
            .get(name)
            .map(|descriptor| descriptor.value.clone())
    }

    /// Runs `read` against the field table without copying it.
    pub fn with_fields<T>(&self, read: impl FnOnce(&IndexMap<String, PropertyDescriptor>) -> T) -> T {
        read(&self.inner.borrow())
    }
}

#[must_use]
pub fn has_own_field(object: &NativeObject, name: &str) -> bool {
    object.has_own_property(name)
}

/// Descriptor of `name`, or `None` when the field is absent.
///
/// Existence is checked first so a missing field never yields a
/// materialized descriptor.
#[must_use]
pub fn get_field_descriptor(object: &NativeObject, name: &str) -> Option<PropertyDescriptor> {
    if !has_own_field(object, name) {
        return None;
    }
    object.get_own_property_descriptor(name)
}

/// Creates or overwrites `name` with a configurable, enumerable, writable field.
pub fn define_field<T>(object: &NativeObject, name: &str, value: T) -> BridgeResult<()>
where
    T: Into<NativeValue>,
{
    define_field_with(object, name, PropertyDescriptor::new(value))
}

pub fn define_field_with(
    object: &NativeObject,
    name: &str,
    descriptor: PropertyDescriptor,
) -> BridgeResult<()> {
    object.define_property(name, descriptor)
}

pub fn remove_field(object: &NativeObject, name: &str) -> bool {
    object.delete_property(name)
}

/// Snapshot of every enumerable field and its value.
#[must_use]
pub fn object_as_map(object: &NativeObject) -> IndexMap<String, NativeValue> {
    object.with_fields(|fields| {
        fields
            .iter()
            .filter(|(_, descriptor)| descriptor.enumerable)
            .map(|(name, descriptor)| (name.clone(), descriptor.value.clone()))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_has_no_descriptor() {
        let object = NativeObject::new();
        assert!(!has_own_field(&object, "label"));
        assert_eq!(get_field_descriptor(&object, "label"), None);
    }

    #[test]
    fn define_field_uses_permissive_attributes() {
        let object = NativeObject::new();
        define_field(&object, "label", "sales").expect("define");
        let descriptor = get_field_descriptor(&object, "label").expect("descriptor");
        assert_eq!(descriptor.value, NativeValue::from("sales"));
        assert!(descriptor.configurable && descriptor.enumerable && descriptor.writable);
    }

    #[test]
    fn non_configurable_field_rejects_attribute_changes() {
        let object = NativeObject::new();
        let locked = PropertyDescriptor::new(1.0).with_configurable(false);
        define_field_with(&object, "order", locked.clone()).expect("define");

        let err = define_field(&object, "order", 2.0).expect_err("must be rejected");
        assert_eq!(
            err,
            BridgeError::NonConfigurable {
                name: "order".to_owned()
            }
        );

        let mut update = locked;
        update.value = NativeValue::Number(3.0);
        define_field_with(&object, "order", update).expect("value-only update");
        assert_eq!(object.get("order"), Some(NativeValue::Number(3.0)));
        assert!(!remove_field(&object, "order"));
    }

    #[test]
    fn hidden_fields_are_not_listed() {
        let object = NativeObject::new();
        define_field(&object, "a", 1).expect("a");
        define_field_with(
            &object,
            "_hidden",
            PropertyDescriptor::new(true).with_enumerable(false),
        )
        .expect("hidden");
        define_field(&object, "b", 2).expect("b");

        assert_eq!(object.keys(), vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(object_as_map(&object).len(), 2);
        assert!(has_own_field(&object, "_hidden"));
    }

    #[test]
    fn removal_preserves_definition_order() {
        let object = NativeObject::new();
        for name in ["x", "y", "z"] {
            define_field(&object, name, name).expect("define");
        }
        assert!(remove_field(&object, "y"));
        assert!(remove_field(&object, "missing"));
        assert_eq!(object.keys(), vec!["x".to_owned(), "z".to_owned()]);
    }
}
