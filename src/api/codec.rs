use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::core::{NativeArray, NativeObject, NativeValue, RawElement};

use super::container::{EnumKey, NativeArrayContainer, NativeObjectContainer};

/// Mapping between the raw form stored in a native array and the element
/// type exposed by an `ArrayList`.
pub trait ElementCodec {
    type Raw: RawElement;
    type Element: Clone + PartialEq;

    /// `true` when elements are distinct wrapper objects the list keeps in a
    /// companion sequence; `false` when they are recomputed from the raw
    /// value on every read.
    const MATERIALIZED: bool;

    /// Builds the element for `raw`. Must not modify `raw`.
    ///
    /// Returns `None` when `raw` has no element representation.
    fn create(&self, raw: &Self::Raw) -> Option<Self::Element>;

    fn unwrap(&self, element: &Self::Element) -> Self::Raw;

    /// Whether `create` can run at all (a container codec needs a factory).
    fn can_create(&self) -> bool {
        true
    }
}

/// Codec for primitive elements: the element is the raw value.
pub struct Identity<R> {
    marker: PhantomData<R>,
}

pub type NumberCodec = Identity<f64>;
pub type IntegerCodec = Identity<i32>;
pub type StringCodec = Identity<String>;
pub type ObjectCodec = Identity<NativeObject>;
pub type ValueCodec = Identity<NativeValue>;

impl<R> Default for Identity<R> {
    fn default() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<R> Clone for Identity<R> {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl<R> fmt::Debug for Identity<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity<{}>", std::any::type_name::<R>())
    }
}

impl<R: RawElement> ElementCodec for Identity<R> {
    type Raw = R;
    type Element = R;

    const MATERIALIZED: bool = false;

    fn create(&self, raw: &R) -> Option<R> {
        Some(raw.clone())
    }

    fn unwrap(&self, element: &R) -> R {
        element.clone()
    }
}

/// Codec for enum keys persisted by name in a string array.
pub struct KeyCodec<K> {
    marker: PhantomData<K>,
}

impl<K> Default for KeyCodec<K> {
    fn default() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<K> Clone for KeyCodec<K> {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl<K> fmt::Debug for KeyCodec<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyCodec<{}>", std::any::type_name::<K>())
    }
}

impl<K: EnumKey> ElementCodec for KeyCodec<K> {
    type Raw = String;
    type Element = K;

    const MATERIALIZED: bool = false;

    fn create(&self, raw: &String) -> Option<K> {
        K::from_name(raw)
    }

    fn unwrap(&self, element: &K) -> String {
        element.name().to_owned()
    }
}

/// Builds a container wrapper around an existing host object.
pub trait Factory<E> {
    fn create(&self, native_object: NativeObject) -> E;
}

impl<E, F> Factory<E> for F
where
    F: Fn(NativeObject) -> E,
{
    fn create(&self, native_object: NativeObject) -> E {
        self(native_object)
    }
}

/// Codec for container elements: wrappers around host objects.
///
/// Unwrapping never needs the factory; only hydration from an existing
/// array does.
pub struct ContainerCodec<E> {
    factory: Option<Rc<dyn Factory<E>>>,
}

impl<E> ContainerCodec<E> {
    #[must_use]
    pub fn new() -> Self {
        Self { factory: None }
    }

    #[must_use]
    pub fn with_factory(factory: impl Factory<E> + 'static) -> Self {
        Self {
            factory: Some(Rc::new(factory)),
        }
    }

    #[must_use]
    pub fn has_factory(&self) -> bool {
        self.factory.is_some()
    }
}

impl<E> Default for ContainerCodec<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for ContainerCodec<E> {
    fn clone(&self) -> Self {
        Self {
            factory: self.factory.clone(),
        }
    }
}

impl<E> fmt::Debug for ContainerCodec<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerCodec")
            .field("has_factory", &self.has_factory())
            .finish()
    }
}

impl<E> ElementCodec for ContainerCodec<E>
where
    E: NativeObjectContainer + Clone + PartialEq,
{
    type Raw = NativeObject;
    type Element = E;

    const MATERIALIZED: bool = true;

    fn create(&self, raw: &NativeObject) -> Option<E> {
        self.factory
            .as_ref()
            .map(|factory| factory.create(raw.clone()))
    }

    fn unwrap(&self, element: &E) -> NativeObject {
        element.native_object().clone()
    }

    fn can_create(&self) -> bool {
        self.has_factory()
    }
}

/// Builds a wrapper around an existing host number array.
pub trait ArrayFactory<E> {
    fn create(&self, native_array: NativeArray<f64>) -> E;
}

impl<E, F> ArrayFactory<E> for F
where
    F: Fn(NativeArray<f64>) -> E,
{
    fn create(&self, native_array: NativeArray<f64>) -> E {
        self(native_array)
    }
}

/// Codec for wrappers around nested number arrays, such as `[x, y]` data
/// points stored in an array of arrays.
pub struct ArrayContainerCodec<E> {
    factory: Option<Rc<dyn ArrayFactory<E>>>,
}

impl<E> ArrayContainerCodec<E> {
    #[must_use]
    pub fn new() -> Self {
        Self { factory: None }
    }

    #[must_use]
    pub fn with_factory(factory: impl ArrayFactory<E> + 'static) -> Self {
        Self {
            factory: Some(Rc::new(factory)),
        }
    }

    #[must_use]
    pub fn has_factory(&self) -> bool {
        self.factory.is_some()
    }
}

impl<E> Default for ArrayContainerCodec<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for ArrayContainerCodec<E> {
    fn clone(&self) -> Self {
        Self {
            factory: self.factory.clone(),
        }
    }
}

impl<E> fmt::Debug for ArrayContainerCodec<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayContainerCodec")
            .field("has_factory", &self.has_factory())
            .finish()
    }
}

impl<E> ElementCodec for ArrayContainerCodec<E>
where
    E: NativeArrayContainer + Clone + PartialEq,
{
    type Raw = NativeArray<f64>;
    type Element = E;

    const MATERIALIZED: bool = true;

    fn create(&self, raw: &NativeArray<f64>) -> Option<E> {
        self.factory
            .as_ref()
            .map(|factory| factory.create(raw.clone()))
    }

    fn unwrap(&self, element: &E) -> NativeArray<f64> {
        element.native_array().clone()
    }

    fn can_create(&self) -> bool {
        self.has_factory()
    }
}
