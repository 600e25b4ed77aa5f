use chrono::{DateTime, Utc};

use crate::core::native_array::NativeArray;
use crate::core::native_object::NativeObject;

/// A value as the host runtime stores it inside objects and arrays.
///
/// Objects and arrays are handles: cloning a `NativeValue::Object` or
/// `NativeValue::Array` aliases the same host storage, and equality on them
/// is identity, matching how the host compares references.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Date(DateTime<Utc>),
    Object(NativeObject),
    Array(AnyArray),
}

impl NativeValue {
    #[must_use]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Host `typeof`-style classification, used in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
        }
    }
}

/// A host array of any element kind.
///
/// Arrays keep the element kind they were created with; a number array is
/// never reinterpreted as a string array, since both views would alias the
/// same storage.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyArray {
    Number(NativeArray<f64>),
    Integer(NativeArray<i32>),
    String(NativeArray<String>),
    Object(NativeArray<NativeObject>),
    /// Array of number arrays, e.g. `[x, y]` data points.
    NumberArray(NativeArray<NativeArray<f64>>),
    /// Mixed or untyped content, e.g. arrays loaded from JSON.
    Value(NativeArray<NativeValue>),
}

impl AnyArray {
    #[must_use]
    pub fn length(&self) -> usize {
        match self {
            Self::Number(array) => array.length(),
            Self::Integer(array) => array.length(),
            Self::String(array) => array.length(),
            Self::Object(array) => array.length(),
            Self::NumberArray(array) => array.length(),
            Self::Value(array) => array.length(),
        }
    }

    /// Element `index` widened to a `NativeValue`.
    #[must_use]
    pub fn get_value(&self, index: usize) -> Option<NativeValue> {
        match self {
            Self::Number(array) => array.get(index).map(NativeValue::Number),
            Self::Integer(array) => array
                .get(index)
                .map(|value| NativeValue::Number(f64::from(value))),
            Self::String(array) => array.get(index).map(NativeValue::String),
            Self::Object(array) => array.get(index).map(NativeValue::Object),
            Self::NumberArray(array) => array
                .get(index)
                .map(|inner| NativeValue::Array(AnyArray::Number(inner))),
            Self::Value(array) => array.get(index),
        }
    }
}

/// Conversion out of a host value into a typed Rust value.
///
/// Returns `None` when the stored value has a different type, the same way
/// a typed getter falls back to its default.
pub trait FromNative: Sized {
    fn from_native(value: &NativeValue) -> Option<Self>;
}

impl FromNative for NativeValue {
    fn from_native(value: &NativeValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromNative for bool {
    fn from_native(value: &NativeValue) -> Option<Self> {
        match value {
            NativeValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl FromNative for f64 {
    fn from_native(value: &NativeValue) -> Option<Self> {
        match value {
            NativeValue::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl FromNative for i32 {
    fn from_native(value: &NativeValue) -> Option<Self> {
        match value {
            NativeValue::Number(value)
                if value.is_finite()
                    && value.fract() == 0.0
                    && *value >= f64::from(i32::MIN)
                    && *value <= f64::from(i32::MAX) =>
            {
                Some(*value as i32)
            }
            _ => None,
        }
    }
}

impl FromNative for String {
    fn from_native(value: &NativeValue) -> Option<Self> {
        match value {
            NativeValue::String(value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl FromNative for DateTime<Utc> {
    fn from_native(value: &NativeValue) -> Option<Self> {
        match value {
            NativeValue::Date(value) => Some(*value),
            _ => None,
        }
    }
}

impl FromNative for NativeObject {
    fn from_native(value: &NativeValue) -> Option<Self> {
        match value {
            NativeValue::Object(object) => Some(object.clone()),
            _ => None,
        }
    }
}

impl From<bool> for NativeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for NativeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for NativeValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<String> for NativeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for NativeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<DateTime<Utc>> for NativeValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<NativeObject> for NativeValue {
    fn from(value: NativeObject) -> Self {
        Self::Object(value)
    }
}

impl From<AnyArray> for NativeValue {
    fn from(value: AnyArray) -> Self {
        Self::Array(value)
    }
}
