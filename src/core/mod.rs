//! Host-side primitives: shared arrays, free-form objects and the
//! property-descriptor bridge used to layer typed fields onto them.

pub mod json;
pub mod native_array;
pub mod native_object;
pub mod value;

pub use json::JsonOptions;
pub use native_array::{HostArrayView, NativeArray, RawElement};
pub use native_object::{
    NativeObject, PropertyDescriptor, define_field, define_field_with, get_field_descriptor,
    has_own_field, object_as_map, remove_field,
};
pub use value::{AnyArray, FromNative, NativeValue};
