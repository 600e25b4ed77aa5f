//! Typed side of the bridge: element codecs, the dual-representation list
//! and the container contract wrappers implement.

mod array_list;
mod codec;
mod config;
mod container;
mod helpers;
mod iter;

pub use array_list::{
    ArrayContainerList, ArrayList, ContainerList, IntegerList, KeyList, NumberList, ObjectList,
    StringList, ValueList,
};
pub use codec::{
    ArrayContainerCodec, ArrayFactory, ContainerCodec, ElementCodec, Factory, Identity,
    IntegerCodec, KeyCodec, NumberCodec, ObjectCodec, StringCodec, ValueCodec,
};
pub use config::{BridgeConfig, OutOfRangeInsert};
pub use container::{EnumKey, Key, NativeArrayContainer, NativeObjectContainer};
pub use helpers::{
    ReadOnlyList, array_container_list_from, array_from_list, array_from_or_empty,
    array_from_or_none, container_list_from, key_list_of, list_from, read_only_from,
};
pub use iter::{Iter, ListIter};
