//! chart-bridge: typed access to host-owned charting configuration.
//!
//! Chart configuration lives in untyped host objects and flat host arrays.
//! This crate layers typed fields onto those objects through a
//! property-descriptor bridge and exposes host arrays as ordered lists that
//! keep an optional sequence of wrapper objects in lock-step with the array
//! the host reads.
//!
//! Everything here is single-threaded: handles are `Rc`-based and lists
//! perform no internal locking.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{ArrayList, BridgeConfig, ElementCodec, NativeObjectContainer};
pub use crate::core::{NativeArray, NativeObject, NativeValue, PropertyDescriptor};
pub use error::{BridgeError, BridgeResult};
