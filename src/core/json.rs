//! JSON rendering and loading of host values.
//!
//! Rendering follows the host `JSON.stringify` rules the configuration
//! objects rely on: `undefined` fields are skipped, non-finite numbers
//! become `null`, integral numbers print without a fraction and dates print
//! as ISO-8601 strings. Host graphs may be cyclic, so rendering is bounded
//! by a maximum nesting depth.

use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::native_array::{NativeArray, RawElement};
use crate::core::native_object::{NativeObject, define_field};
use crate::core::value::{AnyArray, NativeValue};
use crate::error::{BridgeError, BridgeResult};

// 2^53: beyond this an `f64` no longer maps 1:1 onto integers.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonOptions {
    /// Spaces per nesting level; `0` renders compact output.
    pub indent: usize,
    pub max_depth: usize,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            indent: 0,
            max_depth: 64,
        }
    }
}

/// Converts a host value into a `serde_json::Value`.
///
/// Returns `Value::Null` for a top-level `undefined`.
pub fn to_json_value(value: &NativeValue, max_depth: usize) -> BridgeResult<Value> {
    Ok(render(value, 0, max_depth)?.unwrap_or(Value::Null))
}

pub fn stringify(value: &NativeValue, options: JsonOptions) -> BridgeResult<String> {
    let rendered = to_json_value(value, options.max_depth)?;
    write_json(&rendered, options.indent)
}

pub fn stringify_array<R: RawElement>(
    array: &NativeArray<R>,
    options: JsonOptions,
) -> BridgeResult<String> {
    let mut items = Vec::with_capacity(array.length());
    array.with_slice(|slice| -> BridgeResult<()> {
        for item in slice {
            let value = render(&item.to_native(), 1, options.max_depth)?;
            items.push(value.unwrap_or(Value::Null));
        }
        Ok(())
    })?;
    write_json(&Value::Array(items), options.indent)
}

pub fn stringify_object(object: &NativeObject, options: JsonOptions) -> BridgeResult<String> {
    stringify(&NativeValue::Object(object.clone()), options)
}

fn write_json(value: &Value, indent: usize) -> BridgeResult<String> {
    if indent == 0 {
        return serde_json::to_string(value)
            .map_err(|e| BridgeError::InvalidData(format!("failed to serialize json: {e}")));
    }

    let spaces = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(spaces.as_bytes());
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| BridgeError::InvalidData(format!("failed to serialize json: {e}")))?;
    String::from_utf8(buffer)
        .map_err(|e| BridgeError::InvalidData(format!("serialized json is not utf-8: {e}")))
}

fn render(value: &NativeValue, depth: usize, max_depth: usize) -> BridgeResult<Option<Value>> {
    let rendered = match value {
        NativeValue::Undefined => return Ok(None),
        NativeValue::Null => Value::Null,
        NativeValue::Bool(value) => Value::Bool(*value),
        NativeValue::Number(value) => render_number(*value),
        NativeValue::String(value) => Value::String(value.clone()),
        NativeValue::Date(value) => {
            Value::String(value.to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        NativeValue::Object(object) => {
            check_depth(depth, max_depth)?;
            render_object(object, depth + 1, max_depth)?
        }
        NativeValue::Array(array) => {
            check_depth(depth, max_depth)?;
            let mut items = Vec::with_capacity(array.length());
            for index in 0..array.length() {
                let item = array.get_value(index).unwrap_or(NativeValue::Undefined);
                items.push(render(&item, depth + 1, max_depth)?.unwrap_or(Value::Null));
            }
            Value::Array(items)
        }
    };
    Ok(Some(rendered))
}

fn render_object(object: &NativeObject, depth: usize, max_depth: usize) -> BridgeResult<Value> {
    object.with_fields(|fields| -> BridgeResult<Value> {
        let mut map = Map::new();
        for (name, descriptor) in fields {
            if !descriptor.enumerable {
                continue;
            }
            if let Some(value) = render(&descriptor.value, depth, max_depth)? {
                map.insert(name.clone(), value);
            }
        }
        Ok(Value::Object(map))
    })
}

fn render_number(value: f64) -> Value {
    if !value.is_finite() {
        return Value::Null;
    }
    if value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
        return Value::from(value as i64);
    }
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

fn check_depth(depth: usize, max_depth: usize) -> BridgeResult<()> {
    if depth >= max_depth {
        return Err(BridgeError::InvalidData(format!(
            "native value nesting exceeds max depth {max_depth} (cyclic graph?)"
        )));
    }
    Ok(())
}

/// Parses JSON text into a fresh host value graph.
pub fn parse(input: &str) -> BridgeResult<NativeValue> {
    let value: Value = serde_json::from_str(input)
        .map_err(|e| BridgeError::InvalidData(format!("failed to parse json payload: {e}")))?;
    from_json_value(&value)
}

/// Parses JSON text whose top level must be an object.
pub fn parse_object(input: &str) -> BridgeResult<NativeObject> {
    match parse(input)? {
        NativeValue::Object(object) => Ok(object),
        other => Err(BridgeError::InvalidData(format!(
            "expected json object, found {}",
            other.type_name()
        ))),
    }
}

/// Builds host values from JSON.
///
/// Homogeneous non-empty arrays of numbers, strings, objects or non-empty
/// number arrays become typed arrays; empty and mixed arrays become
/// [`AnyArray::Value`].
pub fn from_json_value(value: &Value) -> BridgeResult<NativeValue> {
    let converted = match value {
        Value::Null => NativeValue::Null,
        Value::Bool(value) => NativeValue::Bool(*value),
        Value::Number(number) => NativeValue::Number(number.as_f64().unwrap_or(f64::NAN)),
        Value::String(value) => NativeValue::String(value.clone()),
        Value::Array(items) => NativeValue::Array(array_from_json(items)?),
        Value::Object(map) => {
            let object = NativeObject::new();
            for (name, field) in map {
                define_field(&object, name, from_json_value(field)?)?;
            }
            NativeValue::Object(object)
        }
    };
    Ok(converted)
}

fn array_from_json(items: &[Value]) -> BridgeResult<AnyArray> {
    if !items.is_empty() {
        if items.iter().all(Value::is_number) {
            let numbers = items.iter().filter_map(Value::as_f64).collect();
            return Ok(AnyArray::Number(NativeArray::from_vec(numbers)));
        }
        if items.iter().all(Value::is_string) {
            let strings = items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_owned))
                .collect();
            return Ok(AnyArray::String(NativeArray::from_vec(strings)));
        }
        if items.iter().all(Value::is_object) {
            let mut objects = Vec::with_capacity(items.len());
            for item in items {
                if let NativeValue::Object(object) = from_json_value(item)? {
                    objects.push(object);
                }
            }
            return Ok(AnyArray::Object(NativeArray::from_vec(objects)));
        }
        if items.iter().all(is_number_array) {
            let arrays = items
                .iter()
                .filter_map(Value::as_array)
                .map(|inner| {
                    NativeArray::from_vec(inner.iter().filter_map(Value::as_f64).collect())
                })
                .collect();
            return Ok(AnyArray::NumberArray(NativeArray::from_vec(arrays)));
        }
    }

    let mut values = Vec::with_capacity(items.len());
    for item in items {
        values.push(from_json_value(item)?);
    }
    Ok(AnyArray::Value(NativeArray::from_vec(values)))
}

fn is_number_array(item: &Value) -> bool {
    item.as_array()
        .is_some_and(|inner| !inner.is_empty() && inner.iter().all(Value::is_number))
}
