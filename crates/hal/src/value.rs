//! The output hypermedia value.
//!
//! [`HalValue`] mirrors [`DocumentValue`](crate::model::DocumentValue) but keeps
//! every numeric kind distinct all the way to the serializer, so an `f32` is
//! written with single precision formatting instead of being widened.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// An ordered JSON object of hypermedia values.
pub type HalObject = IndexMap<String, HalValue>;

/// A JSON value produced by the converter.
#[derive(Debug, Clone, PartialEq)]
pub enum HalValue {
    /// JSON null.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// Single precision float.
    Float(f32),
    /// Double precision float.
    Double(f64),
    /// JSON string.
    String(String),
    /// JSON array.
    Array(Vec<HalValue>),
    /// JSON object, in insertion order.
    Object(HalObject),
}

impl HalValue {
    /// Returns the object map if this is an object.
    pub fn as_object(&self) -> Option<&HalObject> {
        match self {
            HalValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the elements if this is an array.
    pub fn as_array(&self) -> Option<&[HalValue]> {
        match self {
            HalValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the string if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HalValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up a key if this is an object.
    pub fn get(&self, key: &str) -> Option<&HalValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Converts into a `serde_json::Value`.
    ///
    /// `Float` values go through their shortest single precision decimal
    /// form, so `0.1f32` becomes `0.1` rather than `0.10000000149011612`.
    /// Non-finite floats become `null`, as the JSON serializer writes them.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            HalValue::Null => Value::Null,
            HalValue::Bool(b) => Value::Bool(*b),
            HalValue::Int(i) => Value::from(*i),
            HalValue::Long(l) => Value::from(*l),
            HalValue::Float(f) => f
                .to_string()
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            HalValue::Double(d) => serde_json::Number::from_f64(*d)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            HalValue::String(s) => Value::String(s.clone()),
            HalValue::Array(items) => Value::Array(items.iter().map(HalValue::to_json).collect()),
            HalValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl Serialize for HalValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            HalValue::Null => serializer.serialize_unit(),
            HalValue::Bool(b) => serializer.serialize_bool(*b),
            HalValue::Int(i) => serializer.serialize_i32(*i),
            HalValue::Long(l) => serializer.serialize_i64(*l),
            HalValue::Float(f) => serializer.serialize_f32(*f),
            HalValue::Double(d) => serializer.serialize_f64(*d),
            HalValue::String(s) => serializer.serialize_str(s),
            HalValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            HalValue::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

impl From<&str> for HalValue {
    fn from(value: &str) -> Self {
        HalValue::String(value.to_string())
    }
}

impl From<String> for HalValue {
    fn from(value: String) -> Self {
        HalValue::String(value)
    }
}

impl From<HalObject> for HalValue {
    fn from(value: HalObject) -> Self {
        HalValue::Object(value)
    }
}
