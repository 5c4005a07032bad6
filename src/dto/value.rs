//! Dynamic value model
//!
//! Raw input, field values and flattened output all use [`Value`]. Plain data
//! is null, scalars, lists and maps; typed data is a [`Record`] or a
//! [`Collection`].

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::collection::Collection;
use super::record::Record;

/// Ordered string-keyed mapping used for input and flattened records
pub type Map = IndexMap<String, Value>;

/// Runtime kind of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Boolean,
    Integer,
    Double,
    String,
    Array,
    Object,
}

impl Kind {
    /// Returns the canonical kind name
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Double => "double",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }

    /// Resolves a declared kind name, honoring the `int`, `bool` and `float`
    /// aliases
    pub fn from_declared(name: &str) -> Option<Kind> {
        match name.to_ascii_lowercase().as_str() {
            "int" | "integer" => Some(Kind::Integer),
            "float" | "double" => Some(Kind::Double),
            "bool" | "boolean" => Some(Kind::Boolean),
            "string" => Some(Kind::String),
            "array" => Some(Kind::Array),
            "object" => Some(Kind::Object),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A dynamically typed value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Positional sequence
    List(Vec<Value>),
    /// String-keyed mapping
    Map(Map),
    /// Typed instance
    Record(Record),
    /// Sequence wrapper
    Collection(Collection),
}

impl Value {
    /// Returns the runtime kind
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Int(_) => Kind::Integer,
            Value::Float(_) => Kind::Double,
            Value::String(_) => Kind::String,
            Value::List(_) | Value::Map(_) => Kind::Array,
            Value::Record(_) | Value::Collection(_) => Kind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for plain lists and maps
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Value::List(_) | Value::Map(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Value::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Consumes the value, returning the map if it is one
    pub fn into_map(self) -> Option<Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Human-readable rendering used in error messages.
    ///
    /// Null renders as `null`, typed values as their type name, aggregates as
    /// `array`, scalars as themselves.
    pub fn render(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::List(_) | Value::Map(_) => "array".to_string(),
            Value::Record(record) => record.name().to_string(),
            Value::Collection(collection) => collection.type_name().to_string(),
        }
    }

    /// Recursively projects typed values into plain data.
    ///
    /// Records become maps (honoring their view restrictions), collections
    /// become lists, plain aggregates are walked element-wise.
    pub fn flatten(&self) -> Value {
        match self {
            Value::Record(record) => Value::Map(record.flatten()),
            Value::Collection(collection) => Value::List(collection.flatten()),
            Value::List(items) => Value::List(items.iter().map(Value::flatten).collect()),
            Value::Map(map) => {
                Value::Map(map.iter().map(|(k, v)| (k.clone(), v.flatten())).collect())
            }
            scalar => scalar.clone(),
        }
    }

    /// Renders the flattened projection as JSON.
    ///
    /// Non-finite floats have no JSON form and become null.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Value::Record(_) | Value::Collection(_) => self.flatten().to_json(),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                // u64 beyond i64 range and real numbers both land here
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        Value::from(json.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl From<Collection> for Value {
    fn from(collection: Collection) -> Self {
        Value::Collection(collection)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_aliases() {
        assert_eq!(Kind::from_declared("int"), Some(Kind::Integer));
        assert_eq!(Kind::from_declared("integer"), Some(Kind::Integer));
        assert_eq!(Kind::from_declared("bool"), Some(Kind::Boolean));
        assert_eq!(Kind::from_declared("float"), Some(Kind::Double));
        assert_eq!(Kind::from_declared("double"), Some(Kind::Double));
        assert_eq!(Kind::from_declared("Child"), None);
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({"a": 1, "b": [true, null], "c": 1.5}));
        let map = value.as_map().unwrap();
        assert_eq!(map["a"], Value::Int(1));
        assert_eq!(map["b"], Value::List(vec![Value::Bool(true), Value::Null]));
        assert_eq!(map["c"], Value::Float(1.5));
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Value::Null.kind(), Kind::Null);
        assert_eq!(Value::from(1).kind(), Kind::Integer);
        assert_eq!(Value::from(1.0).kind(), Kind::Double);
        assert_eq!(Value::List(vec![]).kind(), Kind::Array);
        assert_eq!(Value::Map(Map::new()).kind(), Kind::Array);
        assert_eq!(Value::Collection(Collection::new()).kind(), Kind::Object);
    }

    #[test]
    fn test_render() {
        assert_eq!(Value::Null.render(), "null");
        assert_eq!(Value::from("abc").render(), "abc");
        assert_eq!(Value::List(vec![Value::from(1)]).render(), "array");
        assert_eq!(Value::from(false).render(), "false");
    }

    #[test]
    fn test_json_round_trip() {
        let json = json!({"name": "x", "tags": ["a", "b"], "n": 3});
        assert_eq!(Value::from(json.clone()).to_json(), json);
    }

    #[test]
    fn test_serde() {
        let value: Value = serde_json::from_str(r#"{"a": [1, 2]}"#).unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }
}
