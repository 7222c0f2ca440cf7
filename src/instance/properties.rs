//! Polymorphic instance properties.
//!
//! Repository instances carry their attributes as a property bag: a map of
//! property name to a value whose kind is only known at runtime. The original
//! repository model distinguishes primitive values, enumerated values, nested
//! maps, and a tail of kinds this engine does not interpret (arrays, structs,
//! entity references). [`PropertyValue`] models that as a tagged union so
//! every consumer match is checked for exhaustiveness.
//!
//! The bag is ordered by property name, which keeps extraction output
//! deterministic across calls and processes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered property bag of a generic instance.
pub type PropertyBag = BTreeMap<String, PropertyValue>;

/// A single property value of a generic instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyValue {
    /// Scalar value of one of the known primitive categories.
    Primitive(PrimitiveValue),
    /// Enumerated value: ordinal symbol plus human-readable description.
    Enum {
        symbol: String,
        description: String,
    },
    /// Nested free-form map, as used by "additional properties" attributes.
    Map(PropertyBag),
    /// Value kind this engine does not interpret.
    Other,
}

impl PropertyValue {
    /// Returns the primitive payload, if this is a primitive value.
    pub fn as_primitive(&self) -> Option<&PrimitiveValue> {
        match self {
            PropertyValue::Primitive(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the nested map, if this is a map value.
    pub fn as_map(&self) -> Option<&PropertyBag> {
        match self {
            PropertyValue::Map(bag) => Some(bag),
            _ => None,
        }
    }

    /// Convenience constructor for a string primitive.
    pub fn string(value: impl Into<String>) -> Self {
        PropertyValue::Primitive(PrimitiveValue::String(value.into()))
    }
}

/// Scalar value categories carried by the repository property model.
///
/// The big-number categories arrive as their canonical decimal rendering and
/// are carried as text rather than re-parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "value", rename_all = "snake_case")]
pub enum PrimitiveValue {
    Bool(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    BigInt(String),
    BigDecimal(String),
    String(String),
    Date(DateTime<Utc>),
}

impl PrimitiveValue {
    /// String form of the value, used where a record field is textual
    /// (display names, endpoint qualified names, search predicates).
    pub fn as_display_string(&self) -> String {
        match self {
            PrimitiveValue::Bool(v) => v.to_string(),
            PrimitiveValue::Byte(v) => v.to_string(),
            PrimitiveValue::Char(v) => v.to_string(),
            PrimitiveValue::Short(v) => v.to_string(),
            PrimitiveValue::Int(v) => v.to_string(),
            PrimitiveValue::Long(v) => v.to_string(),
            PrimitiveValue::Float(v) => v.to_string(),
            PrimitiveValue::Double(v) => v.to_string(),
            PrimitiveValue::BigInt(v) => v.clone(),
            PrimitiveValue::BigDecimal(v) => v.clone(),
            PrimitiveValue::String(v) => v.clone(),
            PrimitiveValue::Date(v) => v.to_rfc3339(),
        }
    }

    /// Returns the payload if this is a string primitive.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrimitiveValue::String(v) => Some(v),
            _ => None,
        }
    }
}
