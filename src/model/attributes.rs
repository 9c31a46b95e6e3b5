//! Typed attribute values attached to models and city objects

use std::collections::BTreeMap;
use std::fmt;

/// Attributes keyed by name, iterated in name order
pub type AttributesMap = BTreeMap<String, AttributeValue>;

/// A typed attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Free text
    String(String),
    /// Floating-point number
    Double(f64),
    /// Integer number
    Integer(i64),
    /// Date in its textual (ISO 8601) form
    Date(String),
    /// URI
    Uri(String),
}

impl AttributeValue {
    /// Local name of the generic attribute element carrying this kind of value
    pub fn generic_element_name(&self) -> &'static str {
        match self {
            AttributeValue::String(_) => "stringAttribute",
            AttributeValue::Double(_) => "doubleAttribute",
            AttributeValue::Integer(_) => "intAttribute",
            AttributeValue::Date(_) => "dateAttribute",
            AttributeValue::Uri(_) => "uriAttribute",
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) | AttributeValue::Date(s) | AttributeValue::Uri(s) => {
                f.write_str(s)
            }
            AttributeValue::Double(v) => write!(f, "{}", v),
            AttributeValue::Integer(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Double(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}
