//! Schema fragments and their structural kind

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Structural kind of a schema fragment
///
/// The kind alone decides which property variant a fragment produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    /// Anything that is not an object or an array
    Leaf,
    /// `"type": "object"`
    Object,
    /// `"type": "array"`
    Array,
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf => write!(f, "leaf"),
            Self::Object => write!(f, "object"),
            Self::Array => write!(f, "array"),
        }
    }
}

/// A parsed JSON schema fragment
///
/// Wraps the raw JSON so that keywords this crate does not interpret
/// (`format`, `minimum`, `required`, ...) still reach the validator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaNode(Value);

impl SchemaNode {
    /// Wrap a JSON value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Decode a schema from JSON text
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text).map(Self)
    }

    /// The fragment's kind, taken from its `type` keyword
    pub fn kind(&self) -> SchemaKind {
        match self.0.get("type").and_then(Value::as_str) {
            Some("array") => SchemaKind::Array,
            Some("object") => SchemaKind::Object,
            _ => SchemaKind::Leaf,
        }
    }

    /// The raw `type` keyword, when it is a single string
    pub fn type_name(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// The `$ref` pointer, if this fragment still carries one
    pub fn reference(&self) -> Option<&str> {
        self.0.get("$ref").and_then(Value::as_str)
    }

    /// Declared child schemas in declaration order
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.0.get("properties").and_then(Value::as_object)
    }

    /// Iterate declared property names in declaration order
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties()
            .into_iter()
            .flat_map(|props| props.keys().map(String::as_str))
    }

    /// Get the schema declared for a property
    pub fn property(&self, name: &str) -> Option<SchemaNode> {
        self.properties()
            .and_then(|props| props.get(name))
            .filter(|fragment| fragment.is_object())
            .cloned()
            .map(Self)
    }

    /// Whether a property is declared
    pub fn has_property(&self, name: &str) -> bool {
        self.properties()
            .and_then(|props| props.get(name))
            .is_some_and(Value::is_object)
    }

    /// The schema every array item must conform to
    pub fn items(&self) -> Option<SchemaNode> {
        self.0.get("items").filter(|items| items.is_object()).cloned().map(Self)
    }

    /// The declared default, ignoring an explicit `null`
    pub fn default_value(&self) -> Option<&Value> {
        self.0.get("default").filter(|value| !value.is_null())
    }

    /// The allowed values, if constrained by `enum`
    pub fn enum_values(&self) -> Option<&[Value]> {
        self.0.get("enum").and_then(Value::as_array).map(Vec::as_slice)
    }

    /// The value a fresh leaf starts with: the default, or the only enum member
    pub fn initial_value(&self) -> Option<&Value> {
        self.default_value().or_else(|| match self.enum_values() {
            Some([only]) => Some(only),
            _ => None,
        })
    }

    /// Whether writes to this property are rejected
    pub fn is_readonly(&self) -> bool {
        match self.0.get("readonly").or_else(|| self.0.get("readOnly")) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Null) | None => false,
            Some(_) => true,
        }
    }

    /// Borrow the raw JSON
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Mutable access for in-place reference resolution
    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    /// Unwrap the raw JSON
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for SchemaNode {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
