//! Leaf values and their string forms
//!
//! Every leaf of a configuration tree yields an optional [`LeafValue`].
//! Rendering a value applies the stringification rules for its kind; a
//! `None` leaf is never rendered and its key is left out of the export.

use crate::error::{InitParamsError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared kind of a leaf field, as listed in a node's schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Bool,
    Integer,
    Symbol,
    TypeRef,
    Structured,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Text => "string",
            ValueKind::Bool => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Symbol => "enum",
            ValueKind::TypeRef => "type",
            ValueKind::Structured => "structured",
        };
        f.write_str(name)
    }
}

/// Small closed enums exported under a fixed symbol per variant
pub trait Symbolic {
    fn symbol(&self) -> &'static str;
}

/// Reference to a type, exported as its fully qualified name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef(String);

const QUALIFIED_NAME_PATTERN: &str =
    r"^[A-Za-z_$][A-Za-z0-9_$]*((\.|::)[A-Za-z_$][A-Za-z0-9_$]*)+$";

impl TypeRef {
    /// Parse a qualified type name such as `org.primefaces.cache.EHCacheProvider`
    pub fn parse<S: AsRef<str>>(name: S) -> Result<Self> {
        let name = name.as_ref().trim();
        if !is_qualified_type_name(name)? {
            return Err(InitParamsError::invalid_type_ref(format!(
                "'{}' is not a fully qualified type name",
                name
            )));
        }
        Ok(Self(name.to_string()))
    }

    /// Reference a Rust type by its compiler-reported path
    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>().to_string())
    }

    pub fn qualified_name(&self) -> &str {
        &self.0
    }

    /// Last path segment of the name
    pub fn simple_name(&self) -> &str {
        self.0
            .rsplit(|c: char| c == '.' || c == ':')
            .next()
            .unwrap_or(&self.0)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = InitParamsError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check whether a name is a dotted (or `::` separated) qualified type name
pub fn is_qualified_type_name(name: &str) -> Result<bool> {
    let re = Regex::new(QUALIFIED_NAME_PATTERN)?;
    Ok(re.is_match(name))
}

/// Value held by a leaf field
#[derive(Debug, Clone, PartialEq)]
pub enum LeafValue {
    Text(String),
    Bool(bool),
    Integer(i64),
    Symbol(&'static str),
    Type(TypeRef),
    /// Value captured through serde; only scalars have a string form
    Structured(serde_json::Value),
}

impl LeafValue {
    /// Capture any serializable value. `null` yields no value.
    pub fn serialized<T: Serialize + ?Sized>(value: &T) -> Result<Option<Self>> {
        let value = match serde_json::to_value(value)? {
            serde_json::Value::Null => return Ok(None),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Structured(serde_json::Value::Number(n)),
            },
            other => Self::Structured(other),
        };
        Ok(Some(value))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            LeafValue::Text(_) => ValueKind::Text,
            LeafValue::Bool(_) => ValueKind::Bool,
            LeafValue::Integer(_) => ValueKind::Integer,
            LeafValue::Symbol(_) => ValueKind::Symbol,
            LeafValue::Type(_) => ValueKind::TypeRef,
            LeafValue::Structured(_) => ValueKind::Structured,
        }
    }

    /// Render the value as a parameter string.
    ///
    /// Returns `Ok(None)` when the value counts as unset: JSON `null`, and
    /// empty text when `empty_is_unset` is on. Arrays and objects have no
    /// string form and fail with `UnsupportedValueType`.
    pub fn render(&self, field: &str, empty_is_unset: bool) -> Result<Option<String>> {
        let rendered = match self {
            LeafValue::Text(s) if s.is_empty() && empty_is_unset => return Ok(None),
            LeafValue::Text(s) => s.clone(),
            LeafValue::Bool(b) => b.to_string(),
            LeafValue::Integer(i) => i.to_string(),
            LeafValue::Symbol(s) => (*s).to_string(),
            LeafValue::Type(t) => t.qualified_name().to_string(),
            LeafValue::Structured(value) => match value {
                serde_json::Value::Null => return Ok(None),
                serde_json::Value::String(s) if s.is_empty() && empty_is_unset => {
                    return Ok(None)
                }
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Array(_) => {
                    return Err(InitParamsError::unsupported_value(field, "array"))
                }
                serde_json::Value::Object(_) => {
                    return Err(InitParamsError::unsupported_value(field, "object"))
                }
            },
        };
        Ok(Some(rendered))
    }
}

impl From<String> for LeafValue {
    fn from(value: String) -> Self {
        LeafValue::Text(value)
    }
}

impl From<&str> for LeafValue {
    fn from(value: &str) -> Self {
        LeafValue::Text(value.to_string())
    }
}

impl From<bool> for LeafValue {
    fn from(value: bool) -> Self {
        LeafValue::Bool(value)
    }
}

impl From<i64> for LeafValue {
    fn from(value: i64) -> Self {
        LeafValue::Integer(value)
    }
}

impl From<TypeRef> for LeafValue {
    fn from(value: TypeRef) -> Self {
        LeafValue::Type(value)
    }
}
