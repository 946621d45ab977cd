//! # Field Definitions
//!
//! A field is one named, typed, optionally-required column of a structure.
//! Field order is significant: it is the column order of every form and
//! table built from the structure.
//!
//! ## Type dispatch
//!
//! Every type-dependent behaviour goes through [`FieldType`]. Adding a
//! variant forces every `match` below to handle it.
//!
//! | Type      | `parse_input`                         | `accepts`      |
//! |-----------|---------------------------------------|----------------|
//! | `string`  | text as-is                            | JSON string    |
//! | `number`  | JSON number if it parses, else text   | JSON number    |
//! | `boolean` | `true/yes/1`, `false/no/0`, else text | JSON bool      |
//!
//! Parsing is lenient: unparseable input is kept as text so that nothing
//! typed into a form is silently lost.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
    Number,
    Boolean,
}

impl FieldType {
    /// All types, in the order a type picker lists them.
    pub const ALL: [FieldType; 3] = [FieldType::String, FieldType::Number, FieldType::Boolean];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Convert raw form text into a JSON value of this type.
    ///
    /// Blank input always stays the empty string.
    pub fn parse_input(&self, raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::String(raw.to_string());
        }
        match self {
            Self::String => Value::String(raw.to_string()),
            Self::Number => parse_number(trimmed).unwrap_or_else(|| Value::String(raw.to_string())),
            Self::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Value::Bool(true),
                "false" | "no" | "0" => Value::Bool(false),
                _ => Value::String(raw.to_string()),
            },
        }
    }

    /// Whether `value` conforms to this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

fn parse_number(text: &str) -> Option<Value> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(Value::from(n));
    }
    text.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field type '{0}' (expected string, number or boolean)")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "boolean" | "bool" => Ok(Self::Boolean),
            other => Err(UnknownFieldType(other.to_string())),
        }
    }
}

/// Format a stored value for table display. Missing and null are blank.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// One column of a structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            name: String::new(),
            field_type: FieldType::String,
            required: false,
        }
    }
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
        }
    }

    /// Builder-style: mark the field required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Whether the name is non-blank after trimming.
    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Return a copy with one attribute replaced.
    pub fn with_update(&self, update: &FieldUpdate) -> Field {
        let mut next = self.clone();
        match update {
            FieldUpdate::Name(name) => next.name = name.clone(),
            FieldUpdate::Type(t) => next.field_type = *t,
            FieldUpdate::Required(r) => next.required = *r,
        }
        next
    }
}

/// A single-attribute edit to a [`Field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    Type(FieldType),
    Required(bool),
}
