//! Parameter schema — typed, declarative description of a tool's inputs.
//!
//! A `ParameterSchema` is pure data: it serializes to the JSON Schema
//! subset that LLM function-calling APIs understand (`type`, `enum`,
//! `properties`, `items`, `required`), and can optionally validate a
//! candidate arguments value before dispatch.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The kind of value a schema node describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Null,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
            SchemaKind::Null => "null",
        }
    }
}

/// A recursive parameter descriptor.
///
/// Immutable once constructed. Invariants (enforced by the constructors,
/// re-checkable via [`ParameterSchema::validate_structure`]):
/// - `object` kinds declare `properties`
/// - `array` kinds declare `items`
/// - `required` only names declared properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// The value kind (serialized as JSON Schema `type`).
    #[serde(rename = "type")]
    pub kind: SchemaKind,

    /// Human/LLM-facing description of this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Closed set of allowed literal values.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    /// Child schemas, present iff `kind == object`. BTreeMap keeps the
    /// serialized projection stable across runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, ParameterSchema>>,

    /// Element schema, present iff `kind == array`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ParameterSchema>>,

    /// Property names that must be present on `object` values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl ParameterSchema {
    fn leaf(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
            enum_values: None,
            properties: None,
            items: None,
            required: None,
        }
    }

    /// A string-valued schema.
    pub fn string() -> Self {
        Self::leaf(SchemaKind::String)
    }

    /// A numeric schema (integers and floats).
    pub fn number() -> Self {
        Self::leaf(SchemaKind::Number)
    }

    /// A boolean schema.
    pub fn boolean() -> Self {
        Self::leaf(SchemaKind::Boolean)
    }

    /// A null schema.
    pub fn null() -> Self {
        Self::leaf(SchemaKind::Null)
    }

    /// An object schema with the given named properties.
    pub fn object(properties: impl IntoIterator<Item = (impl Into<String>, ParameterSchema)>) -> Self {
        let mut schema = Self::leaf(SchemaKind::Object);
        schema.properties = Some(
            properties
                .into_iter()
                .map(|(name, prop)| (name.into(), prop))
                .collect(),
        );
        schema
    }

    /// An object schema with no properties (a tool that takes no arguments).
    pub fn empty_object() -> Self {
        let mut schema = Self::leaf(SchemaKind::Object);
        schema.properties = Some(BTreeMap::new());
        schema
    }

    /// An array schema with the given element schema.
    pub fn array(items: ParameterSchema) -> Self {
        let mut schema = Self::leaf(SchemaKind::Array);
        schema.items = Some(Box::new(items));
        schema
    }

    /// Attach a description.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Constrain the value to a closed set of literals.
    pub fn enum_values(mut self, values: impl IntoIterator<Item = serde_json::Value>) -> Self {
        self.enum_values = Some(values.into_iter().collect());
        self
    }

    /// Constrain the value to a closed set of string literals.
    pub fn enum_strings(self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.enum_values(
            values
                .into_iter()
                .map(|v| serde_json::Value::String(v.into())),
        )
    }

    /// Mark object properties as required.
    pub fn required(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.required = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Re-check the structural invariants, recursively.
    ///
    /// The builders uphold these by construction; deserialized schemas
    /// should be checked before use.
    pub fn validate_structure(&self) -> std::result::Result<(), SchemaError> {
        match self.kind {
            SchemaKind::Object => {
                let properties = self
                    .properties
                    .as_ref()
                    .ok_or(SchemaError::ObjectWithoutProperties)?;
                if self.enum_values.is_some() {
                    return Err(SchemaError::EnumOnCompositeKind("object".into()));
                }
                if let Some(required) = &self.required {
                    for name in required {
                        if !properties.contains_key(name) {
                            return Err(SchemaError::UndeclaredRequired(name.clone()));
                        }
                    }
                }
                for prop in properties.values() {
                    prop.validate_structure()?;
                }
            }
            SchemaKind::Array => {
                let items = self.items.as_ref().ok_or(SchemaError::ArrayWithoutItems)?;
                if self.enum_values.is_some() {
                    return Err(SchemaError::EnumOnCompositeKind("array".into()));
                }
                items.validate_structure()?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Validate a candidate value against this schema.
    ///
    /// Returns every violation found rather than stopping at the first.
    /// Properties not declared in the schema are allowed.
    pub fn validate_value(
        &self,
        value: &serde_json::Value,
    ) -> std::result::Result<(), Vec<SchemaViolation>> {
        let mut violations = Vec::new();
        self.check(value, "$", &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    fn check(&self, value: &serde_json::Value, path: &str, out: &mut Vec<SchemaViolation>) {
        let kind_matches = match self.kind {
            SchemaKind::String => value.is_string(),
            SchemaKind::Number => value.is_number(),
            SchemaKind::Boolean => value.is_boolean(),
            SchemaKind::Object => value.is_object(),
            SchemaKind::Array => value.is_array(),
            SchemaKind::Null => value.is_null(),
        };
        if !kind_matches {
            out.push(SchemaViolation::WrongKind {
                path: path.to_string(),
                expected: self.kind,
                found: json_kind_name(value).to_string(),
            });
            return;
        }

        if let Some(allowed) = &self.enum_values {
            if !allowed.contains(value) {
                out.push(SchemaViolation::NotInEnum {
                    path: path.to_string(),
                    value: value.clone(),
                });
            }
        }

        match self.kind {
            SchemaKind::Object => {
                // kind_matches guarantees value is an object here
                let Some(map) = value.as_object() else { return };
                if let Some(required) = &self.required {
                    for name in required {
                        if !map.contains_key(name) {
                            out.push(SchemaViolation::MissingRequired {
                                path: path.to_string(),
                                property: name.clone(),
                            });
                        }
                    }
                }
                if let Some(properties) = &self.properties {
                    for (name, prop_schema) in properties {
                        if let Some(prop_value) = map.get(name) {
                            prop_schema.check(prop_value, &format!("{path}.{name}"), out);
                        }
                    }
                }
            }
            SchemaKind::Array => {
                if let (Some(items), Some(elements)) = (&self.items, value.as_array()) {
                    for (i, element) in elements.iter().enumerate() {
                        items.check(element, &format!("{path}[{i}]"), out);
                    }
                }
            }
            _ => {}
        }
    }

    /// The JSON projection of this schema (JSON Schema-compatible).
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn json_kind_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// A single violation found while validating a value against a schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "violation")]
pub enum SchemaViolation {
    /// A required property is absent from an object value.
    MissingRequired { path: String, property: String },

    /// The value's JSON kind does not match the schema's kind.
    WrongKind {
        path: String,
        expected: SchemaKind,
        found: String,
    },

    /// The value is not a member of the schema's enum set.
    NotInEnum { path: String, value: serde_json::Value },
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaViolation::MissingRequired { path, property } => {
                write!(f, "{path}: missing required property '{property}'")
            }
            SchemaViolation::WrongKind {
                path,
                expected,
                found,
            } => {
                write!(f, "{path}: expected {}, found {found}", expected.as_str())
            }
            SchemaViolation::NotInEnum { path, value } => {
                write!(f, "{path}: value {value} is not in the allowed set")
            }
        }
    }
}
