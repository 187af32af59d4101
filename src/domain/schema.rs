//! Response shapes for schema-constrained generation.
//!
//! A [`ResponseSchema`] plays two roles: it is forwarded to the generative
//! text service as the requested decoding shape, and it validates what the
//! service actually returned. Structured responses are external-boundary
//! values — the service is asked to honor the schema but nothing guarantees
//! it does, so callers validate before trusting a decoded value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scalar and composite types the response schema can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
}

/// Response shape: field names, types and required-ness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, ResponseSchema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ResponseSchema>>,
}

impl ResponseSchema {
    fn leaf(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
            items: None,
        }
    }

    /// An object schema with no properties yet.
    pub fn object() -> Self {
        Self::leaf(SchemaType::Object)
    }

    /// A string field.
    pub fn string() -> Self {
        Self::leaf(SchemaType::String)
    }

    /// A number field.
    pub fn number() -> Self {
        Self::leaf(SchemaType::Number)
    }

    /// An integer field.
    pub fn integer() -> Self {
        Self::leaf(SchemaType::Integer)
    }

    /// A boolean field.
    pub fn boolean() -> Self {
        Self::leaf(SchemaType::Boolean)
    }

    /// An array of `items`.
    pub fn array(items: ResponseSchema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::leaf(SchemaType::Array)
        }
    }

    /// Attaches a description (forwarded to the service as decoding guidance).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an optional property to an object schema.
    pub fn with_property(mut self, name: impl Into<String>, schema: ResponseSchema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Adds a required property to an object schema.
    pub fn with_required_property(
        mut self,
        name: impl Into<String>,
        schema: ResponseSchema,
    ) -> Self {
        let name = name.into();
        self.required.push(name.clone());
        self.properties.insert(name, schema);
        self
    }

    /// Validates a decoded value against this schema.
    ///
    /// Required fields must be present; every present, known field must have
    /// the declared type. Unknown fields are tolerated (the service may add
    /// them), absent optional fields are fine, but explicit nulls are not a
    /// substitute for a typed value.
    pub fn validate(&self, value: &serde_json::Value) -> Result<(), SchemaViolation> {
        self.validate_at(value, "$")
    }

    fn validate_at(&self, value: &serde_json::Value, path: &str) -> Result<(), SchemaViolation> {
        use serde_json::Value;

        let mismatch = |found: &Value| SchemaViolation::TypeMismatch {
            path: path.to_string(),
            expected: self.schema_type,
            found: type_name(found).to_string(),
        };

        match self.schema_type {
            SchemaType::Object => {
                let Value::Object(map) = value else {
                    return Err(mismatch(value));
                };
                for name in &self.required {
                    if !map.contains_key(name) {
                        return Err(SchemaViolation::MissingField {
                            path: format!("{path}.{name}"),
                        });
                    }
                }
                for (name, property) in &self.properties {
                    if let Some(field) = map.get(name) {
                        property.validate_at(field, &format!("{path}.{name}"))?;
                    }
                }
                Ok(())
            }
            SchemaType::Array => {
                let Value::Array(elements) = value else {
                    return Err(mismatch(value));
                };
                if let Some(items) = &self.items {
                    for (i, element) in elements.iter().enumerate() {
                        items.validate_at(element, &format!("{path}[{i}]"))?;
                    }
                }
                Ok(())
            }
            SchemaType::String if value.is_string() => Ok(()),
            SchemaType::Number if value.is_number() => Ok(()),
            SchemaType::Integer if value.is_i64() || value.is_u64() => Ok(()),
            SchemaType::Boolean if value.is_boolean() => Ok(()),
            _ => Err(mismatch(value)),
        }
    }
}

fn type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A structured response that does not honor the requested shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaViolation {
    #[error("missing required field at {path}")]
    MissingField { path: String },

    #[error("type mismatch at {path}: expected {expected:?}, found {found}")]
    TypeMismatch {
        path: String,
        expected: SchemaType,
        found: String,
    },
}
