//! Document store port - keyed read/update of project records.
//!
//! The persistence engine is an external collaborator with merge-by-field
//! update semantics. It rejects the "absent" sentinel ([`StoreValue::Undefined`])
//! but accepts explicit nulls; consumers run patches through the store
//! sanitizer before calling [`ProjectStore::update`] so a document's shape
//! stays stable across writes (visible gaps instead of invisible ones).

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::domain::foundation::{ProjectId, Timestamp};
use crate::domain::project::Project;

/// Value tree accepted at the persistence boundary.
///
/// `Undefined` models a value that was never provided (a collapsed
/// `Option::None`); it is producible by collection sites but rejected by the
/// store itself. `Null` is an explicit, persistable gap.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Timestamp(Timestamp),
    Array(Vec<StoreValue>),
    Map(BTreeMap<String, StoreValue>),
}

impl StoreValue {
    /// True if an `Undefined` occurs anywhere in the tree.
    pub fn contains_undefined(&self) -> bool {
        match self {
            StoreValue::Undefined => true,
            StoreValue::Array(items) => items.iter().any(StoreValue::contains_undefined),
            StoreValue::Map(entries) => entries.values().any(StoreValue::contains_undefined),
            _ => false,
        }
    }

    /// Converts a JSON value into a store value. JSON has no absent sentinel,
    /// so the result never contains `Undefined`.
    pub fn from_json(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => StoreValue::Null,
            Value::Bool(b) => StoreValue::Bool(b),
            Value::Number(n) => StoreValue::Number(n.as_f64().unwrap_or(0.0)),
            Value::String(s) => StoreValue::Text(s),
            Value::Array(items) => {
                StoreValue::Array(items.into_iter().map(StoreValue::from_json).collect())
            }
            Value::Object(map) => StoreValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, StoreValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Converts to JSON for the underlying engine. Fails if an `Undefined`
    /// survived (the patch was not sanitized).
    pub fn into_json(self) -> Result<serde_json::Value, StoreError> {
        use serde_json::Value;
        match self {
            StoreValue::Undefined => Err(StoreError::UndefinedValue),
            StoreValue::Null => Ok(Value::Null),
            StoreValue::Bool(b) => Ok(Value::Bool(b)),
            StoreValue::Number(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .ok_or(StoreError::UnrepresentableNumber(n)),
            StoreValue::Text(s) => Ok(Value::String(s)),
            StoreValue::Timestamp(ts) => Ok(Value::String(ts.as_datetime().to_rfc3339())),
            StoreValue::Array(items) => Ok(Value::Array(
                items
                    .into_iter()
                    .map(StoreValue::into_json)
                    .collect::<Result<_, _>>()?,
            )),
            StoreValue::Map(entries) => {
                let mut map = serde_json::Map::new();
                for (key, value) in entries {
                    map.insert(key, value.into_json()?);
                }
                Ok(Value::Object(map))
            }
        }
    }
}

impl From<&str> for StoreValue {
    fn from(value: &str) -> Self {
        StoreValue::Text(value.to_string())
    }
}

impl From<String> for StoreValue {
    fn from(value: String) -> Self {
        StoreValue::Text(value)
    }
}

impl From<bool> for StoreValue {
    fn from(value: bool) -> Self {
        StoreValue::Bool(value)
    }
}

impl From<f64> for StoreValue {
    fn from(value: f64) -> Self {
        StoreValue::Number(value)
    }
}

impl From<u8> for StoreValue {
    fn from(value: u8) -> Self {
        StoreValue::Number(f64::from(value))
    }
}

impl From<Timestamp> for StoreValue {
    fn from(value: Timestamp) -> Self {
        StoreValue::Timestamp(value)
    }
}

impl<T: Into<StoreValue>> From<Option<T>> for StoreValue {
    /// `None` collapses to `Undefined`, NOT `Null`: the distinction between
    /// "never provided" and "explicitly empty" is what the sanitizer
    /// normalizes at the boundary.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => StoreValue::Undefined,
        }
    }
}

/// A merge-by-field patch: top-level field name -> new value.
pub type FieldPatch = BTreeMap<String, StoreValue>;

/// Document store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("project not found")]
    NotFound,

    #[error("patch contains an undefined value; sanitize before update")]
    UndefinedValue,

    #[error("number {0} is not representable in the store")]
    UnrepresentableNumber(f64),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Port for keyed read/update of project records.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Loads a project by id.
    async fn find(&self, id: &ProjectId) -> Result<Option<Project>, StoreError>;

    /// Creates or fully replaces a project record.
    async fn save(&self, project: &Project) -> Result<(), StoreError>;

    /// Merges the given top-level fields into an existing record.
    ///
    /// Nested values are replaced wholesale; finer-grained merging (e.g. the
    /// plan's section-wise merge) happens in the domain before the patch is
    /// built. Rejects patches containing `Undefined`.
    async fn update(&self, id: &ProjectId, patch: FieldPatch) -> Result<(), StoreError>;
}
