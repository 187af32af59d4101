//! In-memory project store.
//!
//! Backs the [`ProjectStore`] port for tests and single-process use. Records
//! are held as JSON documents to mirror the real engine's behavior: `save`
//! replaces the record, `update` merges top-level fields, and any patch that
//! still carries an `Undefined` is rejected (the caller forgot to sanitize).

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::ProjectId;
use crate::domain::project::Project;
use crate::ports::{FieldPatch, ProjectStore, StoreError, StoreValue};

/// In-memory, merge-by-field document store.
#[derive(Debug, Default)]
pub struct InMemoryProjectStore {
    records: Mutex<HashMap<ProjectId, serde_json::Value>>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw stored document, for assertions in tests.
    pub fn raw(&self, id: &ProjectId) -> Option<serde_json::Value> {
        self.records.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn find(&self, id: &ProjectId) -> Result<Option<Project>, StoreError> {
        let records = self.records.lock().unwrap();
        match records.get(id) {
            Some(doc) => serde_json::from_value(doc.clone())
                .map(Some)
                .map_err(|e| StoreError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    async fn save(&self, project: &Project) -> Result<(), StoreError> {
        let doc = serde_json::to_value(project)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.records.lock().unwrap().insert(project.id, doc);
        Ok(())
    }

    async fn update(&self, id: &ProjectId, patch: FieldPatch) -> Result<(), StoreError> {
        // Reject unsanitized patches before touching the record: a partial
        // merge would leave the document in a mixed state.
        for value in patch.values() {
            if value.contains_undefined() {
                return Err(StoreError::UndefinedValue);
            }
        }

        let mut records = self.records.lock().unwrap();
        let doc = records.get_mut(id).ok_or(StoreError::NotFound)?;
        let serde_json::Value::Object(fields) = doc else {
            return Err(StoreError::Serialization(
                "stored record is not a document".to_string(),
            ));
        };

        for (field, value) in patch {
            fields.insert(field, value.into_json()?);
        }
        Ok(())
    }
}
