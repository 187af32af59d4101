//! Store sanitizer - normalizes value trees before persistence.
//!
//! The persistence engine rejects the "absent" sentinel but accepts explicit
//! nulls, and the system prefers explicit nulls (visible gaps) over field
//! omission (invisible gaps) so a document's shape is stable across writes.

use crate::ports::{FieldPatch, StoreValue};

/// Recursively rewrites `Undefined` to `Null`.
///
/// Arrays are mapped element-wise, maps key-wise; every other value,
/// timestamps included, passes through unchanged. Idempotent: sanitizing a
/// sanitized tree is a no-op.
pub fn sanitize(value: StoreValue) -> StoreValue {
    match value {
        StoreValue::Undefined => StoreValue::Null,
        StoreValue::Array(items) => StoreValue::Array(items.into_iter().map(sanitize).collect()),
        StoreValue::Map(entries) => StoreValue::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key, sanitize(value)))
                .collect(),
        ),
        other => other,
    }
}

/// Sanitizes every field of a merge patch.
pub fn sanitize_fields(patch: FieldPatch) -> FieldPatch {
    patch
        .into_iter()
        .map(|(field, value)| (field, sanitize(value)))
        .collect()
}
