//! Local `CollectionStore` adapters: in-memory and JSON directory.
//!
//! Both keep each collection as a `Vec` of JSON objects and share the
//! record operations below, so they agree on paging, merge, and id rules.

pub mod file;
pub mod memory;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::StoreError;
use crate::ports::store::{record_id, Page, Query};

pub use file::FileStore;
pub use memory::MemoryStore;

fn page(items: &[Value], query: &Query) -> Page {
    Page { items: items.iter().skip(query.skip).take(query.limit).cloned().collect() }
}

fn find(items: &[Value], id: &str) -> Option<Value> {
    items.iter().find(|item| record_id(item) == Some(id)).cloned()
}

fn as_object(collection: &str, record: Value) -> Result<Map<String, Value>, StoreError> {
    match record {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Decode(format!("{collection} records must be objects, got {other}"))),
    }
}

/// Shallow-merges `patch` into the record with the same `_id`.
fn update(collection: &str, items: &mut [Value], patch: Value) -> Result<Value, StoreError> {
    let patch = as_object(collection, patch)?;
    let id = patch
        .get("_id")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Decode(format!("{collection} update is missing _id")))?
        .to_string();

    let target = items
        .iter_mut()
        .find(|item| record_id(item) == Some(id.as_str()))
        .ok_or_else(|| StoreError::NotFound { collection: collection.to_string(), id: id.clone() })?;

    if let Value::Object(existing) = target {
        existing.extend(patch);
    }
    Ok(target.clone())
}

/// Appends `record`, assigning a fresh `_id` when it has none.
fn insert(collection: &str, items: &mut Vec<Value>, record: Value) -> Result<Value, StoreError> {
    let mut record = as_object(collection, record)?;
    let id = match record.get("_id").and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => {
            let id = Uuid::new_v4().to_string();
            record.insert("_id".into(), Value::String(id.clone()));
            id
        }
    };

    if items.iter().any(|item| record_id(item) == Some(id.as_str())) {
        return Err(StoreError::Conflict { collection: collection.to_string(), id });
    }

    let record = Value::Object(record);
    items.push(record.clone());
    Ok(record)
}
