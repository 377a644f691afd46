//! Collection store port for schema-flexible CRUD access.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;

/// Boxed future type alias used by [`CollectionStore`] to keep the trait dyn-compatible.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Paging options for a bulk read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Maximum number of records returned.
    pub limit: usize,
    /// Number of records skipped before the first returned one.
    pub skip: usize,
}

impl Query {
    /// A first-page query capped at `limit` records.
    #[must_use]
    pub fn limit(limit: usize) -> Self {
        Self { limit, skip: 0 }
    }
}

/// One page of records returned by a bulk read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Records in store order.
    pub items: Vec<Value>,
}

/// Generic CRUD access to named collections of JSON records.
///
/// Records are JSON objects carrying their identifier in `_id`. The store
/// guarantees atomic single-record reads and writes but nothing across
/// records or collections.
pub trait CollectionStore: Send + Sync {
    /// Reads up to `query.limit` records from `collection`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be read.
    fn get_all<'a>(&'a self, collection: &'a str, query: &'a Query) -> StoreFuture<'a, Page>;

    /// Reads one record by id, returning `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails.
    fn get_by_id<'a>(&'a self, collection: &'a str, id: &'a str)
        -> StoreFuture<'a, Option<Value>>;

    /// Merges the fields of `record` into the stored record with the same `_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is missing or cannot be written.
    fn update<'a>(&'a self, collection: &'a str, record: Value) -> StoreFuture<'a, Value>;

    /// Inserts `record`, assigning an `_id` when it has none.
    ///
    /// # Errors
    ///
    /// Returns an error if a record with the same id exists or the write fails.
    fn create<'a>(&'a self, collection: &'a str, record: Value) -> StoreFuture<'a, Value>;
}

impl<S: CollectionStore + ?Sized> CollectionStore for Arc<S> {
    fn get_all<'a>(&'a self, collection: &'a str, query: &'a Query) -> StoreFuture<'a, Page> {
        (**self).get_all(collection, query)
    }

    fn get_by_id<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
    ) -> StoreFuture<'a, Option<Value>> {
        (**self).get_by_id(collection, id)
    }

    fn update<'a>(&'a self, collection: &'a str, record: Value) -> StoreFuture<'a, Value> {
        (**self).update(collection, record)
    }

    fn create<'a>(&'a self, collection: &'a str, record: Value) -> StoreFuture<'a, Value> {
        (**self).create(collection, record)
    }
}

/// Returns the `_id` of a record, if it has a string one.
#[must_use]
pub fn record_id(record: &Value) -> Option<&str> {
    record.get("_id").and_then(Value::as_str)
}
