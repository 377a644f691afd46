//! In-memory collection store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::Value;

use crate::error::StoreError;
use crate::ports::store::{CollectionStore, Page, Query, StoreFuture};

/// Collection store held entirely in memory.
///
/// Reads and writes can be made to fail on demand, and both are counted,
/// so callers can observe recovery behavior without a real backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<String, Vec<Value>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `collection` with `items`, replacing its current contents.
    #[must_use]
    pub fn with_collection(self, collection: &str, items: Vec<Value>) -> Self {
        self.lock().insert(collection.to_string(), items);
        self
    }

    /// Makes every subsequent read fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current contents of `collection`.
    #[must_use]
    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.lock().get(collection).cloned().unwrap_or_default()
    }

    /// Number of read calls served so far, failed ones included.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of write calls served so far, failed ones included.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Vec<Value>>> {
        self.collections.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn begin_read(&self) -> Result<(), StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("injected read failure".into()));
        }
        Ok(())
    }

    fn begin_write(&self) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("injected write failure".into()));
        }
        Ok(())
    }
}

impl CollectionStore for MemoryStore {
    fn get_all<'a>(&'a self, collection: &'a str, query: &'a Query) -> StoreFuture<'a, Page> {
        Box::pin(async move {
            self.begin_read()?;
            Ok(self.lock().get(collection).map(|items| super::page(items, query)).unwrap_or_default())
        })
    }

    fn get_by_id<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
    ) -> StoreFuture<'a, Option<Value>> {
        Box::pin(async move {
            self.begin_read()?;
            Ok(self.lock().get(collection).and_then(|items| super::find(items, id)))
        })
    }

    fn update<'a>(&'a self, collection: &'a str, record: Value) -> StoreFuture<'a, Value> {
        Box::pin(async move {
            self.begin_write()?;
            let mut collections = self.lock();
            let items = collections.entry(collection.to_string()).or_default();
            super::update(collection, items, record)
        })
    }

    fn create<'a>(&'a self, collection: &'a str, record: Value) -> StoreFuture<'a, Value> {
        Box::pin(async move {
            self.begin_write()?;
            let mut collections = self.lock();
            let items = collections.entry(collection.to_string()).or_default();
            super::insert(collection, items, record)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn create_then_get_by_id() {
        let store = MemoryStore::new();
        store.create("things", json!({"_id": "a", "n": 1})).await.unwrap();

        let found = store.get_by_id("things", "a").await.unwrap();
        assert_eq!(found, Some(json!({"_id": "a", "n": 1})));
        assert_eq!(store.get_by_id("things", "b").await.unwrap(), None);
        assert_eq!(store.get_by_id("missing", "a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn unknown_collection_reads_empty() {
        let store = MemoryStore::new();
        let page = store.get_all("nothing", &Query::limit(10)).await.unwrap();
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn injected_write_failure_leaves_data_untouched() {
        let store = MemoryStore::new().with_collection("things", vec![json!({"_id": "a"})]);
        store.set_fail_writes(true);

        let result = store.update("things", json!({"_id": "a", "n": 2})).await;
        assert!(matches!(result, Err(StoreError::Transport(_))));
        assert_eq!(store.records("things"), vec![json!({"_id": "a"})]);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn injected_read_failure_is_counted() {
        let store = MemoryStore::new();
        store.set_fail_reads(true);
        assert!(store.get_all("things", &Query::limit(1)).await.is_err());
        assert_eq!(store.read_count(), 1);
    }
}
