//! Recording adapter for the `CollectionStore` port.

use serde_json::{json, Value};

use super::{record_result, SharedRecorder};
use crate::ports::store::{CollectionStore, Page, Query, StoreFuture};

/// Records store calls and their results while delegating to an inner store.
pub struct RecordingStore {
    inner: Box<dyn CollectionStore>,
    recorder: SharedRecorder,
}

impl RecordingStore {
    /// Wraps `inner`, appending every call to `recorder`.
    pub fn new(inner: Box<dyn CollectionStore>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl CollectionStore for RecordingStore {
    fn get_all<'a>(&'a self, collection: &'a str, query: &'a Query) -> StoreFuture<'a, Page> {
        Box::pin(async move {
            let result = self.inner.get_all(collection, query).await;
            let input = json!({ "collection": collection, "query": query });
            record_result(&self.recorder, "store", "get_all", &input, &result);
            result
        })
    }

    fn get_by_id<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
    ) -> StoreFuture<'a, Option<Value>> {
        Box::pin(async move {
            let result = self.inner.get_by_id(collection, id).await;
            let input = json!({ "collection": collection, "id": id });
            record_result(&self.recorder, "store", "get_by_id", &input, &result);
            result
        })
    }

    fn update<'a>(&'a self, collection: &'a str, record: Value) -> StoreFuture<'a, Value> {
        Box::pin(async move {
            let input = json!({ "collection": collection, "record": record });
            let result = self.inner.update(collection, record).await;
            record_result(&self.recorder, "store", "update", &input, &result);
            result
        })
    }

    fn create<'a>(&'a self, collection: &'a str, record: Value) -> StoreFuture<'a, Value> {
        Box::pin(async move {
            let input = json!({ "collection": collection, "record": record });
            let result = self.inner.create(collection, record).await;
            record_result(&self.recorder, "store", "create", &input, &result);
            result
        })
    }
}
