//! Replaying adapter for the `CollectionStore` port.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{next_output, replay_result, SharedReplayer};
use crate::error::StoreError;
use crate::ports::store::{CollectionStore, Page, Query, StoreFuture};

/// Serves recorded store results. Arguments are not compared.
pub struct ReplayingStore {
    replayer: SharedReplayer,
}

impl ReplayingStore {
    /// Creates a store reading from `replayer`.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer }
    }

    fn serve<T: DeserializeOwned>(&self, method: &str) -> Result<T, StoreError> {
        replay_result(method, next_output(&self.replayer, "store", method))
    }
}

impl CollectionStore for ReplayingStore {
    fn get_all<'a>(&'a self, _collection: &'a str, _query: &'a Query) -> StoreFuture<'a, Page> {
        Box::pin(async move { self.serve("get_all") })
    }

    fn get_by_id<'a>(
        &'a self,
        _collection: &'a str,
        _id: &'a str,
    ) -> StoreFuture<'a, Option<Value>> {
        Box::pin(async move { self.serve("get_by_id") })
    }

    fn update<'a>(&'a self, _collection: &'a str, _record: Value) -> StoreFuture<'a, Value> {
        Box::pin(async move { self.serve("update") })
    }

    fn create<'a>(&'a self, _collection: &'a str, _record: Value) -> StoreFuture<'a, Value> {
        Box::pin(async move { self.serve("create") })
    }
}
