//! Collection store backed by a directory of JSON files.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;
use tracing::debug;

use crate::error::StoreError;
use crate::ports::store::{CollectionStore, Page, Query, StoreFuture};

/// Stores each collection as a JSON array in `<dir>/<collection>.json`.
///
/// A missing file reads as an empty collection; the directory and file are
/// created on first write.
pub struct FileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Creates a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), write_lock: Mutex::new(()) }
    }

    /// Directory holding the collection files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    fn load(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let path = self.path(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&path)?;
        serde_json::from_str(&contents)
            .map_err(|e| StoreError::Decode(format!("{}: {e}", path.display())))
    }

    fn save(&self, collection: &str, items: &[Value]) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(items)
            .map_err(|e| StoreError::Decode(format!("{collection}: {e}")))?;
        std::fs::write(self.path(collection), json)?;
        Ok(())
    }

    fn modify<F>(&self, collection: &str, op: F) -> Result<Value, StoreError>
    where
        F: FnOnce(&mut Vec<Value>) -> Result<Value, StoreError>,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut items = self.load(collection)?;
        let record = op(&mut items)?;
        self.save(collection, &items)?;
        debug!(collection, path = %self.path(collection).display(), "collection written");
        Ok(record)
    }
}

impl CollectionStore for FileStore {
    fn get_all<'a>(&'a self, collection: &'a str, query: &'a Query) -> StoreFuture<'a, Page> {
        Box::pin(async move { Ok(super::page(&self.load(collection)?, query)) })
    }

    fn get_by_id<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
    ) -> StoreFuture<'a, Option<Value>> {
        Box::pin(async move { Ok(super::find(&self.load(collection)?, id)) })
    }

    fn update<'a>(&'a self, collection: &'a str, record: Value) -> StoreFuture<'a, Value> {
        Box::pin(async move {
            self.modify(collection, |items| super::update(collection, items, record))
        })
    }

    fn create<'a>(&'a self, collection: &'a str, record: Value) -> StoreFuture<'a, Value> {
        Box::pin(async move {
            self.modify(collection, |items| super::insert(collection, items, record))
        })
    }
}
