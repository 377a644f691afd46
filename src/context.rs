//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::adapters::live::{HttpStore, LiveClock};
use crate::adapters::local::FileStore;
use crate::adapters::recording::{RecordingClock, RecordingStore, SharedRecorder};
use crate::adapters::replaying::{ReplayingClock, ReplayingStore};
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Config;
use crate::ports::clock::Clock;
use crate::ports::store::CollectionStore;

/// Bundles the ports one session talks through.
///
/// Constructors wire different adapters (live, recording, replaying); code
/// that uses the context never knows which.
pub struct ServiceContext {
    /// Clock for completion timestamps.
    pub clock: Box<dyn Clock>,
    /// Store holding tasks, progress, guidance, and universities.
    pub store: Box<dyn CollectionStore>,
    /// Optional cassette recorder; written to disk on drop.
    recorder: Option<SharedRecorder>,
}

impl ServiceContext {
    /// Creates a context from explicit ports.
    #[must_use]
    pub fn new(clock: Box<dyn Clock>, store: Box<dyn CollectionStore>) -> Self {
        Self { clock, store, recorder: None }
    }

    /// Creates a live context: the system clock plus the configured store.
    ///
    /// The HTTP store is used when a store URL is configured, the JSON
    /// directory store otherwise.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        Self::new(Box::new(LiveClock), live_store(config))
    }

    /// Creates the live context, recording it when `WAYPOINT_RECORD` is set.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        match &config.record_path {
            Some(path) => Self::recording(Box::new(LiveClock), live_store(config), path),
            None => Self::live(config),
        }
    }

    /// Wraps `clock` and `store` so every call is recorded to `path`.
    ///
    /// The cassette is written when the context is dropped.
    #[must_use]
    pub fn recording(clock: Box<dyn Clock>, store: Box<dyn CollectionStore>, path: &Path) -> Self {
        let name = path
            .file_stem()
            .map_or_else(
                || "waypoint-session".to_string(),
                |stem| stem.to_string_lossy().trim_end_matches(".cassette").to_string(),
            );
        let recorder: SharedRecorder = Arc::new(Mutex::new(CassetteRecorder::new(path, name)));
        Self {
            clock: Box::new(RecordingClock::new(clock, Arc::clone(&recorder))),
            store: Box::new(RecordingStore::new(store, Arc::clone(&recorder))),
            recorder: Some(recorder),
        }
    }

    /// Creates a context whose ports are served from one cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        let replayer = Arc::new(Mutex::new(CassetteReplayer::new(&cassette)));
        Ok(Self::new(
            Box::new(ReplayingClock::new(Arc::clone(&replayer))),
            Box::new(ReplayingStore::new(replayer)),
        ))
    }
}

fn live_store(config: &Config) -> Box<dyn CollectionStore> {
    match &config.store_url {
        Some(url) => {
            info!(url = %url, "using HTTP collection store");
            Box::new(HttpStore::new(url, config.store_token.clone()))
        }
        None => {
            info!(dir = %config.data_dir.display(), "using JSON directory store");
            Box::new(FileStore::new(&config.data_dir))
        }
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        let recorder = recorder.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if recorder.is_empty() {
            debug!("nothing recorded; no cassette written");
            return;
        }
        match recorder.write() {
            Ok(path) => {
                info!(path = %path.display(), interactions = recorder.len(), "cassette written");
            }
            Err(e) => warn!(error = %e, "failed to write cassette"),
        }
    }
}
