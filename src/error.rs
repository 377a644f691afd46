//! Error types for store access, task tracking, and configuration.

use thiserror::Error;

/// Errors raised by a `CollectionStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this id exists in the collection.
    #[error("record {id} not found in {collection}")]
    NotFound {
        /// Collection that was queried.
        collection: String,
        /// Requested record id.
        id: String,
    },

    /// A record with this id already exists in the collection.
    #[error("record {id} already exists in {collection}")]
    Conflict {
        /// Collection that was written.
        collection: String,
        /// Conflicting record id.
        id: String,
    },

    /// The remote store answered with a non-success status.
    #[error("store returned status {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body or error message.
        message: String,
    },

    /// The request never produced a response.
    #[error("store request failed: {0}")]
    Transport(String),

    /// A payload could not be encoded or decoded.
    #[error("invalid store payload: {0}")]
    Decode(String),

    /// Local I/O failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error captured in a cassette and served again on replay.
    #[error("{0}")]
    Replayed(String),
}

impl StoreError {
    /// Returns true when the error only says the record does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Http { status: 404, .. })
    }
}

/// Errors raised while loading or mutating the task board.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// One of the bulk reads failed; the board was left empty.
    #[error("failed to load {collection}: {source}")]
    Fetch {
        /// Collection whose read failed.
        collection: &'static str,
        /// Underlying store error.
        #[source]
        source: StoreError,
    },

    /// The task id is not on the board.
    #[error("unknown task: {0}")]
    UnknownTask(String),

    /// Writing the progress record failed; the board was reloaded.
    #[error("failed to save progress for task {task_id}: {source}")]
    Write {
        /// Task whose toggle failed.
        task_id: String,
        /// Underlying store error.
        #[source]
        source: StoreError,
    },
}

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment value could not be parsed.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}
