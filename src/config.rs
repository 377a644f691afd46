//! Runtime configuration read from the environment.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::ConfigError;

/// Default bulk-read cap per collection.
pub const DEFAULT_PAGE_LIMIT: usize = 100;
/// Default directory of the JSON store.
pub const DEFAULT_DATA_DIR: &str = ".waypoint/data";

/// Settings for one `waypoint` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the HTTP collection store; `None` selects the JSON directory store.
    pub store_url: Option<String>,
    /// Bearer token sent to the HTTP store.
    pub store_token: Option<String>,
    /// Directory of the JSON store.
    pub data_dir: PathBuf,
    /// Default current user.
    pub user_id: Option<String>,
    /// Bulk-read cap per collection.
    pub page_limit: usize,
    /// Cassette path to record this session to.
    pub record_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: None,
            store_token: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            user_id: None,
            page_limit: DEFAULT_PAGE_LIMIT,
            record_path: None,
        }
    }
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unusable value.
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => info!(path = %path.display(), "loaded .env"),
            Err(e) => debug!(error = %e, "no .env loaded"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if `WAYPOINT_PAGE_LIMIT` is not a positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let page_limit = match var("WAYPOINT_PAGE_LIMIT") {
            Some(raw) => parse_page_limit(&raw)?,
            None => defaults.page_limit,
        };

        Ok(Self {
            store_url: var("WAYPOINT_STORE_URL"),
            store_token: var("WAYPOINT_STORE_TOKEN"),
            data_dir: var("WAYPOINT_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            user_id: var("WAYPOINT_USER_ID"),
            page_limit,
            record_path: var("WAYPOINT_RECORD").map(PathBuf::from),
        })
    }
}

fn parse_page_limit(raw: &str) -> Result<usize, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        key: "WAYPOINT_PAGE_LIMIT",
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    match raw.parse::<usize>() {
        Ok(0) => Err(invalid("must be at least 1")),
        Ok(limit) => Ok(limit),
        Err(e) => Err(invalid(&e.to_string())),
    }
}
