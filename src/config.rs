//! Store configuration.
//!
//! Hosts pass a [`StoreConfig`] as JSON to `create_store_with_config`; every
//! field is optional and falls back to the defaults below, which match the
//! keys the web client has always used for its local storage.

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;

pub const DEFAULT_STORE_NAME: &str = "deen_companion";
pub const PROGRESS_KEY: &str = "quran-user-progress";
pub const SEARCH_HISTORY_KEY: &str = "quran-search-history";
pub const USER_MODE_KEY: &str = "user-mode";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store name; the LMDB environment lives in `<name>.lmdb`.
    pub name: String,
    /// Keep everything in memory instead of opening an LMDB environment.
    pub in_memory: bool,
    pub map_size_mb: usize,
    pub progress_key: String,
    pub search_history_key: String,
    pub user_mode_key: String,
    /// Number of distinct days kept in the read history.
    pub history_days: usize,
    pub recent_search_limit: usize,
    pub verse_search_limit: usize,
    pub hadith_page_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_STORE_NAME.to_string(),
            in_memory: false,
            map_size_mb: 16,
            progress_key: PROGRESS_KEY.to_string(),
            search_history_key: SEARCH_HISTORY_KEY.to_string(),
            user_mode_key: USER_MODE_KEY.to_string(),
            history_days: 30,
            recent_search_limit: 10,
            verse_search_limit: 20,
            hadith_page_size: 10,
        }
    }
}

impl StoreConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn in_memory() -> Self {
        Self {
            in_memory: true,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, AppResponse> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppResponse> {
        if !self.in_memory && self.name.trim().is_empty() {
            return Err(AppResponse::ValidationError("Store name cannot be empty".to_string()));
        }

        let keys = [
            ("progress_key", &self.progress_key),
            ("search_history_key", &self.search_history_key),
            ("user_mode_key", &self.user_mode_key),
        ];
        for (field, value) in keys {
            if value.trim().is_empty() {
                return Err(AppResponse::ValidationError(format!("{field} cannot be empty")));
            }
        }

        let limits = [
            ("map_size_mb", self.map_size_mb),
            ("history_days", self.history_days),
            ("recent_search_limit", self.recent_search_limit),
            ("verse_search_limit", self.verse_search_limit),
            ("hadith_page_size", self.hadith_page_size),
        ];
        for (field, value) in limits {
            if value == 0 {
                return Err(AppResponse::ValidationError(format!("{field} must be greater than zero")));
            }
        }

        Ok(())
    }

    pub fn lmdb_dir(&self) -> String {
        format!("{}.lmdb", self.name)
    }

    pub fn map_size_bytes(&self) -> usize {
        self.map_size_mb.saturating_mul(1024 * 1024)
    }
}
