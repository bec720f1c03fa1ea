//! The handle a host holds: one store, its reference data cache and the
//! progress, history and search bookkeeping built on top of it.

use std::sync::Arc;

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::app_response::AppResponse;
use crate::config::StoreConfig;
use crate::content_model::{HadithPage, SearchResult, VerseRecord};
use crate::corpus::ContentCache;
use crate::generation::{SearchGenerations, SearchTicket};
use crate::local_db_state::AppDbState;
use crate::progress::ProgressTracker;
use crate::progress_model::UserMode;
use crate::search::{HadithSearchOptions, SearchOptions};
use crate::search_history::RecentSearches;
use crate::storage::{DocumentStorage, MemoryStorage};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseSearchResponse {
    pub generation: u64,
    /// A newer search was issued before this one finished; `results` is empty.
    pub superseded: bool,
    pub results: Vec<SearchResult<VerseRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HadithSearchResponse {
    pub generation: u64,
    pub superseded: bool,
    pub page: HadithPage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct CompanionState {
    config: StoreConfig,
    storage: Arc<dyn DocumentStorage>,
    db: Option<Arc<AppDbState>>,
    content: ContentCache,
    progress: ProgressTracker,
    recent: RecentSearches,
    generations: SearchGenerations,
}

impl CompanionState {
    /// Opens the store described by `config`, backed by LMDB unless
    /// `config.in_memory` is set.
    pub fn open(config: StoreConfig) -> Result<Self, AppResponse> {
        config.validate()?;
        if config.in_memory {
            return Ok(Self::with_storage(config, Arc::new(MemoryStorage::new())));
        }

        let db = Arc::new(AppDbState::init(&config.name, config.map_size_bytes())?);
        let storage: Arc<dyn DocumentStorage> = db.clone();
        let mut state = Self::with_storage(config, storage);
        state.db = Some(db);
        Ok(state)
    }

    pub fn in_memory() -> Self {
        Self::with_storage(StoreConfig::in_memory(), Arc::new(MemoryStorage::new()))
    }

    /// Builds a state over any storage backend, seeded with the built-in corpus.
    pub fn with_storage(config: StoreConfig, storage: Arc<dyn DocumentStorage>) -> Self {
        let progress = ProgressTracker::new(storage.clone(), config.progress_key.clone(), config.history_days);
        let recent = RecentSearches::new(
            storage.clone(),
            config.search_history_key.clone(),
            config.recent_search_limit,
        );

        Self {
            storage,
            db: None,
            content: ContentCache::with_fallback(),
            progress,
            recent,
            generations: SearchGenerations::new(),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn content(&self) -> &ContentCache {
        &self.content
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn recent_searches(&self) -> &RecentSearches {
        &self.recent
    }

    pub fn generations(&self) -> &SearchGenerations {
        &self.generations
    }

    pub fn default_verse_options(&self) -> SearchOptions {
        SearchOptions {
            limit: self.config.verse_search_limit,
            ..SearchOptions::default()
        }
    }

    pub fn default_hadith_options(&self) -> HadithSearchOptions {
        HadithSearchOptions {
            limit: self.config.hadith_page_size,
            ..HadithSearchOptions::default()
        }
    }

    /// Runs a verse search under a fresh ticket and records the query in the
    /// recent-search history.
    pub fn search_quran(&self, query: &str, options: &SearchOptions) -> VerseSearchResponse {
        self.search_quran_under(self.generations.issue(), query, options)
    }

    pub(crate) fn search_quran_under(
        &self,
        ticket: SearchTicket,
        query: &str,
        options: &SearchOptions,
    ) -> VerseSearchResponse {
        let results = self.content.search_verses(query, options);
        if !query.trim().is_empty() {
            self.recent.push(query);
        }

        let (superseded, results) = match self.generations.settle(ticket, results) {
            Some(results) => (false, results),
            None => (true, Vec::new()),
        };
        VerseSearchResponse {
            generation: ticket.generation(),
            superseded,
            results,
            error: None,
        }
    }

    /// Runs a hadith search under a fresh ticket. Books that are not loaded
    /// produce an empty page and an error message, not a failure.
    pub fn search_hadith(&self, query: &str, options: &HadithSearchOptions) -> HadithSearchResponse {
        self.search_hadith_under(self.generations.issue(), query, options)
    }

    pub(crate) fn search_hadith_under(
        &self,
        ticket: SearchTicket,
        query: &str,
        options: &HadithSearchOptions,
    ) -> HadithSearchResponse {
        let (page, error) = match self.content.search_hadiths(query, options) {
            Ok(page) => {
                if !query.trim().is_empty() {
                    self.recent.push(query);
                }
                (page, None)
            }
            Err(e) => {
                warn!("Hadith search for '{}' failed: {e}", query.trim());
                (HadithPage::empty(), Some(e.to_string()))
            }
        };

        let (superseded, page) = match self.generations.settle(ticket, page) {
            Some(page) => (false, page),
            None => (true, HadithPage::empty()),
        };
        HadithSearchResponse {
            generation: ticket.generation(),
            superseded,
            page,
            error,
        }
    }

    pub fn user_mode(&self) -> Option<UserMode> {
        let key = &self.config.user_mode_key;
        match self.storage.load(key) {
            Ok(Some(document)) => match serde_json::from_str::<UserMode>(&document) {
                Ok(mode) => Some(mode),
                // the web client stored the bare word
                Err(_) => document.parse().ok(),
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Could not load user mode: {e}");
                None
            }
        }
    }

    pub fn set_user_mode(&self, mode: UserMode) -> Result<(), AppResponse> {
        let document = serde_json::to_string(&mode)?;
        self.storage.save(&self.config.user_mode_key, &document)?;
        info!("User mode set to {mode}");
        Ok(())
    }

    /// Syncs the LMDB environment, if any, ahead of the handle being dropped.
    pub fn close(&self) -> Result<(), AppResponse> {
        match &self.db {
            Some(db) => db.close_database(),
            None => Ok(()),
        }
    }
}

/// Layers the fields present in `request` over `defaults`.
pub fn merge_request<T>(defaults: &T, request: &JsonValue) -> Result<T, AppResponse>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = serde_json::to_value(defaults)?;
    if let (Some(target), Some(overrides)) = (merged.as_object_mut(), request.as_object()) {
        for (field, value) in overrides {
            if target.contains_key(field) {
                target.insert(field.clone(), value.clone());
            }
        }
    }
    Ok(serde_json::from_value(merged)?)
}
