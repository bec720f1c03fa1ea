//! Recent search queries, most recent first.

use std::sync::{Arc, Mutex};

use log::warn;

use crate::storage::DocumentStorage;

pub struct RecentSearches {
    storage: Arc<dyn DocumentStorage>,
    key: String,
    limit: usize,
    write_lock: Mutex<()>,
}

impl RecentSearches {
    pub fn new(storage: Arc<dyn DocumentStorage>, key: impl Into<String>, limit: usize) -> Self {
        Self {
            storage,
            key: key.into(),
            limit,
            write_lock: Mutex::new(()),
        }
    }

    pub fn entries(&self) -> Vec<String> {
        let document = match self.storage.load(&self.key) {
            Ok(Some(document)) => document,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not load search history from '{}': {e}", self.key);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&document) {
            Ok(mut entries) => {
                dedup_front(&mut entries);
                entries.truncate(self.limit);
                entries
            }
            Err(e) => {
                warn!("Stored search history under '{}' is malformed: {e}", self.key);
                Vec::new()
            }
        }
    }

    /// Moves `query` to the front of the history and returns the new list.
    /// Blank queries leave the history untouched.
    pub fn push(&self, query: &str) -> Vec<String> {
        let query = query.trim();
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut entries = self.entries();
        if query.is_empty() {
            return entries;
        }

        entries.retain(|entry| entry != query);
        entries.insert(0, query.to_string());
        entries.truncate(self.limit);
        self.persist(&entries);
        entries
    }

    pub fn clear(&self) {
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.persist(&[]);
    }

    fn persist(&self, entries: &[String]) {
        let document = match serde_json::to_string(entries) {
            Ok(document) => document,
            Err(e) => {
                warn!("Could not serialize search history: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.save(&self.key, &document) {
            warn!("Could not save search history under '{}': {e}", self.key);
        }
    }
}

fn dedup_front(entries: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    entries.retain(|entry| seen.insert(entry.clone()));
}
