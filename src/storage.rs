//! Persistence capability for the small JSON documents the library owns.
//!
//! Progress, recent searches and the user mode are each stored as one
//! document under a well-known key. Anything that can `load` and `save` a
//! string by key can back them: the LMDB store in [`crate::local_db_state`]
//! for real hosts, [`MemoryStorage`] for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::app_response::AppResponse;

pub trait DocumentStorage: Send + Sync {
    /// Returns the document stored under `key`, or `None` if nothing was saved yet.
    fn load(&self, key: &str) -> Result<Option<String>, AppResponse>;

    /// Replaces the document stored under `key`.
    fn save(&self, key: &str, document: &str) -> Result<(), AppResponse>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.read().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, AppResponse> {
        let docs = self
            .documents
            .read()
            .map_err(|_| AppResponse::DatabaseError("Memory storage lock poisoned".to_string()))?;
        Ok(docs.get(key).cloned())
    }

    fn save(&self, key: &str, document: &str) -> Result<(), AppResponse> {
        let mut docs = self
            .documents
            .write()
            .map_err(|_| AppResponse::DatabaseError("Memory storage lock poisoned".to_string()))?;
        docs.insert(key.to_string(), document.to_string());
        Ok(())
    }
}
