//! LMDB-backed [`DocumentStorage`].
//!
//! One environment per store, living in a `<name>.lmdb` directory, with a
//! single unnamed database holding `key -> JSON document` pairs. Every save
//! is its own write transaction and is committed before returning, so a
//! document is durable as soon as `save` succeeds.

use std::fs;
use std::path::{Path, PathBuf};

use lmdb::{Database, DatabaseFlags, Environment, Transaction, WriteFlags};
use log::{info, warn};

use crate::app_response::AppResponse;
use crate::storage::DocumentStorage;

pub struct AppDbState {
    env: Environment,
    db: Database,
    path: PathBuf,
}

impl AppDbState {
    /// Opens (creating if needed) the environment at `<name>.lmdb`.
    pub fn init(name: &str, map_size: usize) -> Result<Self, AppResponse> {
        if name.trim().is_empty() {
            return Err(AppResponse::ValidationError("Store name cannot be empty".to_string()));
        }
        Self::open_dir(Path::new(&format!("{name}.lmdb")), map_size)
    }

    pub fn open_dir(dir: &Path, map_size: usize) -> Result<Self, AppResponse> {
        if !dir.exists() {
            info!("Creating store directory at {}", dir.display());
            fs::create_dir_all(dir)?;
        }

        let env = Environment::new()
            .set_max_dbs(1)
            .set_map_size(map_size)
            .open(dir)?;
        let db = env.create_db(None, DatabaseFlags::empty())?;

        info!("Store opened at {}", dir.display());
        Ok(Self {
            env,
            db,
            path: dir.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes buffers to disk. LMDB closes the environment on drop; this only
    /// makes the final state explicit before a host tears the handle down.
    pub fn close_database(&self) -> Result<(), AppResponse> {
        self.env.sync(true)?;
        info!("Store at {} synced for close", self.path.display());
        Ok(())
    }
}

impl DocumentStorage for AppDbState {
    fn load(&self, key: &str) -> Result<Option<String>, AppResponse> {
        let txn = self.env.begin_ro_txn()?;
        let document = match txn.get(self.db, &key) {
            Ok(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => Some(text.to_string()),
                Err(e) => {
                    warn!("Document under '{key}' is not valid UTF-8: {e}");
                    return Err(AppResponse::SerializationError(format!(
                        "Document under '{key}' is not valid UTF-8"
                    )));
                }
            },
            Err(lmdb::Error::NotFound) => None,
            Err(e) => return Err(AppResponse::from(e)),
        };
        txn.abort();
        Ok(document)
    }

    fn save(&self, key: &str, document: &str) -> Result<(), AppResponse> {
        if key.is_empty() {
            return Err(AppResponse::ValidationError("Storage key cannot be empty".to_string()));
        }

        let mut txn = self.env.begin_rw_txn()?;
        txn.put(self.db, &key, &document, WriteFlags::empty())?;
        txn.commit()?;
        Ok(())
    }
}
