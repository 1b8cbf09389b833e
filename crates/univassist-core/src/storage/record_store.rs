//! JSON-file record collections.
//!
//! Each collection lives in one `<name>.json` file holding a JSON array.
//! Saving always overwrites the whole file; there is no merge and no locking,
//! so two processes doing load-modify-save on the same collection can lose
//! one of the updates.

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StoreError;

/// A record addressed by a small integer id.
pub trait Record {
    fn id(&self) -> i64;
}

/// Next free id: 1 for an empty collection, otherwise one past the largest id.
pub fn next_id<T: Record>(records: &[T]) -> i64 {
    records.iter().map(Record::id).max().map_or(1, |max| max + 1)
}

/// A named, durable collection of records of type `T`.
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    name: String,
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> RecordStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Collection `name` stored as `<dir>/<name>.json`.
    pub fn new(dir: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: dir.join(format!("{name}.json")),
            _records: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the collection, telling an absent file apart from a broken one.
    ///
    /// Returns `Ok(None)` when the file has never been created.
    pub fn read(&self) -> Result<Option<Vec<T>>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Unreadable {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    /// Load all records. Absent, unreadable and corrupt collections all
    /// come back empty; the latter two are logged.
    pub fn load(&self) -> Vec<T> {
        match self.read() {
            Ok(Some(records)) => records,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(collection = %self.name, error = %e, "treating collection as empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the collection with `records`.
    pub fn save(&self, records: &[T]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(records).map_err(|source| StoreError::Encode {
            name: self.name.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::WriteFailed {
                path: self.path.clone(),
                source,
            })?;
        }

        std::fs::write(&self.path, content).map_err(|source| StoreError::WriteFailed {
            path: self.path.clone(),
            source,
        })?;

        debug!(collection = %self.name, count = records.len(), "collection saved");
        Ok(())
    }
}
