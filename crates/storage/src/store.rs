use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// File-backed list of records. The file is the canonical representation;
/// the in-memory working copy is loaded once at construction and rewritten
/// wholesale on every mutation.
///
/// Each backing file is a single-writer resource: mutations hold the store's
/// exclusive lock from reading the current state through persisting the
/// result, and the file itself is replaced atomically so readers never
/// observe a half-written collection.
pub struct RecordStore<T> {
    path: PathBuf,
    records: Mutex<Vec<T>>,
}

impl<T> RecordStore<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Opens the store at `path`, creating parent directories and an empty
    /// file when nothing exists there yet. An empty or structurally invalid
    /// file degrades to an empty collection with a warning; only real I/O
    /// failures are errors.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|source| {
                        StoreError::io("creating store directory", &path, source)
                    })?;
                }
            }
            fs::write(&path, b"").map_err(|source| {
                StoreError::io("creating store file", &path, source)
            })?;
            return Ok(Self {
                path,
                records: Mutex::new(Vec::new()),
            });
        }

        let records = read_records(&path)?;
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Clone of the current working copy.
    #[must_use]
    pub fn load(&self) -> Vec<T> {
        self.lock().clone()
    }

    /// Runs a read-only closure over the working copy under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.lock())
    }

    /// Replaces the entire collection, on disk first and in memory after.
    pub fn save(&self, records: Vec<T>) -> Result<(), StoreError> {
        let mut guard = self.lock();
        write_records(&self.path, &records)?;
        *guard = records;
        Ok(())
    }

    /// Runs `f` on a scratch copy of the working list while holding the
    /// exclusive lock. Returning `Some` persists the whole collection and
    /// commits the scratch copy to memory; returning `None` leaves both
    /// memory and disk untouched. A persist failure also leaves the working
    /// copy unchanged.
    pub fn mutate<R>(
        &self,
        f: impl FnOnce(&mut Vec<T>) -> Option<R>,
    ) -> Result<Option<R>, StoreError> {
        let mut guard = self.lock();
        let mut scratch = guard.clone();
        let Some(result) = f(&mut scratch) else {
            return Ok(None);
        };
        write_records(&self.path, &scratch)?;
        *guard = scratch;
        Ok(Some(result))
    }

    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let content = fs::read_to_string(path)
        .map_err(|source| StoreError::io("reading store file", path, source))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str(&content) {
        Ok(records) => Ok(records),
        Err(why) => {
            log::warn!(
                "store file {} is empty or corrupted, continuing with an empty collection: {}",
                path.display(),
                why
            );
            Ok(Vec::new())
        }
    }
}

fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(records).map_err(|source| {
        StoreError::Serialize {
            path: path.to_path_buf(),
            source,
        }
    })?;

    // Write a sibling file and rename it into place so a concurrent reader
    // never sees a partially written list.
    let tmp = tmp_path(path);
    fs::write(&tmp, &json)
        .map_err(|source| StoreError::io("writing store file", &tmp, source))?;
    fs::rename(&tmp, path)
        .map_err(|source| StoreError::io("replacing store file", path, source))?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("records"));
    name.push(".tmp");
    path.with_file_name(name)
}
