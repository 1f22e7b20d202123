//! Key-value persistence surface for the session.
//!
//! The browser front-end kept its session in `localStorage`: string keys,
//! string values, synchronous access. [`KeyValueStore`] is that contract.
//! It stays synchronous on purpose: the store's `set`/`clear` must finish
//! persisting and publishing before they return.
//!
//! Two backends ship here:
//! - [`MemoryStorage`]: a shared in-process map (tests, short-lived tools).
//! - [`FileStorage`]: one file per key in a directory, so a session
//!   survives restarts the way a browser session survives reloads.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::SessionError;

/// A string-to-string persistence backend.
///
/// `Send + Sync + 'static` because the session store keeps it behind an
/// `Arc` shared by every clone of the store.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Returns the stored value, or `None` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Deletes the key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// A shared handle is a store too, so callers can keep an `Arc` to the
/// backend they hand over.
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        S::get(self.as_ref(), key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        S::set(self.as_ref(), key, value)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        S::remove(self.as_ref(), key)
    }
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// In-process storage. Clones share the same map, so a test can keep a
/// handle and inspect what the store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a key. Handy for simulating a previous run.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStorage
// ---------------------------------------------------------------------------

/// Directory-backed storage: key `currentUser` lives in `<dir>/currentUser`.
///
/// Writes go to a temporary sibling first and are renamed into place, so
/// a crash mid-write leaves either the old value or the new one, never a
/// truncated file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (creating if needed) a storage directory.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the directory can't be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, SessionError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| SessionError::Storage {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys become file names, so only a conservative alphabet is allowed.
    fn path_for(&self, key: &str) -> Result<PathBuf, SessionError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(SessionError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

fn storage_error(key: &str) -> impl FnOnce(io::Error) -> SessionError + '_ {
    move |source| SessionError::Storage {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(key)(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{key}.tmp"));
        fs::write(&tmp, value).map_err(storage_error(key))?;
        fs::rename(&tmp, &path).map_err(storage_error(key))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(key)(e)),
        }
    }
}
