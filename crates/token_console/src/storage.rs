//! # Storage
//!
//! Typed helpers over an opaque key-value store holding the console snapshot.
//!
//! | Key                  | Value                          |
//! |----------------------|--------------------------------|
//! | `tokens`             | JSON array of `Token`          |
//! | `launchpad_projects` | JSON array of `LaunchpadProject` |
//!
//! Dates are written as ISO-8601 strings and revived into timestamps on load
//! (see [`crate::types::iso8601`]). A missing key loads as an empty list.
//! Writes are whole-snapshot and last-write-wins.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{LAUNCHPAD_KEY, TOKENS_KEY};
use crate::types::{LaunchpadProject, Token};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage i/o failed for key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("could not encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not decode `{key}`: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Opaque persistence backend.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

/// In-process store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// One `<key>.json` file per key inside `dir`.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let io_err = |source: io::Error| StorageError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        fs::write(self.path(key), value).map_err(io_err)
    }
}

// ─────────────────────────────────────────────────────────
// Snapshot helpers
// ─────────────────────────────────────────────────────────

/// Everything the console persists.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub tokens: Vec<Token>,
    pub projects: Vec<LaunchpadProject>,
}

pub fn save_tokens(store: &mut dyn KeyValueStore, tokens: &[Token]) -> Result<(), StorageError> {
    save_list(store, TOKENS_KEY, tokens)
}

pub fn load_tokens(store: &dyn KeyValueStore) -> Result<Vec<Token>, StorageError> {
    load_list(store, TOKENS_KEY)
}

pub fn save_projects(
    store: &mut dyn KeyValueStore,
    projects: &[LaunchpadProject],
) -> Result<(), StorageError> {
    save_list(store, LAUNCHPAD_KEY, projects)
}

pub fn load_projects(store: &dyn KeyValueStore) -> Result<Vec<LaunchpadProject>, StorageError> {
    load_list(store, LAUNCHPAD_KEY)
}

pub fn save_snapshot(
    store: &mut dyn KeyValueStore,
    tokens: &[Token],
    projects: &[LaunchpadProject],
) -> Result<(), StorageError> {
    save_tokens(store, tokens)?;
    save_projects(store, projects)
}

pub fn load_snapshot(store: &dyn KeyValueStore) -> Result<Snapshot, StorageError> {
    Ok(Snapshot {
        tokens: load_tokens(store)?,
        projects: load_projects(store)?,
    })
}

fn save_list<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(items).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    tracing::debug!(key, bytes = raw.len(), "snapshot written");
    store.set(key, raw)
}

fn load_list<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        tracing::debug!(key, "no snapshot stored");
        return Ok(Vec::new());
    };
    let items: Vec<T> = serde_json::from_str(&raw).map_err(|source| StorageError::Decode {
        key: key.to_string(),
        source,
    })?;
    tracing::debug!(key, count = items.len(), "snapshot loaded");
    Ok(items)
}
