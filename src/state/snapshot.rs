//! Form snapshots and the key-value store they are persisted to.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::StoreError;

/// Field name to value, as serialized by the form at one point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot(BTreeMap<String, String>);

impl FormSnapshot {
    /// Build from form entries in document order; a repeated name keeps its
    /// last value.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Storage key for a form: `<prefix><id>`, or `<prefix><default>` when the
/// form has no usable id.
pub fn storage_key(form_id: Option<&str>, settings: &Settings) -> String {
    let id = form_id.map(str::trim).filter(|id| !id.is_empty()).unwrap_or(settings.default_form_key.as_str());
    format!("{}{id}", settings.autosave_key_prefix)
}

/// Persistent string store holding JSON-encoded snapshots.
pub trait SnapshotStore {
    /// Overwrite the snapshot under `key`.
    ///
    /// # Errors
    ///
    /// Fails when the store is unavailable or rejects the write.
    fn save(&self, key: &str, snapshot: &FormSnapshot) -> Result<(), StoreError>;

    /// Decode the snapshot under `key`, if present and well-formed.
    fn load(&self, key: &str) -> Option<FormSnapshot>;
}

/// Process-local store.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored text for `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&self, key: &str, snapshot: &FormSnapshot) -> Result<(), StoreError> {
        let raw = serde_json::to_string(snapshot)?;
        self.entries.borrow_mut().insert(key.to_owned(), raw);
        Ok(())
    }

    fn load(&self, key: &str) -> Option<FormSnapshot> {
        let raw = self.raw(key)?;
        serde_json::from_str(&raw).ok()
    }
}

/// `window.localStorage`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

#[cfg(feature = "hydrate")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl SnapshotStore for LocalStorageStore {
    fn save(&self, key: &str, snapshot: &FormSnapshot) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        let raw = serde_json::to_string(snapshot)?;
        storage
            .set_item(key, &raw)
            .map_err(|e| StoreError::Write(e.as_string().unwrap_or_else(|| format!("{e:?}"))))
    }

    fn load(&self, key: &str) -> Option<FormSnapshot> {
        let raw = Self::storage()?.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
}
