//! CMS content store.
//!
//! Editable site copy keyed by dotted string keys (`home.hero.title`).
//! Entries live in their own sled tree as JSON; the store seeds the site's
//! default copy on first open and supports get/set/batch-set/reset plus
//! plain-JSON export and import.

mod defaults;

pub use defaults::default_entries;

use serde::{Deserialize, Serialize};
use sled::Db;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{EngineError, StorageError};
use crate::storage::{to_storage_data, to_storage_io, TREE_CMS};
use crate::telemetry::{content_id, now_millis};

/// Content value kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    RichText,
    Image,
    Video,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::RichText => "richtext",
            ContentKind::Image => "image",
            ContentKind::Video => "video",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ContentKind::Text),
            "richtext" => Ok(ContentKind::RichText),
            "image" => Ok(ContentKind::Image),
            "video" => Ok(ContentKind::Video),
            other => Err(format!("unknown content kind: {}", other)),
        }
    }
}

/// One editable content record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub id: String,
    pub key: String,
    pub kind: ContentKind,
    pub value: String,
    pub label: String,
    pub category: String,
    pub updated_at_ms: u64,
}

impl ContentEntry {
    pub fn new(
        key: impl Into<String>,
        kind: ContentKind,
        value: impl Into<String>,
        label: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let key = key.into();
        Self {
            id: content_id(&key),
            key,
            kind,
            value: value.into(),
            label: label.into(),
            category: category.into(),
            updated_at_ms: now_millis(),
        }
    }
}

/// Sled-backed content store.
#[derive(Clone)]
pub struct ContentStore {
    tree: sled::Tree,
}

impl ContentStore {
    /// Open the store, seeding default copy for keys not yet present.
    pub fn open(db: &Db) -> Result<Self, StorageError> {
        let store = Self {
            tree: db.open_tree(TREE_CMS).map_err(to_storage_io)?,
        };
        let seeded = store.seed_missing_defaults()?;
        if seeded > 0 {
            debug!(seeded, "Seeded default CMS entries");
        }
        Ok(store)
    }

    /// Get one entry by its dotted key.
    pub fn get(&self, key: &str) -> Result<Option<ContentEntry>, StorageError> {
        let Some(raw) = self.tree.get(key.as_bytes()).map_err(to_storage_io)? else {
            return Ok(None);
        };
        let entry = serde_json::from_slice(&raw).map_err(to_storage_data)?;
        Ok(Some(entry))
    }

    /// Update the value of an existing entry.
    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<ContentEntry, EngineError> {
        let mut entry = self
            .get(key)?
            .ok_or_else(|| EngineError::UnknownContentKey(key.to_string()))?;
        entry.value = value.into();
        entry.updated_at_ms = now_millis();
        self.put(&entry)?;
        self.tree.flush().map_err(to_storage_io)?;
        Ok(entry)
    }

    /// Update several values; the whole batch is validated before any
    /// write, so one bad key does not leave a partial batch behind.
    pub fn set_batch(&self, updates: &[(String, String)]) -> Result<usize, EngineError> {
        let mut entries = Vec::with_capacity(updates.len());
        for (key, value) in updates {
            let mut entry = self
                .get(key)?
                .ok_or_else(|| EngineError::UnknownContentKey(key.clone()))?;
            entry.value = value.clone();
            entry.updated_at_ms = now_millis();
            entries.push(entry);
        }

        let mut batch = sled::Batch::default();
        for entry in &entries {
            let value = serde_json::to_vec(entry).map_err(to_storage_data)?;
            batch.insert(entry.key.as_bytes(), value);
        }
        self.tree.apply_batch(batch).map_err(to_storage_io)?;
        self.tree.flush().map_err(to_storage_io)?;
        Ok(entries.len())
    }

    /// Insert or replace a full entry (import path).
    pub fn put(&self, entry: &ContentEntry) -> Result<(), StorageError> {
        let value = serde_json::to_vec(entry).map_err(to_storage_data)?;
        self.tree
            .insert(entry.key.as_bytes(), value)
            .map_err(to_storage_io)?;
        Ok(())
    }

    /// Reset one key, or all keys, back to the seeded defaults.
    ///
    /// Keys with no default (imported extras) are removed on a full reset.
    pub fn reset(&self, key: Option<&str>) -> Result<usize, EngineError> {
        match key {
            Some(key) => {
                let default = default_entries()
                    .into_iter()
                    .find(|e| e.key == key)
                    .ok_or_else(|| EngineError::UnknownContentKey(key.to_string()))?;
                self.put(&default)?;
                self.tree.flush().map_err(to_storage_io)?;
                Ok(1)
            }
            None => {
                self.tree.clear().map_err(to_storage_io)?;
                let restored = self.seed_missing_defaults()?;
                info!(restored, "CMS content reset to defaults");
                Ok(restored)
            }
        }
    }

    /// All entries sorted by key.
    pub fn list(&self) -> Result<Vec<ContentEntry>, StorageError> {
        let mut out = Vec::new();
        for item in self.tree.iter() {
            let (_, raw) = item.map_err(to_storage_io)?;
            let entry: ContentEntry = serde_json::from_slice(&raw).map_err(to_storage_data)?;
            out.push(entry);
        }
        out.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(out)
    }

    /// Export every entry as a pretty-printed JSON array.
    pub fn export(&self) -> Result<String, EngineError> {
        let entries = self.list()?;
        serde_json::to_string_pretty(&entries)
            .map_err(|e| EngineError::InvalidContent(e.to_string()))
    }

    /// Import entries from a JSON array produced by [`export`].
    ///
    /// Unknown keys are accepted; malformed input is a typed error and
    /// writes nothing. Timestamps are refreshed on import.
    ///
    /// [`export`]: ContentStore::export
    pub fn import(&self, json: &str) -> Result<usize, EngineError> {
        let mut entries: Vec<ContentEntry> = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidContent(format!("import parse failed: {}", e)))?;

        let now = now_millis();
        let mut batch = sled::Batch::default();
        for entry in &mut entries {
            entry.id = content_id(&entry.key);
            entry.updated_at_ms = now;
            let value = serde_json::to_vec(entry).map_err(to_storage_data)?;
            batch.insert(entry.key.as_bytes(), value);
        }
        self.tree.apply_batch(batch).map_err(to_storage_io)?;
        self.tree.flush().map_err(to_storage_io)?;
        info!(imported = entries.len(), "CMS content imported");
        Ok(entries.len())
    }

    fn seed_missing_defaults(&self) -> Result<usize, StorageError> {
        let mut seeded = 0;
        for entry in default_entries() {
            if self
                .tree
                .get(entry.key.as_bytes())
                .map_err(to_storage_io)?
                .is_none()
            {
                self.put(&entry)?;
                seeded += 1;
            }
        }
        if seeded > 0 {
            self.tree.flush().map_err(to_storage_io)?;
        }
        Ok(seeded)
    }
}
