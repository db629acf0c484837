use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use super::TokenStorage;

/// Storage file name in the origin's data directory
const STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredItem {
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl StoredItem {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            updated_at: Utc::now(),
        }
    }
}

/// Key-value storage persisted as one JSON file per origin.
pub struct FileStorage {
    dir: PathBuf,
    // Serializes read-modify-write within this process
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STORAGE_FILE)
    }

    fn load_items(path: &Path) -> Result<BTreeMap<String, StoredItem>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read storage file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse storage file: {}", path.display()))
    }

    fn save_items(&self, items: &BTreeMap<String, StoredItem>) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create storage directory: {}", self.dir.display()))?;
        let contents = serde_json::to_string_pretty(items)?;

        // Readers only ever see the old file or the complete new one
        let mut tmp = NamedTempFile::new_in(&self.dir).context("Failed to create temp storage file")?;
        tmp.write_all(contents.as_bytes())
            .context("Failed to write storage file")?;
        tmp.persist(self.path())
            .map_err(|e| e.error)
            .context("Failed to replace storage file")?;
        Ok(())
    }

    fn item(&self, key: &str) -> Result<Option<StoredItem>> {
        Ok(Self::load_items(&self.path())?.remove(key))
    }
}

impl TokenStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.item(key)?.map(|item| item.value))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = Self::load_items(&self.path())?;
        items.insert(key.to_string(), StoredItem::new(value));
        self.save_items(&items)?;
        debug!(key = key, path = %self.path().display(), "Stored item");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = Self::load_items(&self.path())?;
        if items.remove(key).is_some() {
            self.save_items(&items)?;
        }
        Ok(())
    }

    fn stored_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self.item(key)?.map(|item| item.updated_at))
    }
}
