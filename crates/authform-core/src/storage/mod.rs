//! Client-side key-value storage for the session token.
//!
//! This module provides:
//! - `TokenStorage`: the capability the handlers write the token through
//! - `FileStorage`: JSON file scoped to the API origin, survives restarts
//! - `KeyringStorage`: OS-level keychain via keyring
//! - `MemoryStorage`: in-process map for tests and throwaway sessions

pub mod file;
pub mod keychain;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::config::{Config, StorageKind};

pub use file::FileStorage;
pub use keychain::KeyringStorage;

/// Persistent string key-value store, in the manner of browser local storage.
pub trait TokenStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;

    /// When the item was last written, if the backend tracks it
    fn stored_at(&self, _key: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(None)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, (String, DateTime<Utc>)>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TokenStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).map(|(value, _)| value.clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), (value.to_string(), Utc::now()));
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }

    fn stored_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).map(|(_, at)| *at))
    }
}

/// Open the storage backend selected in the config, scoped to its origin.
pub fn open(config: &Config) -> Result<Arc<dyn TokenStorage>> {
    let storage: Arc<dyn TokenStorage> = match config.storage {
        StorageKind::File => Arc::new(FileStorage::new(config.data_dir()?)),
        StorageKind::Keyring => Arc::new(KeyringStorage::new(config.origin_label()?)),
        StorageKind::Memory => Arc::new(MemoryStorage::new()),
    };
    Ok(storage)
}
