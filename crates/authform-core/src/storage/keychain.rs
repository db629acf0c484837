use anyhow::{Context, Result};
use keyring::Entry;

use super::TokenStorage;

const SERVICE_NAME: &str = "authform";

/// Token storage in the OS keychain, one entry per origin and key.
pub struct KeyringStorage {
    origin: String,
}

impl KeyringStorage {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    fn account(&self, key: &str) -> String {
        format!("{}:{}", self.origin, key)
    }

    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(SERVICE_NAME, &self.account(key)).context("Failed to create keyring entry")
    }
}

impl TokenStorage for KeyringStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to retrieve item from keychain"),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .context("Failed to store item in keychain")
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete item from keychain"),
        }
    }
}
