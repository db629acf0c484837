//! Application configuration management.
//!
//! This module handles loading and saving the client configuration: which
//! API origin to talk to, the endpoint paths and navigation targets, where
//! the token is kept, and the opt-in submission behaviours.
//!
//! Configuration is stored at `~/.config/authform/config.json`. The
//! `AUTHFORM_BASE_URL` and `AUTHFORM_STORAGE` environment variables
//! override the file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

/// Application name used for config/data directory paths
const APP_NAME: &str = "authform";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const ENV_BASE_URL: &str = "AUTHFORM_BASE_URL";
const ENV_STORAGE: &str = "AUTHFORM_STORAGE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    File,
    Keyring,
    Memory,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageKind::File),
            "keyring" => Ok(StorageKind::Keyring),
            "memory" => Ok(StorageKind::Memory),
            other => Err(format!(
                "unknown storage backend '{}' (expected file, keyring or memory)",
                other
            )),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageKind::File => "file",
            StorageKind::Keyring => "keyring",
            StorageKind::Memory => "memory",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub login_path: String,
    pub signup_path: String,
    pub landing_location: String,
    pub login_location: String,
    pub token_key: String,
    pub storage: StorageKind,
    pub request_timeout_secs: Option<u64>,
    pub single_flight: bool,
    pub alert_on_transport_error: bool,
    pub last_email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/".to_string(),
            login_path: "/api/login".to_string(),
            signup_path: "/api/signup".to_string(),
            landing_location: "index.html".to_string(),
            login_location: "login.html".to_string(),
            token_key: "token".to_string(),
            storage: StorageKind::File,
            request_timeout_secs: None,
            single_flight: false,
            alert_on_transport_error: false,
            last_email: None,
        }
    }
}

impl Config {
    /// Load from the default location, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Record the last submitted email in the config file.
    ///
    /// The file is re-read, so flag and environment overrides on the running
    /// config are never written back.
    pub fn remember_email(email: &str) -> Result<()> {
        Self::remember_email_at(&Self::config_path()?, email)
    }

    pub fn remember_email_at(path: &Path, email: &str) -> Result<()> {
        let mut stored = Self::load_from(path)?;
        stored.last_email = Some(email.to_string());
        stored.save_to(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply `AUTHFORM_*` environment overrides; invalid values are ignored.
    pub fn apply_env(&mut self) {
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Ok(storage) = std::env::var(ENV_STORAGE) {
            match storage.parse() {
                Ok(kind) => self.storage = kind,
                Err(e) => warn!(error = %e, "Ignoring {}", ENV_STORAGE),
            }
        }
    }

    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url).with_context(|| format!("Invalid base URL: {}", self.base_url))
    }

    /// Directory-safe name for the API origin, e.g. `localhost_3000`
    pub fn origin_label(&self) -> Result<String> {
        let url = self.base_url()?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow::anyhow!("Base URL has no host: {}", url))?;
        let label = match url.port_or_known_default() {
            Some(port) => format!("{}_{}", host, port),
            None => host.to_string(),
        };
        Ok(label
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect())
    }

    /// Per-origin data directory, like a browser scoping storage to an origin
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME).join(self.origin_label()?))
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
