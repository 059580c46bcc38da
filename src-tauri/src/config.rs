use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::models::ClientSettings;

/// Apps Script deployment that fronts the "Registros" sheet.
pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbwJJJwPSBxtCjtkoC1BoBR3H9MDqYN5nF9HUye6Sfmhp6OYUUCjAQe2rYgcWu-AKe4U/exec";

pub const ENDPOINT_ENV: &str = "DOCREG_ENDPOINT";
pub const STORAGE_ENV: &str = "DOCREG_STORAGE";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Documents and logins go through the Apps Script endpoint.
    #[default]
    Remote,
    /// Documents live only in the UI for the session; login is checked locally.
    Memory,
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidStorage(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unknown storage mode: {0:?} (expected \"remote\" or \"memory\")")]
    InvalidStorage(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Apps Script web app URL
    pub endpoint: String,
    pub storage: StorageMode,
    /// Credentials accepted by the in-memory variant
    pub demo_user: String,
    pub demo_pass: String,
    /// How long transient status messages stay visible
    pub status_clear_ms: u64,
    /// BCP 47 tag handed to the speech recognizer
    pub speech_lang: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            storage: StorageMode::Remote,
            demo_user: "admin".to_string(),
            demo_pass: "admin".to_string(),
            status_clear_ms: 3000,
            speech_lang: "es-ES".to_string(),
        }
    }
}

impl AppConfig {
    /// Load settings from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply `DOCREG_*` overrides from the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }
        if let Some(storage) = lookup(STORAGE_ENV).filter(|v| !v.trim().is_empty()) {
            self.storage = storage.parse()?;
        }
        Ok(self)
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            storage: self.storage,
            demo_user: self.demo_user.clone(),
            demo_pass: self.demo_pass.clone(),
            status_clear_ms: self.status_clear_ms,
            speech_lang: self.speech_lang.clone(),
        }
    }
}
