use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    #[default]
    Remote,
    Memory,
}

/// Settings the shell exposes to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub storage: StorageMode,
    pub demo_user: String,
    pub demo_pass: String,
    pub status_clear_ms: u64,
    pub speech_lang: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            storage: StorageMode::Remote,
            demo_user: "admin".to_string(),
            demo_pass: "admin".to_string(),
            status_clear_ms: 3000,
            speech_lang: "es-ES".to_string(),
        }
    }
}

impl ClientSettings {
    /// Used when no shell answers: everything stays in the page.
    pub fn standalone() -> Self {
        Self {
            storage: StorageMode::Memory,
            ..Self::default()
        }
    }

    pub fn status_delay(&self) -> Duration {
        Duration::from_millis(self.status_clear_ms)
    }
}
