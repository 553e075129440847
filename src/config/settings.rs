//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across tasks.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// BackendConfig
// ---------------------------------------------------------------------------

/// Connection settings for the multi-modal backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend, e.g. `http://127.0.0.1:5000`.
    ///
    /// All operation endpoints and relative media paths (text-to-speech
    /// `audio_url` results) resolve against this address.
    pub base_url: String,
    /// Maximum seconds to wait for one response before timing out.
    ///
    /// Speech-to-text and image captioning can take tens of seconds on a
    /// CPU-only backend.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".into(),
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// LanguageDefaults
// ---------------------------------------------------------------------------

/// Language codes used when the caller omits one, and the front-end's
/// initial selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageDefaults {
    /// Default translation target (from the translate/TTS list), e.g. `en`.
    pub target_language: String,
    /// Default speech-recognition locale (from the STT list), e.g. `en-US`.
    pub stt_locale: String,
    /// Default target when translating a transcript, e.g. `fr`.
    pub transcript_target: String,
}

impl Default for LanguageDefaults {
    fn default() -> Self {
        Self {
            target_language: "en".into(),
            stt_locale: "en-US".into(),
            transcript_target: "fr".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use translate_studio::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend connection settings.
    pub backend: BackendConfig,
    /// Default language selections.
    pub languages: LanguageDefaults,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
