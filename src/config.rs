use crate::error::{Result, TranscacheError};
use crate::provider::gemini::{DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PROVIDER_LABEL: &str = "Gemini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_api_version: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Provider label written into translation records.
    pub provider_label: String,
    pub store_path: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_api_version: DEFAULT_API_VERSION.to_string(),
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            provider_label: DEFAULT_PROVIDER_LABEL.to_string(),
            store_path: Self::default_store_path(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                config = Self::from_file(&config_path)?;
            }
        }

        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Read a toml config file. Missing fields take their defaults; a file
    /// that does not parse is an error rather than a silent reset.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| TranscacheError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Override fields from environment-style variables.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = var("GEMINI_API_KEY") {
            self.gemini_api_key = Some(key);
        }
        if let Some(version) = var("GEMINI_API_VERSION") {
            self.gemini_api_version = version;
        }
        if let Some(model) = var("GEMINI_MODEL") {
            self.gemini_model = model;
        }
        if let Some(url) = var("GEMINI_BASE_URL") {
            self.gemini_base_url = url;
        }
        if let Some(label) = var("TRANSLATION_PROVIDER") {
            self.provider_label = label;
        }
        if let Some(path) = var("TRANSCACHE_STORE") {
            self.store_path = PathBuf::from(path);
        }
        if let Some(timeout) = var("TRANSCACHE_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.request_timeout_secs = t;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(TranscacheError::Config(
                "Request timeout must be greater than 0".to_string(),
            ));
        }
        if self.gemini_model.trim().is_empty() {
            return Err(TranscacheError::Config(
                "GEMINI_MODEL must not be empty".to_string(),
            ));
        }
        if self.gemini_api_version.trim().is_empty() {
            return Err(TranscacheError::Config(
                "GEMINI_API_VERSION must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        self.gemini_api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    pub fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("transcache").join("config.toml"))
    }

    fn default_store_path() -> PathBuf {
        dirs::data_dir()
            .map(|p| p.join("transcache"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("translations.redb")
    }
}
