use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default)]
    pub generation: GenerationSection,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[generation]` table. Unset fields fall back to built-in defaults.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct GenerationSection {
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Name of the environment variable holding the API key.
    pub api_key_env: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Secret API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Settings the generation client is built from.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Model identifier, bare (`gemini-2.5-flash-lite`) or qualified (`models/...`).
    pub model: String,
    pub endpoint: Url,
    pub timeout: Duration,
    pub api_key: ApiKey,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Config file that was read, if any.
    pub source: Option<PathBuf>,
    pub generation: GenerationConfig,
    pub logging: LoggingConfig,
}
