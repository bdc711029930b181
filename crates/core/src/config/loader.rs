use crate::config::types::{
    ApiKey, ConfigFile, DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL,
    DEFAULT_TIMEOUT_SECS, GenerationConfig, LoggingConfig, ResolvedConfig,
};
use shellexpand::full;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,

    #[error("invalid API endpoint '{0}': {1}")]
    InvalidEndpoint(String, #[source] url::ParseError),

    #[error("failed to load env file {0}: {1}")]
    EnvFile(String, #[source] dotenvy::Error),

    #[error("{0} is not set (export it or add it to a .env file)")]
    MissingApiKey(String),
}

/// Where configuration comes from, as given on the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoadOptions<'a> {
    /// Explicit config file. Must exist when given.
    pub config_path: Option<&'a Path>,
    /// Explicit `.env` file. Defaults to `./.env` when present.
    pub env_file: Option<&'a Path>,
    /// Model override, wins over the config file.
    pub model: Option<&'a str>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Build the configuration once at startup.
    ///
    /// Variables already set in the process environment win over the `.env`
    /// file; the process environment itself is never modified.
    pub fn load(opts: LoadOptions<'_>) -> Result<ResolvedConfig, ConfigError> {
        let dotenv = read_env_file(opts.env_file)?;
        let (source, file) = read_config_file(opts.config_path)?;

        Self::resolve(source, file, opts.model, |name| {
            env::var(name)
                .ok()
                .filter(|v| !v.is_empty())
                .or_else(|| dotenv.get(name).cloned())
        })
    }

    /// Resolve a parsed config file against defaults, the model override and
    /// an environment lookup.
    pub fn resolve(
        source: Option<PathBuf>,
        file: Option<ConfigFile>,
        model_override: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let (generation, log_cfg) = match file {
            Some(cf) => {
                if cf.version != 1 {
                    return Err(ConfigError::BadVersion(cf.version));
                }
                (cf.generation, cf.logging)
            }
            None => Default::default(),
        };

        let key_var =
            generation.api_key_env.unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
        let api_key = lookup(&key_var)
            .filter(|k| !k.trim().is_empty())
            .map(ApiKey::new)
            .ok_or_else(|| ConfigError::MissingApiKey(key_var.clone()))?;

        let model = model_override
            .map(ToOwned::to_owned)
            .or(generation.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let endpoint_raw =
            generation.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(&endpoint_raw)
            .map_err(|e| ConfigError::InvalidEndpoint(endpoint_raw.clone(), e))?;

        let timeout =
            Duration::from_secs(generation.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        // Resolve log file path if present
        let logging = if let Some(ref file) = log_cfg.file {
            LoggingConfig {
                level: log_cfg.level.clone(),
                file_level: log_cfg.file_level.clone(),
                file: Some(expand_path(&file.to_string_lossy())?),
            }
        } else {
            log_cfg
        };

        Ok(ResolvedConfig {
            source,
            generation: GenerationConfig { model, endpoint, timeout, api_key },
            logging,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("docmeta").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("docmeta").join("config.toml")
}

/// Read the explicit config file, or the default one if it exists.
fn read_config_file(
    explicit: Option<&Path>,
) -> Result<(Option<PathBuf>, Option<ConfigFile>), ConfigError> {
    let path = match explicit {
        Some(p) => {
            let p = expand_path(&p.to_string_lossy())?;
            if !p.exists() {
                return Err(ConfigError::NotFound(p.display().to_string()));
            }
            p
        }
        None => {
            let p = default_config_path();
            if !p.exists() {
                return Ok((None, None));
            }
            p
        }
    };

    let s = fs::read_to_string(&path)
        .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

    let cf: ConfigFile = toml::from_str(&s)
        .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

    Ok((Some(path), Some(cf)))
}

/// Read `KEY=value` pairs from the explicit env file, or `./.env` if present.
fn read_env_file(explicit: Option<&Path>) -> Result<HashMap<String, String>, ConfigError> {
    let path = explicit.map_or_else(|| PathBuf::from(".env"), Path::to_path_buf);

    let iter = match dotenvy::from_path_iter(&path) {
        Ok(iter) => iter,
        Err(e) if explicit.is_none() && e.not_found() => return Ok(HashMap::new()),
        Err(e) => return Err(ConfigError::EnvFile(path.display().to_string(), e)),
    };

    iter.collect::<Result<HashMap<_, _>, _>>()
        .map_err(|e| ConfigError::EnvFile(path.display().to_string(), e))
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
