pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, LoadOptions, default_config_path};
pub use types::{ApiKey, GenerationConfig, LoggingConfig, ResolvedConfig};
