//! Optional user configuration.

pub mod loader;
pub mod types;

pub use loader::{default_config_path, load, ConfigError};
pub use types::{LoggingConfig, ResolvedConfig};
