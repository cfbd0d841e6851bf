use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Short names for template locations: a file path or a URL.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self { version: default_version(), logging: LoggingConfig::default(), aliases: HashMap::new() }
    }
}

fn default_version() -> u32 {
    1
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

/// Configuration after path expansion, ready for use.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Where the config was read from, if a file existed.
    pub path: Option<PathBuf>,
    pub logging: LoggingConfig,
    pub aliases: HashMap<String, String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self { path: None, logging: LoggingConfig::default(), aliases: HashMap::new() }
    }
}
