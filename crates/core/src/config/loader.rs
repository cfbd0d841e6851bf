use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use shellexpand::full;
use thiserror::Error;

use super::types::{ConfigFile, LoggingConfig, ResolvedConfig};

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
}

/// Load configuration.
///
/// An explicitly given path must exist; the default path is optional
/// and an absent file yields defaults, since typefill runs fine
/// without any configuration.
pub fn load(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
    let (path, required) = match config_path {
        Some(p) => (p.to_path_buf(), true),
        None => (default_config_path(), false),
    };

    if !path.exists() {
        if required {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        return Ok(ResolvedConfig::default());
    }

    let raw = fs::read_to_string(&path)
        .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

    let cf: ConfigFile = toml::from_str(&raw)
        .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

    if cf.version != 1 {
        return Err(ConfigError::BadVersion(cf.version));
    }

    let logging = match &cf.logging.file {
        Some(file) => LoggingConfig {
            level: cf.logging.level.clone(),
            file_level: cf.logging.file_level.clone(),
            file: Some(expand_path(&file.to_string_lossy())?),
        },
        None => cf.logging.clone(),
    };

    Ok(ResolvedConfig { path: Some(path), logging, aliases: cf.aliases })
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("typefill").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("typefill").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/config.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn loads_aliases_and_logging() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "version = 1\n[logging]\nlevel = \"debug\"\n[aliases]\nreadme = \"./readme.tpl\"\n"
        )
        .unwrap();
        let cfg = load(Some(file.path())).unwrap();
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.aliases.get("readme").map(String::as_str), Some("./readme.tpl"));
    }

    #[test]
    fn bad_version_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "version = 2").unwrap();
        let err = load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::BadVersion(2)));
    }
}
