use std::fmt;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as subscriber_fmt;
use tracing_subscriber::prelude::*;
use typefill_core::config::types::ResolvedConfig;

static LOG_GUARD: Mutex<Option<tracing_appender::non_blocking::WorkerGuard>> =
    Mutex::new(None);

#[derive(Debug)]
pub struct LogInitError {
    path: PathBuf,
    source: std::io::Error,
}

impl fmt::Display for LogInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to create log file {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for LogInitError {}

/// Install the global subscriber: a stderr layer at the configured
/// level, plus an optional file layer. The log file is opened before
/// anything global is touched, so a failure leaves logging
/// uninitialized and the caller free to report it.
pub fn init(cfg: &ResolvedConfig) -> Result<(), LogInitError> {
    let file = match cfg.logging.file {
        Some(ref path) => Some(File::create(path).map_err(|source| LogInitError {
            path: path.clone(),
            source,
        })?),
        None => None,
    };

    let stderr_level = parse_level(&cfg.logging.level).unwrap_or(LevelFilter::INFO);

    let stderr_filter =
        EnvFilter::builder().with_default_directive(stderr_level.into()).from_env_lossy();

    let stderr_layer = subscriber_fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .with_filter(stderr_filter);

    let registry = tracing_subscriber::registry().with(stderr_layer);

    if let Some(file) = file {
        let file_level_str =
            cfg.logging.file_level.as_deref().unwrap_or(&cfg.logging.level);

        let file_level = parse_level(file_level_str).unwrap_or(LevelFilter::DEBUG);

        let file_filter = EnvFilter::builder()
            .with_default_directive(file_level.into())
            .from_env_lossy();

        let (non_blocking, guard) = tracing_appender::non_blocking(file);

        // Keep the worker guard alive for the whole process
        if let Ok(mut g) = LOG_GUARD.lock() {
            *g = Some(guard);
        }

        let file_layer = subscriber_fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(file_filter);

        registry.with(file_layer).init();
    } else {
        registry.init();
    }

    Ok(())
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_parse() {
        assert_eq!(parse_level("error"), Some(LevelFilter::ERROR));
        assert_eq!(parse_level("WARN"), Some(LevelFilter::WARN));
        assert_eq!(parse_level("Info"), Some(LevelFilter::INFO));
        assert_eq!(parse_level("debug"), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level("trace"), Some(LevelFilter::TRACE));
    }

    #[test]
    fn unknown_level_is_none() {
        assert_eq!(parse_level("verbose"), None);
        assert_eq!(parse_level(""), None);
    }

    #[test]
    fn unreachable_log_file_is_an_error_without_touching_globals() {
        let mut cfg = ResolvedConfig::default();
        cfg.logging.file = Some(PathBuf::from("/nonexistent-dir/typefill.log"));
        let err = init(&cfg).unwrap_err();
        assert!(err.to_string().contains("/nonexistent-dir/typefill.log"));
    }
}
