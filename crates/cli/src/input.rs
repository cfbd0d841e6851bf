//! Template input: a file on disk, a URL, or a configured alias.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use typefill_core::config::types::ResolvedConfig;

use crate::InputArgs;

#[derive(Debug)]
pub enum InputError {
    /// No template given at all.
    NoSource,
    /// More than one of name / --file / --url given.
    AmbiguousSource,
    /// Name is neither a configured alias nor an existing file.
    UnknownAlias(String),
    Read(PathBuf, std::io::Error),
    Http(String, reqwest::Error),
    HttpStatus(String, u16),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NoSource => {
                write!(f, "no template given: pass a name, --file, or --url")
            }
            InputError::AmbiguousSource => {
                write!(f, "pass only one of the template name, --file, or --url")
            }
            InputError::UnknownAlias(name) => {
                write!(f, "'{name}' is not a configured alias or an existing file")
            }
            InputError::Read(path, e) => {
                write!(f, "failed to read {}: {e}", path.display())
            }
            InputError::Http(url, e) => write!(f, "failed to fetch {url}: {e}"),
            InputError::HttpStatus(url, code) => {
                write!(f, "failed to fetch {url}: HTTP status {code}")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Where the template text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    File(PathBuf),
    Url(String),
}

impl TemplateSource {
    /// The file-name-ish tail, used to sniff structured formats.
    pub fn basename(&self) -> &str {
        let path = match self {
            TemplateSource::File(p) => p.to_str().unwrap_or(""),
            TemplateSource::Url(u) => u.as_str(),
        };
        path.rsplit(['/', '\\']).next().unwrap_or(path)
    }
}

/// Pick the template source from the command line, resolving aliases
/// through the config.
pub fn select(args: &InputArgs, cfg: &ResolvedConfig) -> Result<TemplateSource, InputError> {
    let given =
        usize::from(args.name.is_some()) + usize::from(args.file.is_some()) + usize::from(args.url.is_some());
    if given == 0 {
        return Err(InputError::NoSource);
    }
    if given > 1 {
        return Err(InputError::AmbiguousSource);
    }

    if let Some(ref path) = args.file {
        return Ok(TemplateSource::File(path.clone()));
    }
    if let Some(ref url) = args.url {
        return Ok(TemplateSource::Url(normalize_url(url)));
    }

    match args.name {
        Some(ref name) => match cfg.aliases.get(name) {
            Some(target) if target.contains("://") => {
                Ok(TemplateSource::Url(target.clone()))
            }
            Some(target) => Ok(TemplateSource::File(PathBuf::from(target))),
            None if Path::new(name).exists() => {
                Ok(TemplateSource::File(PathBuf::from(name)))
            }
            None => Err(InputError::UnknownAlias(name.clone())),
        },
        None => Err(InputError::NoSource),
    }
}

/// Read the template text, with line endings normalized.
pub fn read(source: &TemplateSource) -> Result<String, InputError> {
    let raw = match source {
        TemplateSource::File(path) => fs::read_to_string(path)
            .map_err(|e| InputError::Read(path.clone(), e))?,
        TemplateSource::Url(url) => fetch(url)?,
    };
    Ok(raw.replace("\r\n", "\n"))
}

fn fetch(url: &str) -> Result<String, InputError> {
    let resp = reqwest::blocking::get(url)
        .map_err(|e| InputError::Http(url.to_string(), e))?;
    if !resp.status().is_success() {
        return Err(InputError::HttpStatus(url.to_string(), resp.status().as_u16()));
    }
    resp.text().map_err(|e| InputError::Http(url.to_string(), e))
}

fn normalize_url(url: &str) -> String {
    if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}
