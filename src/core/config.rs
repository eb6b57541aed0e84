//! Gate configuration.
//!
//! Built-in defaults, overridden by `license-gate.toml`, overridden by flags.

use crate::core::error::LicenseGateError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "license-gate.toml";
pub const DEFAULT_ROOT: &str = "src";
pub const DEFAULT_EXTENSION: &str = "rs";

/// Contents of `license-gate.toml`. Every key is optional.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub root: Option<PathBuf>,
    pub extension: Option<String>,
    pub template: Option<PathBuf>,
    #[serde(default)]
    pub exclude: Vec<String>,
    pub jobs: Option<usize>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    pub root: PathBuf,
    pub extension: String,
    pub template: Option<PathBuf>,
    pub exclude: Vec<String>,
    pub jobs: Option<usize>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            extension: DEFAULT_EXTENSION.to_string(),
            template: None,
            exclude: Vec::new(),
            jobs: None,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub extension: Option<String>,
    pub template: Option<PathBuf>,
    pub exclude: Vec<String>,
    pub jobs: Option<usize>,
}

/// Load the config file.
///
/// An explicit path must exist. Without one, `license-gate.toml` in `dir` is
/// used when present; no file means defaults.
pub fn load_file_config(
    explicit: Option<&Path>,
    dir: &Path,
) -> Result<FileConfig, LicenseGateError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = dir.join(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                return Ok(FileConfig::default());
            }
            p
        }
    };

    let content = fs::read_to_string(&path).map_err(|e| {
        LicenseGateError::ConfigurationError(format!("cannot read {}: {}", path.display(), e))
    })?;
    let config: FileConfig = toml::from_str(&content).map_err(|e| {
        LicenseGateError::ConfigurationError(format!("invalid {}: {}", path.display(), e))
    })?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

impl GateConfig {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self, LicenseGateError> {
        let defaults = GateConfig::default();
        let mut exclude = file.exclude;
        exclude.extend(overrides.exclude);

        let extension = overrides
            .extension
            .or(file.extension)
            .unwrap_or(defaults.extension);
        if extension.trim_start_matches('.').is_empty() {
            return Err(LicenseGateError::ConfigurationError(
                "extension must not be empty".into(),
            ));
        }

        let jobs = overrides.jobs.or(file.jobs);
        if jobs == Some(0) {
            return Err(LicenseGateError::ConfigurationError(
                "jobs must be at least 1".into(),
            ));
        }

        Ok(Self {
            root: overrides.root.or(file.root).unwrap_or(defaults.root),
            extension,
            template: overrides.template.or(file.template),
            exclude,
            jobs,
        })
    }
}
