//! Canonical license header.
//!
//! The default header is baked into the binary from `assets/license_header.txt`,
//! so a plain run needs no external files. An alternative template can be
//! loaded from disk for projects that carry a different notice.

use crate::core::error::LicenseGateError;
use crate::core::normalize::normalize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CANONICAL_HEADER: &str = include_str!("../../assets/license_header.txt");

/// Where a template came from, for diagnostics and the JSON report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Embedded,
    File(PathBuf),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The header every checked file must contain. Stored already normalized.
#[derive(Debug, Clone)]
pub struct LicenseTemplate {
    text: String,
    source: TemplateSource,
}

impl LicenseTemplate {
    pub fn canonical() -> Self {
        Self::new(CANONICAL_HEADER, TemplateSource::Embedded)
    }

    pub fn from_file(path: &Path) -> Result<Self, LicenseGateError> {
        let bytes = fs::read(path).map_err(|e| {
            LicenseGateError::ConfigurationError(format!(
                "cannot load license template {}: {}",
                path.display(),
                e
            ))
        })?;
        let text = String::from_utf8(bytes).map_err(|_| {
            LicenseGateError::ConfigurationError(format!(
                "license template {} is not valid UTF-8",
                path.display()
            ))
        })?;
        Ok(Self::new(&text, TemplateSource::File(path.to_path_buf())))
    }

    fn new(raw: &str, source: TemplateSource) -> Self {
        let text = normalize(raw).into_owned();
        if text.is_empty() {
            tracing::warn!(%source, "license template is empty; every file will pass");
        }
        Self { text, source }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}
