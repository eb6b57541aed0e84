//! Header containment check for a single file.

use crate::core::normalize::normalize;
use crate::core::template::LicenseTemplate;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Why a file failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum FailureReason {
    Mismatch,
    Unreadable(String),
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mismatch => write!(f, "license header missing or altered"),
            Self::Unreadable(msg) => write!(f, "unreadable: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileVerdict {
    pub path: PathBuf,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
}

impl FileVerdict {
    pub fn pass(path: PathBuf) -> Self {
        Self {
            path,
            passed: true,
            reason: None,
        }
    }

    pub fn fail(path: PathBuf, reason: FailureReason) -> Self {
        Self {
            path,
            passed: false,
            reason: Some(reason),
        }
    }
}

/// True iff `template` occurs as a contiguous substring of `content`.
/// Both sides are expected to be normalized already.
pub fn matches(content: &str, template: &str) -> bool {
    content.contains(template)
}

/// Read, normalize and match one file.
///
/// A read failure becomes a failed verdict so the rest of the tree still
/// gets reported.
pub fn check_file(path: &Path, template: &LicenseTemplate) -> FileVerdict {
    let bytes = match read_regular(path) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read file");
            return FileVerdict::fail(
                path.to_path_buf(),
                FailureReason::Unreadable(e.to_string()),
            );
        }
    };

    let content = String::from_utf8_lossy(&bytes);
    if matches(&normalize(&content), template.as_str()) {
        FileVerdict::pass(path.to_path_buf())
    } else {
        FileVerdict::fail(path.to_path_buf(), FailureReason::Mismatch)
    }
}

/// Read a regular file; a FIFO or directory would block or fail mid-read.
fn read_regular(path: &Path) -> io::Result<Vec<u8>> {
    if !fs::metadata(path)?.is_file() {
        return Err(io::Error::other("not a regular file"));
    }
    fs::read(path)
}
