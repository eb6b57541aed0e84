//! Candidate file discovery.
//!
//! Walks the root once, in file-name order at every level, and keeps every
//! file whose extension equals the configured one. Symlinks are followed.
//! Nothing is left out unless an exclude glob names it.

use crate::core::error::LicenseGateError;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Selection predicate applied to every file under the root.
#[derive(Debug, Clone)]
pub struct Selection {
    extension: String,
    exclude: Vec<String>,
}

impl Selection {
    /// `extension` may be given with or without a leading `.`.
    pub fn new(extension: &str, exclude: Vec<String>) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
            exclude,
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    fn wants_extension(&self, path: &Path) -> bool {
        path.extension() == Some(OsStr::new(&self.extension))
    }

    fn is_excluded(&self, relative: &str) -> bool {
        self.exclude.iter().any(|p| glob_match(p, relative))
    }
}

/// List every selected file under `root`.
pub fn discover(root: &Path, selection: &Selection) -> Result<Vec<PathBuf>, LicenseGateError> {
    let meta = fs::metadata(root).map_err(|e| {
        LicenseGateError::DiscoveryError(format!(
            "root {} is not accessible: {}",
            root.display(),
            e
        ))
    })?;
    if !meta.is_dir() {
        return Err(LicenseGateError::DiscoveryError(format!(
            "root {} is not a directory",
            root.display()
        )));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| keep_entry(root, e, selection));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.loop_ancestor().is_some() => {
                // Everything below a looping link is already walked via its ancestor.
                tracing::debug!(error = %e, "symlink loop");
                continue;
            }
            Err(e) => match dangling_link(&e) {
                // Kept as a candidate so the check reports it as unreadable.
                Some(path) => {
                    if selection.wants_extension(&path)
                        && !selection.is_excluded(&relative_key(root, &path))
                    {
                        tracing::warn!(path = %path.display(), "dangling symlink");
                        files.push(path);
                    }
                    continue;
                }
                None => {
                    let at = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| root.display().to_string());
                    return Err(LicenseGateError::DiscoveryError(format!(
                        "cannot read {}: {}",
                        at, e
                    )));
                }
            },
        };
        // Non-regular files are kept too; the check reports them as unreadable.
        if !entry.file_type().is_dir() && selection.wants_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    tracing::debug!(
        root = %root.display(),
        extension = selection.extension(),
        count = files.len(),
        "discovered files"
    );
    Ok(files)
}

fn keep_entry(root: &Path, entry: &DirEntry, selection: &Selection) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    let relative = relative_key(root, entry.path());
    if selection.is_excluded(&relative) {
        tracing::debug!(path = %relative, "excluded");
        return false;
    }
    true
}

/// The link path when `err` comes from a symlink whose target is gone.
fn dangling_link(err: &walkdir::Error) -> Option<PathBuf> {
    let path = err.path()?;
    let meta = fs::symlink_metadata(path).ok()?;
    (meta.file_type().is_symlink() && fs::metadata(path).is_err()).then(|| path.to_path_buf())
}

/// Path relative to root with `/` separators, the form exclude globs are written in.
fn relative_key(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Minimal glob: `**` spans directories, `*` stays within one segment.
/// A pattern naming a directory also excludes everything below it.
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern = pattern.trim_end_matches('/');
    if pattern.is_empty() {
        return false;
    }
    if glob_here(pattern.as_bytes(), text.as_bytes()) {
        return true;
    }
    // A bare file name without `/` matches at any depth.
    if !pattern.contains('/') {
        if let Some(name) = text.rsplit('/').next() {
            return glob_here(pattern.as_bytes(), name.as_bytes());
        }
    }
    false
}

fn glob_here(p: &[u8], t: &[u8]) -> bool {
    match p {
        [] => t.is_empty(),
        [b'*', b'*', b'/', rest @ ..] => {
            glob_here(rest, t)
                || t.iter()
                    .enumerate()
                    .filter(|&(_, &c)| c == b'/')
                    .any(|(i, _)| glob_here(rest, &t[i + 1..]))
        }
        [b'*', b'*', rest @ ..] => (0..=t.len()).any(|i| glob_here(rest, &t[i..])),
        [b'*', rest @ ..] => (0..=t.len())
            .take_while(|&i| i == 0 || t[i - 1] != b'/')
            .any(|i| glob_here(rest, &t[i..])),
        [c, rest @ ..] => t.first() == Some(c) && glob_here(rest, &t[1..]),
    }
}
