//! The gate pipeline: discover, check every file, collect verdicts.

use crate::core::discover::{Selection, discover};
use crate::core::error::LicenseGateError;
use crate::core::matcher::{FileVerdict, check_file};
use crate::core::template::LicenseTemplate;
use rayon::prelude::*;
use std::path::Path;

/// Check every selected file under `root` against `template`.
///
/// Verdicts come back in discovery order regardless of how many workers
/// ran. `jobs = Some(n)` pins a dedicated pool of `n` threads.
pub fn run_check(
    root: &Path,
    selection: &Selection,
    template: &LicenseTemplate,
    jobs: Option<usize>,
) -> Result<Vec<FileVerdict>, LicenseGateError> {
    let files = discover(root, selection)?;

    let check_all = || -> Vec<FileVerdict> {
        files
            .par_iter()
            .map(|path| check_file(path, template))
            .collect()
    };

    let verdicts = match jobs {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .map_err(|e| {
                LicenseGateError::ConfigurationError(format!("cannot start {} worker(s): {}", n, e))
            })?
            .install(check_all),
        None => check_all(),
    };

    debug_assert_eq!(verdicts.len(), files.len());
    tracing::debug!(
        checked = verdicts.len(),
        failed = verdicts.iter().filter(|v| !v.passed).count(),
        "check complete"
    );
    Ok(verdicts)
}
