//! license-gate: a license-compliance gate for CI.
//!
//! Every source file under a root must contain the canonical license header,
//! byte for byte once carriage returns are stripped. The gate prints one line
//! per file, a summary, and exits non-zero when any file fails.
//!
//! # Pipeline
//!
//! template → normalize; discover → read + normalize → match → report
//!
//! - [`core::template`]: the canonical header (embedded, or loaded from a file)
//! - [`core::normalize`]: carriage-return removal
//! - [`core::discover`]: sorted recursive walk filtered by extension
//! - [`core::matcher`]: containment check and per-file verdicts
//! - [`core::report`]: per-file lines, summary, exit status
//!
//! A missing root or template aborts the run. A file that cannot be read is
//! reported as a failure and the run carries on.
//!
//! # Examples
//!
//! ```bash
//! # Check src/**/*.rs against the embedded header
//! license-gate
//!
//! # Another tree and suffix, machine-readable output
//! license-gate --root lib --extension py --format json
//! ```

pub mod core;
mod cli;

use cli::Cli;
use crate::core::{
    check,
    config::{self, GateConfig, Overrides},
    discover::Selection,
    error::LicenseGateError,
    report::{self, ReportContext, ReportFormat, RunResult},
    template::LicenseTemplate,
};

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`tracing_subscriber::EnvFilter` syntax).
pub const LOG_ENV: &str = "LICENSE_GATE_LOG";

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .with_env_filter(filter)
        .try_init();
}

/// Run the gate once.
///
/// Returns `None` when only the template was printed. A failing gate is not
/// an error here; callers take the exit status from [`RunResult::exit_code`].
pub fn run() -> Result<Option<RunResult>, LicenseGateError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let current_dir = std::env::current_dir()?;
    let file_config = config::load_file_config(cli.config.as_deref(), &current_dir)?;
    let cfg = GateConfig::resolve(
        file_config,
        Overrides {
            root: cli.root,
            extension: cli.extension,
            template: cli.template,
            exclude: cli.exclude,
            jobs: cli.jobs,
        },
    )?;

    let template = match &cfg.template {
        Some(path) => LicenseTemplate::from_file(path)?,
        None => LicenseTemplate::canonical(),
    };
    tracing::debug!(
        source = %template.source(),
        lines = template.line_count(),
        bytes = template.as_str().len(),
        "license template loaded"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.print_template {
        out.write_all(template.as_str().as_bytes())?;
        out.flush()?;
        return Ok(None);
    }

    let selection = Selection::new(&cfg.extension, cfg.exclude.clone());
    let verdicts = check::run_check(&cfg.root, &selection, &template, cfg.jobs)?;

    let result = match cli.format {
        ReportFormat::Text => report::aggregate(verdicts, &mut out)?,
        ReportFormat::Json => {
            let context = ReportContext {
                root: cfg.root.clone(),
                extension: selection.extension().to_string(),
                template: template.source().to_string(),
            };
            report::aggregate_json(verdicts, &context, &mut out)?
        }
    };
    out.flush()?;
    Ok(Some(result))
}
