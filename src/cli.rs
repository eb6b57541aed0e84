//! CLI struct definitions for the license-gate command-line interface.

use crate::core::report::ReportFormat;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "license-gate",
    version = env!("CARGO_PKG_VERSION"),
    about = "Fails when any source file under the root lacks the canonical license header."
)]
pub(crate) struct Cli {
    /// Directory to scan (default: `src`).
    #[clap(long)]
    pub root: Option<PathBuf>,
    /// File extension to check, with or without the leading dot (default: `rs`).
    #[clap(long)]
    pub extension: Option<String>,
    /// Read the license template from this file instead of the embedded header.
    #[clap(long)]
    pub template: Option<PathBuf>,
    /// Glob of paths (relative to root) to leave out. Repeatable.
    #[clap(long, value_name = "GLOB")]
    pub exclude: Vec<String>,
    /// Config file (default: `license-gate.toml` when present).
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Output format.
    #[clap(long, value_enum, default_value = "text")]
    pub format: ReportFormat,
    /// Number of worker threads.
    #[clap(long)]
    pub jobs: Option<usize>,
    /// Print the license template in effect and exit.
    #[clap(long)]
    pub print_template: bool,
    /// Debug-level diagnostics on stderr.
    #[clap(long, short = 'v')]
    pub verbose: bool,
}
