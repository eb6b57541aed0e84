//! Verdict aggregation and the gate report.
//!
//! Text mode writes one line per file in discovery order, then exactly one
//! summary line. JSON mode writes a single document with the same data,
//! including why each failed file failed.

use crate::core::matcher::FileVerdict;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const PASS_GLYPH: &str = "✔";
const FAIL_GLYPH: &str = "❌";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    AllPassed,
    SomeFailed,
}

/// Aggregate over every verdict of one run.
#[derive(Debug, Clone)]
pub struct RunResult {
    verdicts: Vec<FileVerdict>,
}

impl RunResult {
    pub fn new(verdicts: Vec<FileVerdict>) -> Self {
        Self { verdicts }
    }

    pub fn verdicts(&self) -> &[FileVerdict] {
        &self.verdicts
    }

    /// Vacuously true when nothing was checked.
    pub fn all_passed(&self) -> bool {
        self.verdicts.iter().all(|v| v.passed)
    }

    pub fn checked(&self) -> usize {
        self.verdicts.len()
    }

    pub fn failed(&self) -> usize {
        self.verdicts.iter().filter(|v| !v.passed).count()
    }

    pub fn outcome(&self) -> Outcome {
        if self.all_passed() {
            Outcome::AllPassed
        } else {
            Outcome::SomeFailed
        }
    }

    /// Process exit status for this run.
    pub fn exit_code(&self) -> u8 {
        match self.outcome() {
            Outcome::AllPassed => 0,
            Outcome::SomeFailed => 1,
        }
    }
}

pub fn verdict_line(verdict: &FileVerdict) -> String {
    if verdict.passed {
        format!(
            "{} {} contains the expected license",
            PASS_GLYPH.bright_green(),
            verdict.path.display()
        )
    } else {
        format!(
            "{} {} does NOT contain the expected license",
            FAIL_GLYPH.bright_red(),
            verdict.path.display()
        )
    }
}

pub fn summary_line(result: &RunResult) -> String {
    match (result.outcome(), result.checked()) {
        (Outcome::AllPassed, 0) => format!("{} No files to check", PASS_GLYPH.bright_green()),
        (Outcome::AllPassed, n) => format!(
            "{} All {} file(s) contain the expected license",
            PASS_GLYPH.bright_green(),
            n
        ),
        (Outcome::SomeFailed, n) => format!(
            "{} {} of {} file(s) do NOT contain the expected license",
            FAIL_GLYPH.bright_red(),
            result.failed(),
            n
        ),
    }
}

/// Emit the text report and build the RunResult.
pub fn aggregate<W: Write>(verdicts: Vec<FileVerdict>, out: &mut W) -> io::Result<RunResult> {
    for verdict in &verdicts {
        writeln!(out, "{}", verdict_line(verdict))?;
    }
    let result = RunResult::new(verdicts);
    writeln!(out, "{}", summary_line(&result))?;
    Ok(result)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    root: &'a Path,
    extension: &'a str,
    template: String,
    checked: usize,
    failed: usize,
    all_passed: bool,
    files: &'a [FileVerdict],
}

/// Emit the JSON report and build the RunResult.
///
/// The document is rendered in full before anything is written, so a
/// serialization failure leaves `out` untouched.
pub fn aggregate_json<W: Write>(
    verdicts: Vec<FileVerdict>,
    context: &ReportContext,
    out: &mut W,
) -> io::Result<RunResult> {
    let result = RunResult::new(verdicts);
    let report = JsonReport {
        root: &context.root,
        extension: &context.extension,
        template: context.template.clone(),
        checked: result.checked(),
        failed: result.failed(),
        all_passed: result.all_passed(),
        files: result.verdicts(),
    };
    let mut doc = serde_json::to_vec_pretty(&report).map_err(io::Error::other)?;
    doc.push(b'\n');
    out.write_all(&doc)?;
    Ok(result)
}

/// Run-level facts echoed in the JSON report.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub root: PathBuf,
    pub extension: String,
    pub template: String,
}
