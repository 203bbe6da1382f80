//! Run summary: which files changed, how, and what failed.

use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::Error;
use crate::types::Correction;

/// Output format for the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// A serialised `RunReport` on stdout.
    Json,
    /// One line per file and correction, then a summary line.
    #[default]
    Text,
}

/// A file and the corrections found in it.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Corrections in document order.
    pub corrections: Vec<Correction>,
    /// File as found by the walker.
    pub path: PathBuf,
}

/// A per-file or per-directory failure that did not stop the run.
#[derive(Debug, Serialize)]
pub struct Failure {
    /// Rendered error message.
    pub message: String,
    /// File or directory concerned, when known.
    pub path: Option<PathBuf>,
}

/// Everything a `fix` or `check` run did.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    /// Failures, in the order they happened.
    pub failures: Vec<Failure>,
    /// Files whose content changed (or would change, in `check`).
    pub files: Vec<FileReport>,
    /// Number of candidate files examined.
    pub files_scanned: usize,
}

impl RunReport {
    /// Record a failure and echo it to stderr straight away.
    pub fn record_failure(&mut self, error: &Error) {
        eprintln!("error: {error}");
        self.failures.push(Failure {
            message: error.to_string(),
            path: error.path().map(std::path::Path::to_path_buf),
        });
        return;
    }

    /// Print the report to stdout. `label` tags each changed file
    /// (`FIXED` after writing, `PENDING` for a dry run).
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if the report cannot be serialised.
    pub fn print(&self, format: OutputFormat, label: &str) -> Result<(), Error> {
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(self)?),
            OutputFormat::Text => print!("{}", self.render_text(label)),
        }
        return Ok(());
    }

    /// Render the plain-text form of the report.
    pub fn render_text(&self, label: &str) -> String {
        let mut out = String::new();
        for file in &self.files {
            let _ = writeln!(out, "{label:<8}{}", file.path.display());
            for c in &file.corrections {
                let _ = writeln!(out, "    {}: {} -> {}", c.attribute, c.original, c.corrected);
            }
        }
        let changed = if label == "PENDING" { "to rewrite" } else { "rewritten" };
        let _ = writeln!(
            out,
            "{} files scanned, {} {changed}, {} failed",
            self.files_scanned,
            self.files.len(),
            self.failures.len(),
        );
        return out;
    }
}
