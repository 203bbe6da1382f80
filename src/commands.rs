//! Core CLI commands for casefix: fix, check, resolve.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::Config;
use crate::document::Document;
use crate::error;
use crate::report::{FileReport, OutputFormat, RunReport};
use crate::resolver;
use crate::rewriter;
use crate::types::ReplaceStrategy;
use crate::walker;

/// Whether changed documents are written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Report what would change without touching any file.
    Check,
    /// Write corrected documents back in place.
    Fix,
}

/// Report which documents have mis-cased references, without writing.
/// Exit code priority: failures (2) > corrections pending (1) > clean (0).
///
/// # Errors
///
/// Returns fatal errors only: a bad root directory or a malformed config.
pub fn check(
    root: &Path,
    strategy: Option<ReplaceStrategy>,
    format: OutputFormat,
) -> Result<ExitCode, error::Error> {
    let report = run(root, Mode::Check, strategy)?;
    report.print(format, "PENDING")?;

    if !report.failures.is_empty() {
        return Ok(ExitCode::from(2));
    } else if !report.files.is_empty() {
        return Ok(ExitCode::from(1));
    } else {
        return Ok(ExitCode::SUCCESS);
    }
}

/// Correct mis-cased references in every HTML file under `root`.
/// Exits 2 if any file or directory failed, 0 otherwise.
///
/// # Errors
///
/// Returns fatal errors only: a bad root directory or a malformed config.
pub fn fix(
    root: &Path,
    strategy: Option<ReplaceStrategy>,
    format: OutputFormat,
) -> Result<ExitCode, error::Error> {
    let report = run(root, Mode::Fix, strategy)?;
    report.print(format, "FIXED")?;

    if report.failures.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }
    return Ok(ExitCode::from(2));
}

/// Read one document, correct it, and write it back if it changed (in `Fix`
/// mode). Returns `None` when the document needs no change.
///
/// # Errors
///
/// Returns `Error::FileRead` or `Error::FileWrite`; the file on disk is
/// left as it was in either case.
pub fn process_file(
    path: &Path,
    config: &Config,
    mode: Mode,
) -> Result<Option<FileReport>, error::Error> {
    let document = Document::read(path)?;
    let rewrite = rewriter::rewrite(&document.content, &document.path, config);
    if rewrite.content == document.content {
        return Ok(None);
    }

    if mode == Mode::Fix {
        document.write(&rewrite.content)?;
    }

    return Ok(Some(FileReport { corrections: rewrite.corrections, path: document.path }));
}

/// Print the case-correct form of a path, resolving every segment.
/// Relative paths resolve against the current directory. Exits 1 if some
/// segment has no match.
///
/// # Errors
///
/// Never fails; resolution misses are reported through the exit code.
pub fn resolve(path: &str) -> Result<ExitCode, error::Error> {
    let (base, relative, prefix) = match path.strip_prefix('/') {
        Some(rest) => (Path::new("/"), rest, "/"),
        None => (Path::new("."), path, ""),
    };

    let Some(corrected) = resolver::resolve_relative(base, relative) else {
        eprintln!("not found: {path}");
        return Ok(ExitCode::from(1));
    };
    println!("{prefix}{corrected}");

    return Ok(ExitCode::SUCCESS);
}

/// Walk `root` and process every candidate file, collecting outcomes.
/// Per-file and per-directory failures are recorded, never propagated.
///
/// # Errors
///
/// Returns `Error::RootNotFound` / `Error::NotADirectory` for a bad root,
/// or config loading errors, before any file is touched.
pub fn run(
    root: &Path,
    mode: Mode,
    strategy: Option<ReplaceStrategy>,
) -> Result<RunReport, error::Error> {
    ensure_root_directory(root)?;
    let mut config = Config::load(root)?;
    if let Some(strategy) = strategy {
        config.strategy = strategy;
    }

    let walk = walker::find_html_files(root, &config);
    let mut report = RunReport::default();
    for e in &walk.errors {
        report.record_failure(e);
    }

    for path in &walk.files {
        report.files_scanned = report.files_scanned.saturating_add(1);
        match process_file(path, &config, mode) {
            Ok(Some(file)) => report.files.push(file),
            Ok(None) => {},
            Err(e) => report.record_failure(&e),
        }
    }

    return Ok(report);
}

/// Fail fast when the root is missing or is not a directory.
///
/// # Errors
///
/// Returns `Error::RootNotFound`, `Error::NotADirectory`, or `Error::Io`.
fn ensure_root_directory(root: &Path) -> Result<(), error::Error> {
    let metadata = match std::fs::metadata(root) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(error::Error::RootNotFound { path: PathBuf::from(root) });
        },
        Err(e) => return Err(error::Error::Io(e)),
    };
    if !metadata.is_dir() {
        return Err(error::Error::NotADirectory { path: PathBuf::from(root) });
    }
    return Ok(());
}
