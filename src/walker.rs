//! Discovery of candidate HTML files under a root directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::Error;

/// Candidate files plus the problems met while walking. The walk never stops
/// early: an unreadable directory or a symlink cycle only abandons that branch.
#[derive(Debug, Default)]
pub struct Walk {
    /// Directory-level failures, in the order they were met.
    pub errors: Vec<Error>,
    /// Candidate HTML files, in walk order.
    pub files: Vec<PathBuf>,
}

/// Recursively collect files under `root` whose extension is a configured
/// HTML extension, following symlinks and skipping excluded prefixes.
///
/// Entries are visited sorted by file name, so the result is deterministic.
/// A file reachable through several paths (via symlinked directories or file
/// symlinks) is listed once, under the first path met.
pub fn find_html_files(root: &Path, config: &Config) -> Walk {
    let mut walk = Walk::default();
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let entries = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| return entry.depth() == 0 || is_included(root, entry, config));

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let error = classify_walk_error(root, &e);
                // A broken link to a non-candidate (an image, say) is not our concern.
                if !matches!(&error, Error::FileRead { path, .. } if !config.is_candidate(path)) {
                    walk.errors.push(error);
                }
                continue;
            },
        };
        if !entry.file_type().is_file() || !config.is_candidate(entry.path()) {
            continue;
        }
        let identity = std::fs::canonicalize(entry.path()).unwrap_or_else(|_| return entry.path().to_path_buf());
        if seen.insert(identity) {
            walk.files.push(entry.into_path());
        }
    }

    return walk;
}

/// Whether an entry survives the exclude prefixes. Directories are matched
/// with a trailing `/` so that an excluded subtree is never descended into.
fn is_included(root: &Path, entry: &DirEntry, config: &Config) -> bool {
    let relative = entry.path().strip_prefix(root).unwrap_or_else(|_| return entry.path());
    let mut relative_str = to_slash_path(relative);
    if entry.file_type().is_dir() {
        relative_str.push('/');
    }
    return config.should_scan(&relative_str);
}

/// Render a relative path with `/` separators regardless of platform.
fn to_slash_path(path: &Path) -> String {
    return path
        .components()
        .map(|c| return c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
}

/// Map a walk failure onto the crate error taxonomy. Only an entry that is
/// still a directory is reported as unlistable; a dangling symlink or a file
/// whose metadata cannot be read is a read failure of that entry.
fn classify_walk_error(root: &Path, err: &walkdir::Error) -> Error {
    let path = err.path().unwrap_or(root).to_path_buf();
    if let Some(ancestor) = err.loop_ancestor() {
        return Error::CircularSymlink { ancestor: ancestor.to_path_buf(), path };
    }
    let reason = err.io_error().map_or_else(|| return err.to_string(), ToString::to_string);
    let is_symlink = std::fs::symlink_metadata(&path).is_ok_and(|m| return m.file_type().is_symlink());
    let target = std::fs::metadata(&path);
    if is_symlink && target.is_err() {
        return Error::FileRead { path, reason: format!("broken symlink: {reason}") };
    }
    if target.is_ok_and(|m| return !m.is_dir()) {
        return Error::FileRead { path, reason };
    }
    return Error::DirectoryAccess { path, reason };
}
