//! Case-insensitive lookup of filesystem entries.
//!
//! Nothing is cached: every call lists the directories it needs afresh.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::types::ResolvedPath;

/// Find the on-disk entry whose name matches the file name of `path` ignoring
/// case, looking only in the parent directory of `path`.
///
/// The parent directory is listed once. An entry with identical case wins over
/// other case-insensitive matches; otherwise the first match in listing order
/// is returned. A parent that is missing or unreadable yields
/// `ResolvedPath::NotFound`, as does a listing that fails part-way.
pub fn resolve(path: &Path) -> ResolvedPath {
    let Some(target) = path.file_name() else {
        return ResolvedPath::NotFound;
    };
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let Ok(entries) = std::fs::read_dir(parent) else {
        return ResolvedPath::NotFound;
    };

    let mut first_match: Option<PathBuf> = None;
    for entry in entries {
        let Ok(entry) = entry else {
            return ResolvedPath::NotFound;
        };
        let name = entry.file_name();
        if name.as_os_str() == target {
            return ResolvedPath::Found(path.with_file_name(name));
        }
        if first_match.is_none() && names_match(&name, target) {
            first_match = Some(path.with_file_name(name));
        }
    }

    return first_match.map_or(ResolvedPath::NotFound, ResolvedPath::Found);
}

/// Resolve a `/`-separated relative reference against `base_dir` one segment
/// at a time, returning the reference rewritten with on-disk casing.
///
/// Empty and `.` segments are kept as written. `..` is kept as written and
/// moves up lexically, the way a web server normalises a URL. Returns `None`
/// as soon as a segment has no match or its on-disk name is not UTF-8.
pub fn resolve_relative(base_dir: &Path, reference: &str) -> Option<String> {
    let mut cursor = base_dir.to_path_buf();
    let mut corrected: Vec<String> = Vec::new();

    for segment in reference.split('/') {
        match segment {
            "" | "." => corrected.push(segment.to_string()),
            ".." => {
                step_up(&mut cursor);
                corrected.push(segment.to_string());
            },
            name => {
                let ResolvedPath::Found(actual) = resolve(&cursor.join(name)) else {
                    return None;
                };
                corrected.push(actual.file_name()?.to_str()?.to_string());
                cursor = actual;
            },
        }
    }

    return Some(corrected.join("/"));
}

/// Compare two file names ignoring case.
///
/// UTF-8 names are folded per code point with Unicode lowercase mapping, which
/// does not depend on the process locale. Names that are not UTF-8 fall back
/// to an ASCII-only fold over their raw bytes.
pub fn names_match(a: &OsStr, b: &OsStr) -> bool {
    return match (a.to_str(), b.to_str()) {
        (Some(a), Some(b)) => fold_case(a).eq(fold_case(b)),
        _ => a.as_encoded_bytes().eq_ignore_ascii_case(b.as_encoded_bytes()),
    };
}

/// Lowercase code points of `name`, one folded char at a time.
fn fold_case(name: &str) -> impl Iterator<Item = char> + '_ {
    return name.chars().flat_map(char::to_lowercase);
}

/// Move `cursor` to its parent without touching the filesystem.
/// Keeps a leading `..` when there is no named component left to pop.
fn step_up(cursor: &mut PathBuf) {
    if matches!(cursor.components().next_back(), Some(Component::Normal(_))) {
        cursor.pop();
    } else {
        cursor.push("..");
    }
    return;
}
