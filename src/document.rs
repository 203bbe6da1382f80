//! Whole-file reading and atomic write-back of HTML documents.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// One HTML file: its path as found by the walker and its full text.
#[derive(Debug)]
pub struct Document {
    /// Text of the file, decoded as UTF-8.
    pub content: String,
    /// Path the file was found under. Relative references resolve against its parent.
    pub path: PathBuf,
}

impl Document {
    /// Read a whole file and decode it as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns `Error::FileRead` if the file cannot be read or is not valid UTF-8.
    pub fn read(path: &Path) -> Result<Self, Error> {
        let bytes = std::fs::read(path).map_err(|e| {
            return Error::FileRead { path: path.to_path_buf(), reason: e.to_string() };
        })?;
        let content = String::from_utf8(bytes).map_err(|e| {
            return Error::FileRead {
                path: path.to_path_buf(),
                reason: format!("not valid UTF-8 ({e})"),
            };
        })?;
        return Ok(Self { content, path: path.to_path_buf() });
    }

    /// Replace the file's content with `content`, all or nothing.
    ///
    /// The new text goes to a temporary file next to the real target (symlinks
    /// are resolved first, so a linked document stays a link), takes over the
    /// original permissions, and is renamed over the target. Read-only files
    /// are refused. On failure the original file is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Error::FileWrite` if the file is read-only or any step fails.
    pub fn write(&self, content: &str) -> Result<(), Error> {
        let fail = |reason: String| return Error::FileWrite { path: self.path.clone(), reason };

        let target = std::fs::canonicalize(&self.path).map_err(|e| return fail(e.to_string()))?;
        let metadata = std::fs::metadata(&target).map_err(|e| return fail(e.to_string()))?;
        if metadata.permissions().readonly() {
            return Err(fail("file is read-only".to_string()));
        }
        // Probe write access without truncating; rename alone would bypass it.
        std::fs::OpenOptions::new()
            .write(true)
            .open(&target)
            .map_err(|e| return fail(e.to_string()))?;

        let dir = target
            .parent()
            .ok_or_else(|| return fail("file has no parent directory".to_string()))?;
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| return fail(e.to_string()))?;
        temp.write_all(content.as_bytes()).map_err(|e| return fail(e.to_string()))?;
        temp.as_file().sync_all().map_err(|e| return fail(e.to_string()))?;
        std::fs::set_permissions(temp.path(), metadata.permissions())
            .map_err(|e| return fail(e.to_string()))?;
        temp.persist(&target).map_err(|e| return fail(e.error.to_string()))?;

        return Ok(());
    }
}
