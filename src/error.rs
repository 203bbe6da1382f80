/// Crate-level error types for casefix diagnostics.
use std::path::PathBuf;

/// All errors in casefix carry the path they concern, so a per-file report
/// line is useful on its own. Resolution misses are not errors and never
/// appear here.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Following a symlink led back to one of its own ancestors.
    #[error("symlink cycle: {} points back to {}", path.display(), ancestor.display())]
    CircularSymlink {
        /// Directory that closes the loop.
        ancestor: PathBuf,
        /// Path of the symlink that was followed.
        path: PathBuf,
    },

    /// A directory could not be listed while walking the tree.
    #[error("cannot read directory {}: {reason}", path.display())]
    DirectoryAccess {
        /// Directory (or entry) that could not be accessed.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// A candidate HTML file could not be read or is not valid UTF-8, or a
    /// walked entry (such as a dangling symlink) could not be stat'ed.
    #[error("cannot read {}: {reason}", path.display())]
    FileRead {
        /// File that could not be read.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Corrections were found but the file could not be written back.
    #[error("cannot write {}: {reason}", path.display())]
    FileWrite {
        /// File that could not be written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization of the run report failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// The root path exists but is not a directory.
    #[error("not a directory: {}", path.display())]
    NotADirectory {
        /// The root path given on the command line.
        path: PathBuf,
    },

    /// The root path does not exist.
    #[error("directory not found: {}", path.display())]
    RootNotFound {
        /// The root path given on the command line.
        path: PathBuf,
    },

    /// TOML deserialization of `.casefix.toml` failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}

impl Error {
    /// Path this error concerns, if it is a per-file or per-directory error.
    pub fn path(&self) -> Option<&std::path::Path> {
        return match self {
            Error::CircularSymlink { path, .. }
            | Error::DirectoryAccess { path, .. }
            | Error::FileRead { path, .. }
            | Error::FileWrite { path, .. }
            | Error::NotADirectory { path }
            | Error::RootNotFound { path } => Some(path),
            Error::Io(_) | Error::Json(_) | Error::TomlDe(_) => None,
        };
    }
}
