//! Error types for the fsv-walker crate.
//!
//! This module provides the [`WalkError`] type for errors that can occur
//! while constructing a walker or enumerating directories.

use camino::Utf8PathBuf;

/// Errors that can occur during a walk.
///
/// # Error Recovery Strategy
///
/// - **Fatal** (`InvalidArgument`, `ReadDir`): the walk ends. Enumeration
///   failures are yielded once by the iterator, which is exhausted afterwards.
/// - **Recoverable** (`NonUtf8Path`): only that entry is skipped; the walk
///   continues with its siblings.
///
/// # Examples
///
/// ```
/// use fsv_walker::WalkError;
///
/// fn handle_error(err: WalkError) {
///     match err {
///         WalkError::InvalidArgument(msg) => eprintln!("Bad argument: {msg}"),
///         WalkError::ReadDir { path, .. } => eprintln!("Cannot read: {path}"),
///         WalkError::NonUtf8Path(p) => eprintln!("Invalid path: {}", p.display()),
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// The walker was constructed with an invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Failed to enumerate a directory.
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        /// The directory that couldn't be enumerated.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),
}

impl WalkError {
    /// Creates a new [`WalkError::InvalidArgument`] error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a new [`WalkError::ReadDir`] error.
    #[inline]
    pub fn read_dir(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::ReadDir {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this error ends the walk.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::NonUtf8Path(_))
    }

    /// Returns the directory associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::ReadDir { path, .. } => Some(path),
            Self::InvalidArgument(_) | Self::NonUtf8Path(_) => None,
        }
    }
}
