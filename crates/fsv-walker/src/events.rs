//! Notification types delivered to walk handlers.
//!
//! # Notification Flow
//!
//! ```text
//! SearchStarted
//!     │
//!     ├── per subdirectory: DirectoryFound ──► predicate ──► FilteredDirectoryFound
//!     │                                                        │
//!     │                                            yield + descend (nested level)
//!     │
//!     ├── per file:         FileFound ──► predicate ──► FilteredFileFound ──► yield
//!     │
//! SearchFinished
//! ```
//!
//! Every `*Found` notification carries a fresh [`Visit`]; handlers steer the
//! walk by setting its `abort` or `exclude` flag.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// The kind of entry notification a [`Visit`] was created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitKind {
    /// A subdirectory was enumerated.
    DirectoryFound,
    /// A subdirectory passed the predicate.
    FilteredDirectoryFound,
    /// A file was enumerated.
    FileFound,
    /// A file passed the predicate.
    FilteredFileFound,
}

impl VisitKind {
    /// All kinds, in the order a single directory entry can see them.
    pub const ALL: [Self; 4] = [
        Self::DirectoryFound,
        Self::FilteredDirectoryFound,
        Self::FileFound,
        Self::FilteredFileFound,
    ];

    /// Returns a stable index for per-kind tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::DirectoryFound => 0,
            Self::FilteredDirectoryFound => 1,
            Self::FileFound => 2,
            Self::FilteredFileFound => 3,
        }
    }

    /// Human-readable label, as printed by the entry point.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsv_walker::VisitKind;
    ///
    /// assert_eq!(VisitKind::FilteredFileFound.label(), "Filtered file found");
    /// ```
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DirectoryFound => "Directory found",
            Self::FilteredDirectoryFound => "Filtered directory found",
            Self::FileFound => "File found",
            Self::FilteredFileFound => "Filtered file found",
        }
    }
}

/// Payload-free notifications bracketing each directory level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchEvent {
    /// A directory level is about to be expanded.
    Started,
    /// A directory level has been fully processed (or aborted).
    Finished,
}

/// A per-entry notification that handlers may inspect and mutate.
///
/// One `Visit` is created for each notification and dropped right after its
/// handlers ran. All handlers registered for that notification share it, so a
/// handler sees flags set by the ones registered before it.
///
/// # Examples
///
/// ```
/// use fsv_walker::{Visit, VisitKind};
/// use camino::Utf8PathBuf;
///
/// let mut visit = Visit::new(VisitKind::FileFound, Utf8PathBuf::from("docs/a.txt"));
/// assert!(!visit.is_excluded());
///
/// visit.exclude();
/// assert!(visit.is_excluded());
/// assert!(!visit.is_aborted());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    kind: VisitKind,
    path: Utf8PathBuf,
    abort: bool,
    exclude: bool,
}

impl Visit {
    /// Creates a notification for `path` with both flags cleared.
    #[inline]
    #[must_use]
    pub const fn new(kind: VisitKind, path: Utf8PathBuf) -> Self {
        Self {
            kind,
            path,
            abort: false,
            exclude: false,
        }
    }

    /// The notification kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> VisitKind {
        self.kind
    }

    /// The observed path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Stops the remaining siblings of the current level.
    #[inline]
    pub fn abort(&mut self) {
        self.abort = true;
    }

    /// Skips this entry.
    #[inline]
    pub fn exclude(&mut self) {
        self.exclude = true;
    }

    /// Returns `true` if a handler asked to abort.
    #[inline]
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        self.abort
    }

    /// Returns `true` if a handler asked to exclude this entry.
    #[inline]
    #[must_use]
    pub const fn is_excluded(&self) -> bool {
        self.exclude
    }

    /// Consumes the notification, returning the path.
    #[inline]
    #[must_use]
    pub fn into_path(self) -> Utf8PathBuf {
        self.path
    }
}
