//! Lazy depth-first directory traversal with notifications.
//!
//! [`TreeWalker`] holds the walk request (root, predicate, handlers) and
//! [`Walk`] is one forward pass over it. The pass is an iterator with an
//! explicit stack of directory levels, so handler calls interleave with the
//! items the consumer pulls.
//!
//! # Order Per Level
//!
//! 1. `SearchStarted`
//! 2. every subdirectory: `DirectoryFound`, then (if the predicate passes)
//!    `FilteredDirectoryFound`, yield, descend
//! 3. every file: `FileFound`, then (if the predicate passes)
//!    `FilteredFileFound`, yield
//! 4. `SearchFinished`
//!
//! Entries are sorted by file name unless [`WalkConfig::sort_entries`] is off.
//!
//! # Examples
//!
//! ```no_run
//! use fsv_walker::{SuffixFilter, TreeWalker};
//!
//! let mut walker = TreeWalker::new("./notes")?.with_filter(SuffixFilter::new(".txt"));
//! walker.on_directory_found(|visit| {
//!     if visit.path().as_str().contains("archive") {
//!         visit.exclude();
//!     }
//! });
//!
//! for path in walker.walk() {
//!     println!("{}", path?);
//! }
//! # Ok::<(), fsv_walker::WalkError>(())
//! ```

use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use camino::{Utf8Path, Utf8PathBuf};
use fsv_core::WalkConfig;
use tracing::{debug, warn};

use crate::error::WalkError;
use crate::events::{SearchEvent, Visit, VisitKind};
use crate::filter::{AcceptAll, PathFilter};
use crate::hooks::Hooks;
use crate::stats::{StatsSnapshot, WalkStats};

/// A directory walker with a predicate and notification handlers.
///
/// The root and predicate are fixed once the walker is built; handlers can
/// be registered at any time before calling [`walk`](Self::walk).
pub struct TreeWalker<'a> {
    /// The root directory to walk.
    root: Utf8PathBuf,
    /// Decides which entries are filtered in.
    filter: Box<dyn PathFilter + 'a>,
    /// Registered notification handlers.
    hooks: Hooks<'a>,
    /// Traversal settings.
    config: WalkConfig,
}

impl<'a> TreeWalker<'a> {
    /// Creates a walker for `root` that accepts every entry.
    ///
    /// The filesystem is not touched until the walk starts; a missing root
    /// surfaces as [`WalkError::ReadDir`] from the first item.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::InvalidArgument`] if `root` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsv_walker::{TreeWalker, WalkError};
    ///
    /// assert!(TreeWalker::new("./src").is_ok());
    /// assert!(matches!(TreeWalker::new(""), Err(WalkError::InvalidArgument(_))));
    /// ```
    pub fn new(root: impl Into<Utf8PathBuf>) -> Result<Self, WalkError> {
        let root = root.into();
        if root.as_str().is_empty() {
            return Err(WalkError::invalid_argument("root path must not be empty"));
        }

        Ok(Self {
            root,
            filter: Box::new(AcceptAll),
            hooks: Hooks::new(),
            config: WalkConfig::default(),
        })
    }

    /// Sets the predicate deciding which entries are filtered in.
    #[must_use]
    pub fn with_filter<F: PathFilter + 'a>(mut self, filter: F) -> Self {
        self.filter = Box::new(filter);
        self
    }

    /// Sets the predicate from a closure.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsv_walker::TreeWalker;
    ///
    /// let walker = TreeWalker::new("./docs")?
    ///     .with_predicate(|path| path.as_str().ends_with(".md"));
    /// # Ok::<(), fsv_walker::WalkError>(())
    /// ```
    #[must_use]
    pub fn with_predicate<F>(self, predicate: F) -> Self
    where
        F: Fn(&Utf8Path) -> bool + 'a,
    {
        self.with_filter(predicate)
    }

    /// Replaces the traversal settings.
    #[must_use]
    pub const fn with_config(mut self, config: WalkConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers a handler for the start of every directory level.
    pub fn on_search_started(&mut self, handler: impl FnMut() + 'a) -> &mut Self {
        self.hooks.on_search_started(handler);
        self
    }

    /// Registers a handler for the end of every directory level.
    pub fn on_search_finished(&mut self, handler: impl FnMut() + 'a) -> &mut Self {
        self.hooks.on_search_finished(handler);
        self
    }

    /// Registers a handler for the given entry notification kind.
    pub fn on_visit(&mut self, kind: VisitKind, handler: impl FnMut(&mut Visit) + 'a) -> &mut Self {
        self.hooks.on_visit(kind, handler);
        self
    }

    /// Registers a handler for every enumerated subdirectory.
    pub fn on_directory_found(&mut self, handler: impl FnMut(&mut Visit) + 'a) -> &mut Self {
        self.on_visit(VisitKind::DirectoryFound, handler)
    }

    /// Registers a handler for every subdirectory that passed the predicate.
    pub fn on_filtered_directory_found(
        &mut self,
        handler: impl FnMut(&mut Visit) + 'a,
    ) -> &mut Self {
        self.on_visit(VisitKind::FilteredDirectoryFound, handler)
    }

    /// Registers a handler for every enumerated file.
    pub fn on_file_found(&mut self, handler: impl FnMut(&mut Visit) + 'a) -> &mut Self {
        self.on_visit(VisitKind::FileFound, handler)
    }

    /// Registers a handler for every file that passed the predicate.
    pub fn on_filtered_file_found(&mut self, handler: impl FnMut(&mut Visit) + 'a) -> &mut Self {
        self.on_visit(VisitKind::FilteredFileFound, handler)
    }

    /// Starts a fresh pass from the root.
    ///
    /// Nothing happens until the returned iterator is first advanced.
    pub fn walk(&mut self) -> Walk<'_, 'a> {
        Walk {
            pending: Some(self.root.clone()),
            walker: self,
            stack: Vec::new(),
            stats: WalkStats::new(),
            done: false,
        }
    }

    /// Runs a full pass and collects the yielded paths.
    ///
    /// # Errors
    ///
    /// Returns the first [`WalkError`] the pass produced.
    pub fn collect_paths(&mut self) -> Result<Vec<Utf8PathBuf>, WalkError> {
        self.walk().collect()
    }

    /// Returns the root directory being walked.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the traversal settings.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &WalkConfig {
        &self.config
    }
}

impl std::fmt::Debug for TreeWalker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeWalker")
            .field("root", &self.root)
            .field("hooks", &self.hooks)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// An enumerated entry, or the raw path of one whose name is not UTF-8.
type Entry = Result<Utf8PathBuf, PathBuf>;

fn entry_path(entry: &Entry) -> &Path {
    match entry {
        Ok(path) => path.as_std_path(),
        Err(path) => path,
    }
}

/// One directory level on the traversal stack.
struct Level {
    dirs: std::vec::IntoIter<Entry>,
    files: std::vec::IntoIter<Entry>,
    in_dirs: bool,
}

/// What a level hands out next.
enum Step {
    Dir(Utf8PathBuf),
    File(Utf8PathBuf),
    /// An entry that cannot be reported as a UTF-8 path; it takes its turn
    /// like any sibling but is never notified or yielded.
    Unreadable(PathBuf),
    Finished,
}

impl Level {
    /// Enumerates `dir`, splitting its entries into subdirectories and files.
    fn read(dir: &Utf8Path, config: &WalkConfig) -> Result<Self, WalkError> {
        let entries = std::fs::read_dir(dir).map_err(|e| WalkError::read_dir(dir, e))?;

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| WalkError::read_dir(dir, e))?;
            let path = entry.path();
            let is_dir = if config.follow_links {
                path.is_dir()
            } else {
                entry
                    .file_type()
                    .map_err(|e| WalkError::read_dir(dir, e))?
                    .is_dir()
            };

            let path = Utf8PathBuf::from_path_buf(path);
            if is_dir {
                dirs.push(path);
            } else {
                files.push(path);
            }
        }

        // Siblings share a parent, so path order is file name order.
        if config.sort_entries {
            dirs.sort_unstable_by(|a, b| entry_path(a).cmp(entry_path(b)));
            files.sort_unstable_by(|a, b| entry_path(a).cmp(entry_path(b)));
        }

        Ok(Self {
            dirs: dirs.into_iter(),
            files: files.into_iter(),
            in_dirs: true,
        })
    }

    fn step(&mut self) -> Step {
        if self.in_dirs {
            if let Some(dir) = self.dirs.next() {
                return dir.map_or_else(Step::Unreadable, Step::Dir);
            }
            self.in_dirs = false;
        }
        self.files
            .next()
            .map_or(Step::Finished, |file| file.map_or_else(Step::Unreadable, Step::File))
    }
}

/// A single forward pass over a [`TreeWalker`].
///
/// Yields `Ok(path)` for every directory and file that passed the predicate
/// and was not excluded. On an enumeration failure it yields one `Err` and is
/// exhausted afterwards. An entry whose name is not UTF-8 yields
/// [`WalkError::NonUtf8Path`] at its turn and the walk carries on with its
/// siblings.
pub struct Walk<'w, 'a> {
    walker: &'w mut TreeWalker<'a>,
    /// Directory to expand before the stack advances again.
    pending: Option<Utf8PathBuf>,
    stack: Vec<Level>,
    stats: WalkStats,
    done: bool,
}

impl Walk<'_, '_> {
    /// Returns the statistics gathered so far.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Number of directory levels currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn open_level(&mut self, dir: &Utf8Path) -> Result<(), WalkError> {
        self.stats.record_level_started();
        self.walker.hooks.emit(SearchEvent::Started);

        let level = Level::read(dir, &self.walker.config)?;
        debug!(
            dir = %dir,
            depth = self.stack.len(),
            dirs = level.dirs.len(),
            files = level.files.len(),
            "Expanding directory"
        );
        self.stack.push(level);
        Ok(())
    }

    fn finish_level(&mut self) {
        self.stack.pop();
        self.stats.record_level_finished();
        self.walker.hooks.emit(SearchEvent::Finished);
        debug!(depth = self.stack.len(), "Finished directory level");
    }

    /// Breaks out of the current level's subdirectory loop.
    fn abort_dirs(&mut self, path: &Utf8Path) {
        debug!(path = %path, "Directory loop aborted");
        self.stats.record_aborted();
        if let Some(level) = self.stack.last_mut() {
            level.in_dirs = false;
        }
    }

    /// Breaks out of the current level's file loop, which ends the level.
    fn abort_files(&mut self, path: &Utf8Path) {
        debug!(path = %path, "File loop aborted");
        self.stats.record_aborted();
        self.finish_level();
    }

    fn notify(&mut self, kind: VisitKind, path: Utf8PathBuf) -> Visit {
        self.stats.record_notification(kind);
        self.walker.hooks.notify(kind, path)
    }

    fn visit_dir(&mut self, dir: Utf8PathBuf) -> Option<Utf8PathBuf> {
        let visit = self.notify(VisitKind::DirectoryFound, dir);
        if visit.is_aborted() {
            self.abort_dirs(visit.path());
            return None;
        }
        if visit.is_excluded() {
            self.stats.record_excluded();
            return None;
        }

        let dir = visit.into_path();
        if !self.walker.filter.matches(&dir) {
            // Descent does not depend on the predicate.
            self.pending = Some(dir);
            return None;
        }

        let visit = self.notify(VisitKind::FilteredDirectoryFound, dir);
        if visit.is_aborted() {
            self.abort_dirs(visit.path());
            return None;
        }
        if visit.is_excluded() {
            self.stats.record_excluded();
            if self.walker.config.filtered_exclude.descends() {
                self.pending = Some(visit.into_path());
            }
            return None;
        }

        let dir = visit.into_path();
        self.stats.record_yielded_dir();
        self.pending = Some(dir.clone());
        Some(dir)
    }

    fn visit_file(&mut self, file: Utf8PathBuf) -> Option<Utf8PathBuf> {
        let visit = self.notify(VisitKind::FileFound, file);
        if visit.is_aborted() {
            self.abort_files(visit.path());
            return None;
        }
        if visit.is_excluded() {
            self.stats.record_excluded();
            return None;
        }

        let file = visit.into_path();
        if !self.walker.filter.matches(&file) {
            return None;
        }

        let visit = self.notify(VisitKind::FilteredFileFound, file);
        if visit.is_aborted() {
            self.abort_files(visit.path());
            return None;
        }
        if visit.is_excluded() {
            self.stats.record_excluded();
            return None;
        }

        self.stats.record_yielded_file();
        Some(visit.into_path())
    }
}

impl Iterator for Walk<'_, '_> {
    type Item = Result<Utf8PathBuf, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if let Some(dir) = self.pending.take() {
                if let Err(err) = self.open_level(&dir) {
                    warn!(error = %err, "Walk stopped");
                    self.done = true;
                    return Some(Err(err));
                }
                continue;
            }

            let Some(level) = self.stack.last_mut() else {
                self.done = true;
                return None;
            };

            let item = match level.step() {
                Step::Dir(dir) => self.visit_dir(dir),
                Step::File(file) => self.visit_file(file),
                Step::Unreadable(path) => {
                    let err = WalkError::NonUtf8Path(path);
                    warn!(error = %err, "Skipping entry");
                    self.stats.record_skipped();
                    return Some(Err(err));
                }
                Step::Finished => {
                    self.finish_level();
                    None
                }
            };

            if let Some(path) = item {
                return Some(Ok(path));
            }
        }
    }
}

impl FusedIterator for Walk<'_, '_> {}

impl std::fmt::Debug for Walk<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walk")
            .field("root", &self.walker.root)
            .field("depth", &self.stack.len())
            .field("pending", &self.pending)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
