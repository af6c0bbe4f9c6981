//! Walk statistics.
//!
//! [`WalkStats`] counts notifications and outcomes while a walk runs;
//! [`StatsSnapshot`] is the serializable point-in-time view.
//!
//! The walk is single-threaded, so counters are plain integers updated
//! through `&mut self`.

use serde::{Deserialize, Serialize};

use crate::events::VisitKind;

/// Counters updated by a running walk.
#[derive(Debug, Clone, Default)]
pub struct WalkStats {
    levels_started: u64,
    levels_finished: u64,
    notifications: [u64; 4],
    yielded_dirs: u64,
    yielded_files: u64,
    excluded: u64,
    aborted: u64,
    skipped: u64,
}

impl WalkStats {
    /// Creates counters at zero.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a `SearchStarted` notification.
    #[inline]
    pub fn record_level_started(&mut self) {
        self.levels_started += 1;
    }

    /// Records a `SearchFinished` notification.
    #[inline]
    pub fn record_level_finished(&mut self) {
        self.levels_finished += 1;
    }

    /// Records an entry notification of the given kind.
    #[inline]
    pub fn record_notification(&mut self, kind: VisitKind) {
        self.notifications[kind.index()] += 1;
    }

    /// Records an entry that a handler excluded.
    #[inline]
    pub fn record_excluded(&mut self) {
        self.excluded += 1;
    }

    /// Records a level loop cut short by a handler.
    #[inline]
    pub fn record_aborted(&mut self) {
        self.aborted += 1;
    }

    /// Records an entry skipped because its name is not UTF-8.
    #[inline]
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Records a yielded directory.
    #[inline]
    pub fn record_yielded_dir(&mut self) {
        self.yielded_dirs += 1;
    }

    /// Records a yielded file.
    #[inline]
    pub fn record_yielded_file(&mut self) {
        self.yielded_files += 1;
    }

    /// Returns a snapshot of all counters.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsv_walker::{VisitKind, WalkStats};
    ///
    /// let mut stats = WalkStats::new();
    /// stats.record_notification(VisitKind::FileFound);
    /// stats.record_yielded_file();
    ///
    /// let snap = stats.snapshot();
    /// assert_eq!(snap.files_found, 1);
    /// assert_eq!(snap.yielded(), 1);
    /// ```
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        let count = |kind: VisitKind| self.notifications[kind.index()];
        StatsSnapshot {
            levels_started: self.levels_started,
            levels_finished: self.levels_finished,
            directories_found: count(VisitKind::DirectoryFound),
            filtered_directories_found: count(VisitKind::FilteredDirectoryFound),
            files_found: count(VisitKind::FileFound),
            filtered_files_found: count(VisitKind::FilteredFileFound),
            yielded_dirs: self.yielded_dirs,
            yielded_files: self.yielded_files,
            excluded: self.excluded,
            aborted: self.aborted,
            skipped: self.skipped,
        }
    }
}

/// Point-in-time statistics for a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Directory levels whose expansion started.
    pub levels_started: u64,
    /// Directory levels fully processed.
    pub levels_finished: u64,
    /// `DirectoryFound` notifications.
    pub directories_found: u64,
    /// `FilteredDirectoryFound` notifications.
    pub filtered_directories_found: u64,
    /// `FileFound` notifications.
    pub files_found: u64,
    /// `FilteredFileFound` notifications.
    pub filtered_files_found: u64,
    /// Directories yielded to the consumer.
    pub yielded_dirs: u64,
    /// Files yielded to the consumer.
    pub yielded_files: u64,
    /// Entries skipped because a handler excluded them.
    pub excluded: u64,
    /// Level loops cut short by a handler.
    pub aborted: u64,
    /// Entries skipped because their name is not UTF-8.
    pub skipped: u64,
}

impl StatsSnapshot {
    /// Total items yielded.
    #[inline]
    #[must_use]
    pub const fn yielded(&self) -> u64 {
        self.yielded_dirs + self.yielded_files
    }

    /// Total entry notifications of all four kinds.
    #[inline]
    #[must_use]
    pub const fn notifications(&self) -> u64 {
        self.directories_found
            + self.filtered_directories_found
            + self.files_found
            + self.filtered_files_found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        assert_eq!(WalkStats::new().snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_counters() {
        let mut stats = WalkStats::new();
        stats.record_level_started();
        stats.record_notification(VisitKind::DirectoryFound);
        stats.record_notification(VisitKind::FilteredDirectoryFound);
        stats.record_notification(VisitKind::FileFound);
        stats.record_notification(VisitKind::FileFound);
        stats.record_excluded();
        stats.record_aborted();
        stats.record_yielded_dir();
        stats.record_skipped();
        stats.record_level_finished();

        let snap = stats.snapshot();
        assert_eq!(snap.levels_started, 1);
        assert_eq!(snap.levels_finished, 1);
        assert_eq!(snap.directories_found, 1);
        assert_eq!(snap.filtered_directories_found, 1);
        assert_eq!(snap.files_found, 2);
        assert_eq!(snap.filtered_files_found, 0);
        assert_eq!(snap.notifications(), 4);
        assert_eq!(snap.excluded, 1);
        assert_eq!(snap.aborted, 1);
        assert_eq!(snap.skipped, 1);
        assert_eq!(snap.yielded(), 1);
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut stats = WalkStats::new();
        stats.record_yielded_file();
        let json = serde_json::to_value(stats.snapshot()).unwrap();
        assert_eq!(json["yielded_files"], 1);
        assert_eq!(json["aborted"], 0);
    }
}
