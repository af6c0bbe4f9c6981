//! Handler registration for walk notifications.
//!
//! [`Hooks`] keeps one ordered list of handlers per notification kind.
//! Handlers run synchronously, in registration order, on the thread driving
//! the walk iterator.

use std::fmt;

use camino::Utf8PathBuf;
use smallvec::SmallVec;

use crate::events::{SearchEvent, Visit, VisitKind};

/// Handler for the payload-free start/finish notifications.
pub type SearchHandler<'a> = Box<dyn FnMut() + 'a>;

/// Handler for the per-entry notifications.
pub type VisitHandler<'a> = Box<dyn FnMut(&mut Visit) + 'a>;

/// Registered handlers for all six notification kinds.
///
/// # Examples
///
/// ```
/// use fsv_walker::{Hooks, VisitKind};
/// use camino::Utf8PathBuf;
///
/// let mut hooks = Hooks::new();
/// hooks.on_file_found(|visit| {
///     if visit.path().as_str().ends_with(".tmp") {
///         visit.exclude();
///     }
/// });
///
/// let visit = hooks.notify(VisitKind::FileFound, Utf8PathBuf::from("scratch.tmp"));
/// assert!(visit.is_excluded());
/// ```
#[derive(Default)]
pub struct Hooks<'a> {
    search_started: SmallVec<[SearchHandler<'a>; 2]>,
    search_finished: SmallVec<[SearchHandler<'a>; 2]>,
    visits: [SmallVec<[VisitHandler<'a>; 2]>; 4],
}

impl<'a> Hooks<'a> {
    /// Creates an empty handler registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for [`SearchEvent::Started`].
    pub fn on_search_started(&mut self, handler: impl FnMut() + 'a) -> &mut Self {
        self.search_started.push(Box::new(handler));
        self
    }

    /// Registers a handler for [`SearchEvent::Finished`].
    pub fn on_search_finished(&mut self, handler: impl FnMut() + 'a) -> &mut Self {
        self.search_finished.push(Box::new(handler));
        self
    }

    /// Registers a handler for the given entry notification kind.
    pub fn on_visit(&mut self, kind: VisitKind, handler: impl FnMut(&mut Visit) + 'a) -> &mut Self {
        self.visits[kind.index()].push(Box::new(handler));
        self
    }

    /// Registers a handler for [`VisitKind::DirectoryFound`].
    pub fn on_directory_found(&mut self, handler: impl FnMut(&mut Visit) + 'a) -> &mut Self {
        self.on_visit(VisitKind::DirectoryFound, handler)
    }

    /// Registers a handler for [`VisitKind::FilteredDirectoryFound`].
    pub fn on_filtered_directory_found(
        &mut self,
        handler: impl FnMut(&mut Visit) + 'a,
    ) -> &mut Self {
        self.on_visit(VisitKind::FilteredDirectoryFound, handler)
    }

    /// Registers a handler for [`VisitKind::FileFound`].
    pub fn on_file_found(&mut self, handler: impl FnMut(&mut Visit) + 'a) -> &mut Self {
        self.on_visit(VisitKind::FileFound, handler)
    }

    /// Registers a handler for [`VisitKind::FilteredFileFound`].
    pub fn on_filtered_file_found(&mut self, handler: impl FnMut(&mut Visit) + 'a) -> &mut Self {
        self.on_visit(VisitKind::FilteredFileFound, handler)
    }

    /// Runs every handler registered for `event`.
    pub fn emit(&mut self, event: SearchEvent) {
        let handlers = match event {
            SearchEvent::Started => &mut self.search_started,
            SearchEvent::Finished => &mut self.search_finished,
        };
        for handler in handlers.iter_mut() {
            handler();
        }
    }

    /// Creates a fresh [`Visit`] for `path` and runs the `kind` handlers on it.
    ///
    /// Returns the notification so the caller can read the flags.
    pub fn notify(&mut self, kind: VisitKind, path: Utf8PathBuf) -> Visit {
        let mut visit = Visit::new(kind, path);
        for handler in &mut self.visits[kind.index()] {
            handler(&mut visit);
        }
        visit
    }

    /// Number of handlers registered for `kind`.
    #[must_use]
    pub fn visit_handler_count(&self, kind: VisitKind) -> usize {
        self.visits[kind.index()].len()
    }

    /// Returns `true` if no handler of any kind is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_started.is_empty()
            && self.search_finished.is_empty()
            && self.visits.iter().all(SmallVec::is_empty)
    }
}

impl fmt::Debug for Hooks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("search_started", &self.search_started.len())
            .field("search_finished", &self.search_finished.len())
            .field(
                "visits",
                &VisitKind::ALL.map(|kind| self.visit_handler_count(kind)),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_handlers_run_in_registration_order() {
        let log = RefCell::new(Vec::new());
        let mut hooks = Hooks::new();
        hooks
            .on_directory_found(|_| log.borrow_mut().push("first"))
            .on_directory_found(|_| log.borrow_mut().push("second"));

        hooks.notify(VisitKind::DirectoryFound, Utf8PathBuf::from("d"));
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_later_handler_sees_earlier_flags() {
        let seen = RefCell::new(None);
        let mut hooks = Hooks::new();
        hooks
            .on_file_found(Visit::exclude)
            .on_file_found(|visit| *seen.borrow_mut() = Some(visit.is_excluded()));

        let visit = hooks.notify(VisitKind::FileFound, Utf8PathBuf::from("f"));
        assert!(visit.is_excluded());
        assert_eq!(*seen.borrow(), Some(true));
    }

    #[test]
    fn test_notify_only_runs_matching_kind() {
        let calls = RefCell::new(0);
        let mut hooks = Hooks::new();
        hooks.on_filtered_file_found(|_| *calls.borrow_mut() += 1);

        hooks.notify(VisitKind::FileFound, Utf8PathBuf::from("f"));
        assert_eq!(*calls.borrow(), 0);
        hooks.notify(VisitKind::FilteredFileFound, Utf8PathBuf::from("f"));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_each_notification_gets_fresh_flags() {
        let mut hooks = Hooks::new();
        hooks.on_directory_found(|visit| {
            assert!(!visit.is_aborted());
            visit.abort();
        });

        assert!(hooks.notify(VisitKind::DirectoryFound, Utf8PathBuf::from("a")).is_aborted());
        assert!(hooks.notify(VisitKind::DirectoryFound, Utf8PathBuf::from("b")).is_aborted());
    }

    #[test]
    fn test_emit_search_events() {
        let log = RefCell::new(Vec::new());
        let mut hooks = Hooks::new();
        hooks
            .on_search_started(|| log.borrow_mut().push("started"))
            .on_search_finished(|| log.borrow_mut().push("finished"));

        hooks.emit(SearchEvent::Started);
        hooks.emit(SearchEvent::Finished);
        assert_eq!(*log.borrow(), vec!["started", "finished"]);
    }

    #[test]
    fn test_is_empty_and_counts() {
        let mut hooks = Hooks::new();
        assert!(hooks.is_empty());
        hooks.on_visit(VisitKind::FileFound, |_| {});
        assert!(!hooks.is_empty());
        assert_eq!(hooks.visit_handler_count(VisitKind::FileFound), 1);
        assert_eq!(hooks.visit_handler_count(VisitKind::DirectoryFound), 0);
    }
}
