//! Lazy depth-first directory walker with observable, steerable notifications.
//!
//! # Overview
//!
//! The main entry point is [`TreeWalker`], which combines:
//!
//! - a root directory and a [`PathFilter`] predicate (the walk request)
//! - [`Hooks`]: ordered handler lists for six notification kinds
//! - [`WalkConfig`](fsv_core::WalkConfig): ordering, links, exclusion policy
//!
//! [`TreeWalker::walk`] returns a [`Walk`], an iterator that expands one
//! directory level at a time and runs handlers as it goes. Handlers receive a
//! [`Visit`] and may set `exclude` (skip the entry) or `abort` (stop the
//! remaining siblings of the current level).
//!
//! # Example
//!
//! ```no_run
//! use fsv_walker::{SuffixFilter, TreeWalker};
//!
//! let mut walker = TreeWalker::new("/data/inbox")?.with_filter(SuffixFilter::new(".txt"));
//! walker
//!     .on_search_started(|| println!("Search started."))
//!     .on_file_found(|visit| {
//!         if visit.path().as_str().contains("text4.txt") {
//!             visit.exclude();
//!         }
//!     });
//!
//! for item in walker.walk() {
//!     println!("{}", item?);
//! }
//! # Ok::<(), fsv_walker::WalkError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! TreeWalker (walk request + handlers)
//!     │
//!     └── Walk (one forward pass)
//!             │
//!             ├── Level stack (explicit, one per open directory)
//!             ├── Hooks::emit / Hooks::notify (handlers, in registration order)
//!             ├── PathFilter::matches (predicate)
//!             └── WalkStats (counters)
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
mod events;
mod filter;
mod hooks;
mod stats;
mod walker;

pub use error::WalkError;
pub use events::{SearchEvent, Visit, VisitKind};
pub use filter::{
    AcceptAll, CompositeFilter, ContainsFilter, ExtensionFilter, PathFilter, SuffixFilter,
};
pub use hooks::{Hooks, SearchHandler, VisitHandler};
pub use stats::{StatsSnapshot, WalkStats};
pub use walker::{TreeWalker, Walk};
