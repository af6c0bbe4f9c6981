//! Predicates deciding which entries are "filtered in".
//!
//! The [`PathFilter`] trait is evaluated on the full path of every directory
//! and file that survives its `*Found` notification. A passing entry gets a
//! `Filtered*Found` notification and becomes eligible for output.
//!
//! Any `Fn(&Utf8Path) -> bool` is a filter, so ad hoc predicates need no type
//! of their own.
//!
//! # Examples
//!
//! ```
//! use fsv_walker::{PathFilter, SuffixFilter, ContainsFilter, CompositeFilter};
//! use camino::Utf8Path;
//!
//! let filter = CompositeFilter::new()
//!     .and(SuffixFilter::new(".txt"))
//!     .and(|path: &Utf8Path| !path.as_str().contains("drafts"));
//!
//! assert!(filter.matches(Utf8Path::new("notes/a.txt")));
//! assert!(!filter.matches(Utf8Path::new("drafts/a.txt")));
//! assert!(!filter.matches(Utf8Path::new("notes/a.log")));
//! ```

use camino::Utf8Path;
use smallvec::SmallVec;

/// A predicate over walked paths.
///
/// # Examples
///
/// ```
/// use fsv_walker::PathFilter;
/// use camino::Utf8Path;
///
/// struct NoHidden;
///
/// impl PathFilter for NoHidden {
///     fn matches(&self, path: &Utf8Path) -> bool {
///         !path.file_name().is_some_and(|name| name.starts_with('.'))
///     }
/// }
///
/// assert!(NoHidden.matches(Utf8Path::new("src/lib.rs")));
/// assert!(!NoHidden.matches(Utf8Path::new("src/.cache")));
/// ```
pub trait PathFilter {
    /// Returns `true` if `path` is filtered in.
    fn matches(&self, path: &Utf8Path) -> bool;
}

impl<F> PathFilter for F
where
    F: Fn(&Utf8Path) -> bool,
{
    #[inline]
    fn matches(&self, path: &Utf8Path) -> bool {
        self(path)
    }
}

/// A filter that accepts every path. The walker's default.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl PathFilter for AcceptAll {
    #[inline]
    fn matches(&self, _path: &Utf8Path) -> bool {
        true
    }
}

/// Accepts paths whose string form ends with a suffix.
///
/// Unlike [`ExtensionFilter`], the suffix is compared against the whole path
/// string, so `".txt"` matches `a.txt` and `.txt` alike, and the comparison is
/// case-sensitive.
///
/// # Examples
///
/// ```
/// use fsv_walker::{PathFilter, SuffixFilter};
/// use camino::Utf8Path;
///
/// let filter = SuffixFilter::new(".txt");
/// assert!(filter.matches(Utf8Path::new("root/sub/a.txt")));
/// assert!(!filter.matches(Utf8Path::new("root/sub/a.TXT")));
/// assert!(!filter.matches(Utf8Path::new("root/sub")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixFilter {
    suffix: String,
}

impl SuffixFilter {
    /// Creates a suffix filter.
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// The suffix being matched.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl PathFilter for SuffixFilter {
    fn matches(&self, path: &Utf8Path) -> bool {
        path.as_str().ends_with(self.suffix.as_str())
    }
}

/// Accepts paths with one of the given extensions (without the leading dot).
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    extensions: SmallVec<[String; 4]>,
}

impl ExtensionFilter {
    /// Creates an extension filter.
    #[must_use]
    pub fn new(extensions: &[&str]) -> Self {
        Self {
            extensions: extensions.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl PathFilter for ExtensionFilter {
    fn matches(&self, path: &Utf8Path) -> bool {
        path.extension()
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

/// Accepts paths containing any of the given substrings.
///
/// The entry point uses this to decide which entries its exclusion and abort
/// rules apply to.
///
/// # Examples
///
/// ```
/// use fsv_walker::{PathFilter, ContainsFilter};
/// use camino::Utf8Path;
///
/// let filter = ContainsFilter::new(["TestAbortFolder", "node_modules"]);
/// assert!(filter.matches(Utf8Path::new("root/TestAbortFolder/x")));
/// assert!(!filter.matches(Utf8Path::new("root/src")));
/// assert!(!ContainsFilter::new(Vec::<String>::new()).matches(Utf8Path::new("x")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContainsFilter {
    patterns: SmallVec<[String; 4]>,
}

impl ContainsFilter {
    /// Creates a filter from substrings.
    #[must_use]
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if no pattern is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl PathFilter for ContainsFilter {
    fn matches(&self, path: &Utf8Path) -> bool {
        let path_str = path.as_str();
        self.patterns
            .iter()
            .any(|pattern| path_str.contains(pattern.as_str()))
    }
}

/// Combines filters with AND logic. An empty composite accepts everything.
pub struct CompositeFilter<'a> {
    filters: Vec<Box<dyn PathFilter + 'a>>,
}

impl<'a> CompositeFilter<'a> {
    /// Creates an empty composite filter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Adds a filter to the composite.
    #[must_use]
    pub fn and<F: PathFilter + 'a>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl Default for CompositeFilter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl PathFilter for CompositeFilter<'_> {
    fn matches(&self, path: &Utf8Path) -> bool {
        self.filters.iter().all(|f| f.matches(path))
    }
}
