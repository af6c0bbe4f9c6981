//! CLI entry point for the fsvisit directory walker.
//!
//! Walks a directory tree and prints every notification and every yielded
//! path in the order the walk produces them.
//!
//! # Usage
//!
//! ```bash
//! # Prompt for the directory on stdin
//! fsvisit
//!
//! # Walk a directory, only printing yielded paths
//! fsvisit --path ./notes --quiet
//!
//! # Accept every entry and stop a level when "cache" is seen
//! fsvisit --path ./notes --all --abort-on cache --summary
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::cell::RefCell;
use std::fmt;
use std::io::{self, BufRead, Write};

use camino::Utf8PathBuf;
use clap::Parser;
use fsv_core::{Config, FilteredExcludePolicy, validate_root_dir};
use fsv_walker::{ContainsFilter, PathFilter, StatsSnapshot, SuffixFilter, TreeWalker, VisitKind};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt as log_fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Walks a directory tree, printing walk notifications and matching paths.
///
/// Without `--path`, the directory is read from standard input.
#[derive(Parser)]
#[command(name = "fsvisit", version, about, long_about = None)]
struct Cli {
    /// Directory to walk.
    #[arg(short, long, env = "FSVISIT_PATH")]
    path: Option<Utf8PathBuf>,

    /// JSON configuration file.
    #[arg(short, long, env = "FSVISIT_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Only paths ending with this suffix are filtered in (default `.txt`).
    #[arg(long, conflicts_with = "all")]
    suffix: Option<String>,

    /// Filter in every entry.
    #[arg(long)]
    all: bool,

    /// Exclude files whose path contains this text (repeatable).
    #[arg(long, value_name = "TEXT")]
    exclude_file: Vec<String>,

    /// Exclude directories whose path contains this text (repeatable).
    #[arg(long, value_name = "TEXT")]
    exclude_dir: Vec<String>,

    /// Stop the current level at entries whose path contains this text (repeatable).
    #[arg(long, value_name = "TEXT")]
    abort_on: Vec<String>,

    /// Keep walking into filtered directories that a handler excluded.
    #[arg(long)]
    keep_descending: bool,

    /// Classify symbolic links by their target.
    #[arg(long)]
    follow_links: bool,

    /// Visit entries in filesystem order instead of sorting by name.
    #[arg(long)]
    unsorted: bool,

    /// Only print yielded paths, not notifications.
    #[arg(short, long)]
    quiet: bool,

    /// Print a statistics summary after the walk.
    #[arg(short, long)]
    summary: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored log output.
    #[arg(long)]
    no_color: bool,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects `RUST_LOG` if set. Otherwise uses `debug` with `--verbose` and
/// `warn` by default, so log lines stay out of the walk transcript. Logs go to
/// stderr.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(level)
    });

    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            log_fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Returns the root directory from `--path`, or prompts for it on stdin.
///
/// Only the line terminator is stripped from the typed answer.
fn read_root(cli: &Cli) -> color_eyre::Result<Utf8PathBuf> {
    if let Some(path) = &cli.path {
        return Ok(path.clone());
    }

    {
        let mut out = std::io::stdout().lock();
        writeln!(out, "Enter the directory path:")?;
        out.flush()?;
    }

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(Utf8PathBuf::from(line.trim_end_matches(['\r', '\n'])))
}

/// Builds a [`Config`] from the optional config file and CLI overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the result is invalid.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            info!(path = %path, "Loading configuration");
            Config::from_json_file(path)?
        }
        None => Config::default(),
    };

    if cli.all {
        config.rules.include_suffix = None;
    } else if let Some(suffix) = &cli.suffix {
        config.rules.include_suffix = Some(suffix.clone());
    }
    config.rules.exclude_files.extend(cli.exclude_file.iter().cloned());
    config.rules.exclude_dirs.extend(cli.exclude_dir.iter().cloned());
    config.rules.abort_on.extend(cli.abort_on.iter().cloned());

    if cli.keep_descending {
        config.walk.filtered_exclude = FilteredExcludePolicy::SkipYield;
    }
    if cli.follow_links {
        config.walk.follow_links = true;
    }
    if cli.unsorted {
        config.walk.sort_entries = false;
    }
    if cli.quiet {
        config.output.show_events = false;
    }
    if cli.summary {
        config.output.summary = true;
    }

    config.validate()?;
    Ok(config)
}

// =============================================================================
// WALK
// =============================================================================

/// Line output shared by the walk loop and its handlers.
///
/// The first write error is kept and every later line is dropped, so the
/// caller can stop the walk at its next check.
struct Transcript<W: Write> {
    out: RefCell<W>,
    error: RefCell<Option<io::Error>>,
}

impl<W: Write> Transcript<W> {
    fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
            error: RefCell::new(None),
        }
    }

    /// Writes one line unless an earlier write failed.
    fn line(&self, args: fmt::Arguments<'_>) {
        let mut error = self.error.borrow_mut();
        if error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out.borrow_mut(), "{args}") {
            *error = Some(err);
        }
    }

    fn is_broken(&self) -> bool {
        self.error.borrow().is_some()
    }

    /// Returns the first write error, if any.
    fn check(&self) -> io::Result<()> {
        self.error.borrow_mut().take().map_or(Ok(()), Err)
    }

    /// Checks for a write error, then flushes.
    fn finish(&self) -> io::Result<()> {
        self.check()?;
        self.out.borrow_mut().flush()
    }
}

/// Registers the printing handlers and the configured rules.
///
/// Printers are registered first so every notification line appears before
/// the rule messages for the same entry. Once output is broken, each printer
/// aborts its loop, so the walk winds down without visiting the rest of the
/// tree.
fn register_handlers<'a, W: Write>(
    walker: &mut TreeWalker<'a>,
    config: &Config,
    out: &'a Transcript<W>,
) {
    let show = config.output.show_events;

    if show {
        walker
            .on_search_started(move || out.line(format_args!("Search started.")))
            .on_search_finished(move || out.line(format_args!("Search finished.")));
        for kind in VisitKind::ALL {
            walker.on_visit(kind, move |visit| {
                out.line(format_args!("{}: {}", kind.label(), visit.path()));
                if out.is_broken() {
                    visit.abort();
                }
            });
        }
    }

    let exclude_files = ContainsFilter::new(config.rules.exclude_files.iter().cloned());
    if !exclude_files.is_empty() {
        walker.on_file_found(move |visit| {
            if exclude_files.matches(visit.path()) {
                visit.exclude();
                if show {
                    out.line(format_args!("Excluding file: {}", visit.path()));
                }
            }
        });
    }

    let exclude_dirs = ContainsFilter::new(config.rules.exclude_dirs.iter().cloned());
    if !exclude_dirs.is_empty() {
        walker.on_directory_found(move |visit| {
            if exclude_dirs.matches(visit.path()) {
                visit.exclude();
                if show {
                    out.line(format_args!("Excluding directory: {}", visit.path()));
                }
            }
        });
    }

    if !config.rules.abort_on.is_empty() {
        for kind in [VisitKind::DirectoryFound, VisitKind::FileFound] {
            let abort_on = ContainsFilter::new(config.rules.abort_on.iter().cloned());
            walker.on_visit(kind, move |visit| {
                if abort_on.matches(visit.path()) {
                    visit.abort();
                    if show {
                        out.line(format_args!("Aborting at: {}", visit.path()));
                    }
                }
            });
        }
    }
}

/// Walks `root`, writing the interleaved transcript to `out`.
///
/// Entries with non-UTF-8 names are skipped (the walker logs them).
///
/// # Errors
///
/// Returns the first fatal walk error or the first output error; lines
/// written before it stay written.
fn run_walk<W: Write>(
    root: Utf8PathBuf,
    config: &Config,
    out: &Transcript<W>,
) -> color_eyre::Result<StatsSnapshot> {
    info!(root = %root, "Starting walk");

    let walker = TreeWalker::new(root)?.with_config(config.walk);
    let mut walker = match &config.rules.include_suffix {
        Some(suffix) => walker.with_filter(SuffixFilter::new(suffix.clone())),
        None => walker,
    };
    register_handlers(&mut walker, config, out);

    let mut walk = walker.walk();
    for item in walk.by_ref() {
        match item {
            Ok(path) => out.line(format_args!("{path}")),
            Err(err) if !err.is_fatal() => {}
            Err(err) => return Err(err.into()),
        }
        out.check()?;
    }
    out.check()?;

    let stats = walk.stats();
    info!(
        yielded = stats.yielded(),
        excluded = stats.excluded,
        aborted = stats.aborted,
        "Walk completed"
    );
    Ok(stats)
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Prints a summary of walk statistics.
fn print_summary<W: Write>(out: &Transcript<W>, stats: &StatsSnapshot) {
    out.line(format_args!(""));
    out.line(format_args!("Walk Summary"));
    out.line(format_args!("============"));
    out.line(format_args!("Directory levels:   {}", stats.levels_started));
    out.line(format_args!(
        "Directories found:  {} ({} filtered in)",
        stats.directories_found, stats.filtered_directories_found
    ));
    out.line(format_args!(
        "Files found:        {} ({} filtered in)",
        stats.files_found, stats.filtered_files_found
    ));
    out.line(format_args!("Excluded:           {}", stats.excluded));
    out.line(format_args!("Aborted loops:      {}", stats.aborted));
    out.line(format_args!("Skipped entries:    {}", stats.skipped));
    out.line(format_args!(
        "Items yielded:      {} ({} directories, {} files)",
        stats.yielded(),
        stats.yielded_dirs,
        stats.yielded_files
    ));
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);

    let root = read_root(&cli)?;
    validate_root_dir(&root)?;
    let config = build_config(&cli)?;

    let out = Transcript::new(io::stdout());
    let stats = run_walk(root, &config, &out)?;
    if config.output.summary {
        print_summary(&out, &stats);
    }
    out.finish()?;

    Ok(())
}
