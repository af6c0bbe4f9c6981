//! Core configuration types and errors for the fsvisit workspace.
//!
//! This crate provides the foundational types shared by the walker and the
//! command-line entry point:
//!
//! - [`Config`] and its sections ([`WalkConfig`], [`RuleConfig`], [`OutputConfig`])
//! - [`FilteredExcludePolicy`] for the filtered-directory exclusion behavior
//! - [`ConfigError`] for configuration loading and root path validation
//!
//! # Examples
//!
//! ```
//! use fsv_core::{Config, FilteredExcludePolicy};
//!
//! let config = Config::default();
//! assert_eq!(config.rules.include_suffix.as_deref(), Some(".txt"));
//! assert_eq!(config.walk.filtered_exclude, FilteredExcludePolicy::Prune);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;

pub use config::{
    Config, FilteredExcludePolicy, OutputConfig, RuleConfig, WalkConfig, validate_root_dir,
};
pub use error::ConfigError;
