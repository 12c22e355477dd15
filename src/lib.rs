//! # file-collector
//!
//! Walks a directory tree, picks out files by extension and stores them in a
//! zip archive.
//!
//! ## Overview
//!
//! Files are matched by a case-insensitive suffix test on their name against
//! an [`config::ExtensionSet`], built from operator-supplied suffixes and the
//! built-in presets (documents, videos, audio, images). Every match is added
//! to the destination archive under its base name, so the directory layout is
//! flattened.
//!
//! ## Usage
//!
//! ```no_run
//! use file_collector::collectors::walker::FileWalker;
//! use file_collector::config::ExtensionSet;
//! use file_collector::utils::compress::append_to_zip;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let extensions = ExtensionSet::new([".txt", ".pdf"])?;
//!
//! for file in FileWalker::new(Path::new("/data"), extensions)? {
//!     append_to_zip(Path::new("/tmp/out.zip"), &file)?;
//!     println!("...{}", file);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cli`]: Command-line interface definitions and argument parsing
//! - [`models`]: The `CollectedFile` record
//! - [`error`]: `CollectorError`
//! - [`collectors`]: Directory walker and the collection pipeline
//! - [`config`]: Extension sets, presets and the YAML configuration
//! - [`utils`]: Zip archive appenders
//! - [`constants`]: Preset tables and other fixed values

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Core data models
pub mod models;

/// Error type for collection runs
pub mod error;

/// Directory walking and the collection pipeline
pub mod collectors;

/// Archive writing utilities
pub mod utils;

/// Configuration management and extension criteria
pub mod config;

/// Application constants
pub mod constants;

/// Test utilities and helpers
#[cfg(test)]
pub mod test_utils;

pub use error::{CollectorError, Result};
