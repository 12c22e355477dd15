//! File collection.
//!
//! ```text
//! directory tree ──▶ FileWalker ──▶ CollectedFile* ──▶ EntrySink ──▶ zip
//! ```
//!
//! The walker filters by extension and yields files lazily; the collector
//! pulls one file at a time and hands it to an archive sink from
//! [`crate::utils::compress`].
//!
//! ## Usage Example
//!
//! ```no_run
//! use file_collector::collectors::collector::collect;
//! use file_collector::config::{CollectorConfig, Overrides, Preset};
//! use std::path::PathBuf;
//!
//! # fn example() -> anyhow::Result<()> {
//! let settings = CollectorConfig::default().resolve(Overrides {
//!     source: Some(PathBuf::from("/data")),
//!     destination: Some(PathBuf::from("/tmp/documents.zip")),
//!     presets: vec![Preset::Documents],
//!     ..Default::default()
//! })?;
//!
//! let report = collect(settings)?;
//! println!("Archived {} files", report.archived);
//! # Ok(())
//! # }
//! ```

/// Pipeline driver: walk, append, report
pub mod collector;

/// Lazy extension-filtered directory walk
pub mod walker;
