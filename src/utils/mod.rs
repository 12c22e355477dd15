//! Archive utilities.
//!
//! ### Appending a File to an Archive
//!
//! ```no_run
//! use file_collector::models::CollectedFile;
//! use file_collector::utils::compress::append_to_zip;
//! use std::path::{Path, PathBuf};
//!
//! # fn example() -> anyhow::Result<()> {
//! let file = CollectedFile::new(PathBuf::from("/data/reports/q3.pdf"));
//! let bytes = append_to_zip(Path::new("/tmp/reports.zip"), &file)?;
//! println!("Stored {} bytes as {}", bytes, file.name());
//! # Ok(())
//! # }
//! ```

/// Zip archive appenders
pub mod compress;
