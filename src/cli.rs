use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Overrides, Preset};
use crate::constants::DEFAULT_CONFIG_NAME;

/// Command-line arguments for the file collector.
///
/// Positional arguments may be omitted when a configuration file supplies
/// them; anything given here overrides the file.
#[derive(Parser, Debug)]
#[clap(
    name = "file-collector",
    about = "Collects files by extension and stores them in a zip file",
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    /// Source directory to collect files from
    pub source: Option<PathBuf>,

    /// Destination zip file, e.g. /path/to/my_file.zip
    pub zipfile: Option<PathBuf>,

    /// File extensions to add to the search criteria, e.g. .txt .pdf .jpeg
    pub extensions: Vec<String>,

    /// Print each file to stdout as it is appended to the zip file
    #[clap(short, long)]
    pub verbose: bool,

    /// Include the common media file extensions (documents, videos, audio, images)
    #[clap(short, long)]
    pub media: bool,

    /// Include a single built-in extension preset (repeatable)
    #[clap(short, long, value_enum)]
    pub preset: Vec<Preset>,

    /// Path to configuration YAML file
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Skip files that disappear before they are archived instead of aborting
    #[clap(long)]
    pub skip_missing: bool,

    /// Keep the archive open for the whole run instead of reopening it per file
    #[clap(long)]
    pub keep_open: bool,

    /// Debug logging
    #[clap(long)]
    pub debug: bool,

    /// Subcommands
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the collector.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a default configuration file
    InitConfig {
        /// Path to output configuration file
        #[clap(default_value = DEFAULT_CONFIG_NAME)]
        path: PathBuf,
    },
}

impl Args {
    /// Command-line values to layer over the configuration file
    pub fn overrides(&self) -> Overrides {
        Overrides {
            source: self.source.clone(),
            destination: self.zipfile.clone(),
            extensions: self.extensions.clone(),
            presets: self.preset.clone(),
            media: self.media,
            verbose: self.verbose,
            skip_missing: self.skip_missing,
            keep_open: self.keep_open,
        }
    }
}
