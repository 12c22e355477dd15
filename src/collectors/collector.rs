use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::collectors::walker::FileWalker;
use crate::config::{ArchiveMode, CollectionSettings, MissingFilePolicy};
use crate::constants::REPORT_PREFIX;
use crate::error::{CollectorError, Result};
use crate::models::CollectedFile;
use crate::utils::compress::{validate_destination, EntrySink, HeldOpenArchive, PerFileArchive};

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct CollectionReport {
    pub destination: PathBuf,
    pub archived: usize,
    /// Files that vanished before archival, only populated under
    /// `MissingFilePolicy::Skip`
    pub skipped: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// Walks the source tree and archives every matching file, one at a time.
///
/// The walk and the archive writes run in lock-step: each file is fully
/// archived (and reported, in verbose mode) before the next one is pulled
/// from the walker.
pub struct FileCollector<W: Write> {
    settings: CollectionSettings,
    out: W,
}

impl FileCollector<io::Stdout> {
    /// Collector that prints verbose lines to standard output
    pub fn new(settings: CollectionSettings) -> Self {
        FileCollector::with_output(settings, io::stdout())
    }
}

impl<W: Write> FileCollector<W> {
    pub fn with_output(settings: CollectionSettings, out: W) -> Self {
        FileCollector { settings, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run the full pipeline.
    ///
    /// The source is checked before the destination is looked at, so a
    /// missing source never creates or modifies the archive.
    pub fn run(&mut self) -> Result<CollectionReport> {
        let walker = FileWalker::new(&self.settings.source, self.settings.extensions.clone())?;
        validate_destination(&self.settings.destination)?;

        info!(
            "Collecting files from {} into {} ({} extensions)",
            walker.root().display(),
            self.settings.destination.display(),
            self.settings.extensions.len()
        );

        let destination = self.settings.destination.clone();
        let mut sink: Box<dyn EntrySink> = match self.settings.archive_mode {
            ArchiveMode::PerFile => Box::new(PerFileArchive::new(&destination)),
            ArchiveMode::HeldOpen => {
                debug!("Holding {} open for the whole run", destination.display());
                Box::new(HeldOpenArchive::open(&destination)?)
            }
        };

        self.archive_files(walker, sink.as_mut())
    }

    /// Feed `files` into `sink` in order.
    ///
    /// On a fatal error the sink is released without finalizing an empty
    /// archive, and the error is returned unchanged.
    pub fn archive_files<I>(
        &mut self,
        files: I,
        sink: &mut dyn EntrySink,
    ) -> Result<CollectionReport>
    where
        I: IntoIterator<Item = CollectedFile>,
    {
        let start = Instant::now();

        let skipped = match self.feed(files, sink) {
            Ok(skipped) => skipped,
            Err(e) => {
                if let Err(abort_err) = sink.abort() {
                    warn!("Failed to release archive after error: {}", abort_err);
                }
                return Err(e);
            }
        };
        sink.finish()?;

        let report = CollectionReport {
            destination: self.settings.destination.clone(),
            archived: sink.entries_written(),
            skipped,
            elapsed: start.elapsed(),
        };

        info!(
            "Archived {} files to {} in {:?}",
            report.archived,
            report.destination.display(),
            report.elapsed
        );
        if !report.skipped.is_empty() {
            warn!("{} files vanished before they could be archived", report.skipped.len());
        }

        Ok(report)
    }

    fn feed<I>(&mut self, files: I, sink: &mut dyn EntrySink) -> Result<Vec<PathBuf>>
    where
        I: IntoIterator<Item = CollectedFile>,
    {
        let mut skipped = Vec::new();

        for file in files {
            match sink.append(&file) {
                Ok(()) => {}
                Err(CollectorError::SourceVanished(path))
                    if self.settings.on_missing == MissingFilePolicy::Skip =>
                {
                    warn!("Skipping vanished file: {}", path.display());
                    skipped.push(path);
                    continue;
                }
                Err(e) => return Err(e),
            }

            if self.settings.verbose {
                self.report(&file)?;
            }
        }

        Ok(skipped)
    }

    fn report(&mut self, file: &CollectedFile) -> Result<()> {
        writeln!(self.out, "{}{}", REPORT_PREFIX, file)
            .and_then(|_| self.out.flush())
            .map_err(|e| CollectorError::io(Path::new("<stdout>"), e))
    }
}

/// Collect with `settings`, printing verbose lines to standard output
pub fn collect(settings: CollectionSettings) -> Result<CollectionReport> {
    FileCollector::new(settings).run()
}
