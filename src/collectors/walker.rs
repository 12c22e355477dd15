use std::path::{Path, PathBuf};

use log::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::ExtensionSet;
use crate::error::{CollectorError, Result};
use crate::models::CollectedFile;

/// Lazy, forward-only walk over the regular files under a root directory
/// whose names match an [`ExtensionSet`].
///
/// Each call to `next` advances the underlying directory traversal only as
/// far as the next match. Once exhausted the walker is spent; build a new
/// one to walk again.
pub struct FileWalker {
    entries: walkdir::IntoIter,
    extensions: ExtensionSet,
    root: PathBuf,
}

impl FileWalker {
    /// Prepare a walk of `root`.
    ///
    /// Fails with `SourceNotFound` before anything is read if the root does
    /// not exist.
    pub fn new(root: &Path, extensions: ExtensionSet) -> Result<Self> {
        if !root.exists() {
            return Err(CollectorError::SourceNotFound(root.to_path_buf()));
        }

        let root = std::path::absolute(root).map_err(|e| CollectorError::io(root, e))?;

        // min_depth(1) keeps a root that is itself a file from being yielded
        let entries = WalkDir::new(&root)
            .min_depth(1)
            .follow_links(false)
            .into_iter();

        Ok(FileWalker {
            entries,
            extensions,
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_regular_file(entry: &DirEntry) -> bool {
        if entry.file_type().is_file() {
            return true;
        }
        // Symlinks to files are collected, symlinked directories are not entered
        entry.path_is_symlink() && entry.path().is_file()
    }
}

impl Iterator for FileWalker {
    type Item = CollectedFile;

    fn next(&mut self) -> Option<CollectedFile> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !Self::is_regular_file(&entry) {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if self.extensions.matches(&name) {
                debug!("Matched file: {}", entry.path().display());
                return Some(CollectedFile::new(entry.into_path()));
            }
        }
    }
}

/// Walk `root` and yield every file whose name matches `extensions`
pub fn collect_files(root: &Path, extensions: &ExtensionSet) -> Result<FileWalker> {
    FileWalker::new(root, extensions.clone())
}
