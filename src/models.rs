use std::fmt;
use std::path::{Path, PathBuf};

/// A file selected by the walker for archival.
///
/// The record only guarantees that the file existed when it was produced;
/// the appender re-opens it and reports `SourceVanished` if it is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedFile {
    absolute_path: PathBuf,
    name: String,
    extension: String,
}

impl CollectedFile {
    pub fn new(absolute_path: PathBuf) -> Self {
        let name = absolute_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = extension_of(&name);

        CollectedFile {
            absolute_path,
            name,
            extension,
        }
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    /// Base filename, used as the entry name inside the archive
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercased final suffix including the dot, empty if there is none
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl fmt::Display for CollectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.absolute_path.display())
    }
}

// A leading dot alone (".bashrc") is a hidden file, not an extension.
fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_lowercase(),
        _ => String::new(),
    }
}
