use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Seek, Write};
use std::path::{Path, PathBuf};

use log::debug;
use zip::{write::FileOptions, CompressionMethod, ZipArchive, ZipWriter};

use crate::constants::{COPY_CHUNK_SIZE, ENTRY_PERMISSIONS};
use crate::error::{CollectorError, Result};
use crate::models::CollectedFile;

/// Destination for collected files.
///
/// Implementations write one archive entry per call to `append`, named after
/// the file's base name, in call order.
pub trait EntrySink {
    /// Archive one file. Returns `SourceVanished` without touching the
    /// archive if the file no longer exists.
    fn append(&mut self, file: &CollectedFile) -> Result<()>;

    /// Leave a well-formed archive on disk, even if nothing was appended
    fn finish(&mut self) -> Result<()>;

    /// Release the archive after a fatal error. Entries already written must
    /// stay readable; nothing new is created.
    fn abort(&mut self) -> Result<()> {
        Ok(())
    }

    fn entries_written(&self) -> usize;
}

/// Compression options for every entry: Deflate at the library's default
/// level, large-file extensions only when the source needs them.
pub fn entry_options(size: u64) -> FileOptions {
    FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(ENTRY_PERMISSIONS)
        .large_file(size >= u32::MAX as u64)
}

/// Check that an archive can be created at `path`
pub fn validate_destination(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(CollectorError::InvalidDestination {
            path: path.to_path_buf(),
            reason: "path is a directory".to_string(),
        });
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(CollectorError::InvalidDestination {
            path: path.to_path_buf(),
            reason: "parent directory does not exist".to_string(),
        });
    }

    Ok(())
}

/// Open the destination for appending, starting a fresh archive when the
/// file is absent or empty.
fn open_for_append(path: &Path) -> Result<ZipWriter<File>> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|e| CollectorError::io(path, e))?;

    let len = file.metadata().map_err(|e| CollectorError::io(path, e))?.len();
    if len == 0 {
        Ok(ZipWriter::new(file))
    } else {
        ZipWriter::new_append(file).map_err(|e| CollectorError::archive(path, e))
    }
}

fn open_source(file: &CollectedFile) -> Result<File> {
    File::open(file.absolute_path()).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            CollectorError::SourceVanished(file.absolute_path().to_path_buf())
        }
        _ => CollectorError::io(file.absolute_path(), e),
    })
}

fn write_entry<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    archive_path: &Path,
    source: File,
    file: &CollectedFile,
) -> Result<u64> {
    let size = source
        .metadata()
        .map_err(|e| CollectorError::io(file.absolute_path(), e))?
        .len();

    zip.start_file(file.name(), entry_options(size))
        .map_err(|e| CollectorError::archive(archive_path, e))?;

    let mut reader = BufReader::with_capacity(COPY_CHUNK_SIZE, source);
    let copied =
        io::copy(&mut reader, zip).map_err(|e| CollectorError::io(file.absolute_path(), e))?;

    debug!("Stored {} ({} bytes) as {}", file, copied, file.name());
    Ok(copied)
}

/// Append a single file to the archive at `archive_path`.
///
/// The archive is opened, extended by one entry and finalized before this
/// returns. The source is opened first, so a vanished file leaves the
/// archive untouched.
pub fn append_to_zip(archive_path: &Path, file: &CollectedFile) -> Result<u64> {
    let source = open_source(file)?;

    let mut zip = open_for_append(archive_path)?;
    let copied = write_entry(&mut zip, archive_path, source, file)?;
    zip.finish().map_err(|e| CollectorError::archive(archive_path, e))?;

    Ok(copied)
}

/// Write an empty archive at `path` unless one is already there.
///
/// A non-empty file that is not a readable zip is reported as `Archive` and
/// left as is.
pub fn ensure_archive(path: &Path) -> Result<()> {
    let exists = match fs::metadata(path) {
        Ok(meta) => meta.len() > 0,
        Err(_) => false,
    };
    if exists {
        let file = File::open(path).map_err(|e| CollectorError::io(path, e))?;
        ZipArchive::new(file).map_err(|e| CollectorError::archive(path, e))?;
        return Ok(());
    }

    let file = File::create(path).map_err(|e| CollectorError::io(path, e))?;
    ZipWriter::new(file)
        .finish()
        .map_err(|e| CollectorError::archive(path, e))?;
    debug!("Created empty archive {}", path.display());
    Ok(())
}

/// Reopens and finalizes the archive for every file.
///
/// An interrupted run leaves a valid archive holding every entry written so
/// far.
pub struct PerFileArchive {
    path: PathBuf,
    written: usize,
}

impl PerFileArchive {
    pub fn new(path: &Path) -> Self {
        PerFileArchive {
            path: path.to_path_buf(),
            written: 0,
        }
    }
}

impl EntrySink for PerFileArchive {
    fn append(&mut self, file: &CollectedFile) -> Result<()> {
        append_to_zip(&self.path, file)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        ensure_archive(&self.path)
    }

    fn entries_written(&self) -> usize {
        self.written
    }
}

/// Keeps one writer open for the whole run. Produces the same entries, in
/// the same order, as [`PerFileArchive`].
pub struct HeldOpenArchive {
    path: PathBuf,
    writer: Option<ZipWriter<File>>,
    written: usize,
}

impl HeldOpenArchive {
    pub fn open(path: &Path) -> Result<Self> {
        let writer = open_for_append(path)?;
        Ok(HeldOpenArchive {
            path: path.to_path_buf(),
            writer: Some(writer),
            written: 0,
        })
    }
}

impl EntrySink for HeldOpenArchive {
    fn append(&mut self, file: &CollectedFile) -> Result<()> {
        let source = open_source(file)?;

        let zip = self.writer.as_mut().ok_or_else(|| {
            let finished = io::Error::new(io::ErrorKind::Other, "archive already finished");
            CollectorError::io(&self.path, finished)
        })?;
        write_entry(zip, &self.path, source, file)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(mut zip) = self.writer.take() {
            zip.finish().map_err(|e| CollectorError::archive(&self.path, e))?;
        }
        Ok(())
    }

    fn abort(&mut self) -> Result<()> {
        self.finish()
    }

    fn entries_written(&self) -> usize {
        self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{archive_entries, read_entry};
    use tempfile::TempDir;

    fn collected(dir: &Path, name: &str, content: &[u8]) -> CollectedFile {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        CollectedFile::new(path)
    }

    #[test]
    fn test_append_creates_archive() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("out.zip");
        let file = collected(temp_dir.path(), "src/a.txt", b"alpha");

        let copied = append_to_zip(&zip_path, &file).unwrap();

        assert_eq!(copied, 5);
        assert_eq!(archive_entries(&zip_path), vec!["a.txt"]);
        assert_eq!(read_entry(&zip_path, "a.txt"), b"alpha");
    }

    #[test]
    fn test_append_keeps_existing_entries_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("out.zip");

        for name in ["one.txt", "two.pdf", "three.jpg"] {
            let file = collected(temp_dir.path(), &format!("src/{}", name), name.as_bytes());
            append_to_zip(&zip_path, &file).unwrap();
        }

        assert_eq!(archive_entries(&zip_path), vec!["one.txt", "two.pdf", "three.jpg"]);
        assert_eq!(read_entry(&zip_path, "two.pdf"), b"two.pdf");
    }

    #[test]
    fn test_entry_name_flattens_directories() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("out.zip");
        let file = collected(temp_dir.path(), "src/deep/er/d.pdf", b"pdf");

        append_to_zip(&zip_path, &file).unwrap();

        assert_eq!(archive_entries(&zip_path), vec!["d.pdf"]);
    }

    #[test]
    fn test_same_name_twice_gives_two_entries() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("out.zip");
        let first = collected(temp_dir.path(), "x/report.txt", b"first");
        let second = collected(temp_dir.path(), "y/report.txt", b"second");

        append_to_zip(&zip_path, &first).unwrap();
        append_to_zip(&zip_path, &second).unwrap();

        assert_eq!(archive_entries(&zip_path), vec!["report.txt", "report.txt"]);
    }

    #[test]
    fn test_vanished_source_leaves_archive_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("out.zip");
        let file = CollectedFile::new(temp_dir.path().join("gone.txt"));

        let err = append_to_zip(&zip_path, &file).unwrap_err();

        assert!(matches!(err, CollectorError::SourceVanished(ref p) if p.ends_with("gone.txt")));
        assert!(!zip_path.exists());
    }

    #[test]
    fn test_append_to_non_zip_destination_fails() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("out.zip");
        fs::write(&zip_path, b"this is not a zip archive").unwrap();
        let file = collected(temp_dir.path(), "a.txt", b"alpha");

        let err = append_to_zip(&zip_path, &file).unwrap_err();
        assert!(matches!(err, CollectorError::Archive { .. }));
    }

    #[test]
    fn test_binary_content_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("out.zip");
        let data: Vec<u8> = (0..200_000u32).map(|i| (i.wrapping_mul(31) % 251) as u8).collect();
        let file = collected(temp_dir.path(), "blob.png", &data);

        append_to_zip(&zip_path, &file).unwrap();

        assert_eq!(read_entry(&zip_path, "blob.png"), data);
    }

    #[test]
    fn test_entries_are_deflated() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("out.zip");
        let file = collected(temp_dir.path(), "a.txt", "repeat ".repeat(500).as_bytes());

        append_to_zip(&zip_path, &file).unwrap();

        let mut archive = ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        let entry = archive.by_index(0).unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        assert!(entry.compressed_size() < entry.size());
        assert_eq!(entry.unix_mode().map(|m| m & 0o777), Some(ENTRY_PERMISSIONS));
    }

    #[test]
    fn test_ensure_archive_creates_empty_zip() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("empty.zip");

        ensure_archive(&zip_path).unwrap();

        let archive = ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn test_ensure_archive_leaves_existing_archive() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("out.zip");
        let file = collected(temp_dir.path(), "a.txt", b"alpha");
        append_to_zip(&zip_path, &file).unwrap();

        ensure_archive(&zip_path).unwrap();

        assert_eq!(archive_entries(&zip_path), vec!["a.txt"]);
    }

    #[test]
    fn test_ensure_archive_rejects_non_zip_file() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("out.zip");
        fs::write(&zip_path, b"not a zip").unwrap();

        let result = ensure_archive(&zip_path);

        assert!(matches!(result, Err(CollectorError::Archive { .. })));
        assert_eq!(fs::read(&zip_path).unwrap(), b"not a zip");
    }

    #[test]
    fn test_held_open_matches_per_file() {
        let temp_dir = TempDir::new().unwrap();
        let files: Vec<CollectedFile> = ["a.txt", "b/c.pdf", "d/e/f.jpg"]
            .iter()
            .map(|name| collected(temp_dir.path(), &format!("src/{}", name), name.as_bytes()))
            .collect();

        let per_file_path = temp_dir.path().join("per_file.zip");
        let mut per_file = PerFileArchive::new(&per_file_path);
        for file in &files {
            per_file.append(file).unwrap();
        }
        per_file.finish().unwrap();

        let held_path = temp_dir.path().join("held.zip");
        let mut held = HeldOpenArchive::open(&held_path).unwrap();
        for file in &files {
            held.append(file).unwrap();
        }
        held.finish().unwrap();

        assert_eq!(per_file.entries_written(), 3);
        assert_eq!(held.entries_written(), 3);
        assert_eq!(archive_entries(&per_file_path), archive_entries(&held_path));
        for name in ["a.txt", "c.pdf", "f.jpg"] {
            assert_eq!(read_entry(&per_file_path, name), read_entry(&held_path, name));
        }
    }

    #[test]
    fn test_held_open_appends_to_existing_archive() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("out.zip");
        let first = collected(temp_dir.path(), "first.txt", b"1");
        append_to_zip(&zip_path, &first).unwrap();

        let second = collected(temp_dir.path(), "second.txt", b"2");
        let mut held = HeldOpenArchive::open(&zip_path).unwrap();
        held.append(&second).unwrap();
        held.finish().unwrap();

        assert_eq!(archive_entries(&zip_path), vec!["first.txt", "second.txt"]);
    }

    #[test]
    fn test_validate_destination() {
        let temp_dir = TempDir::new().unwrap();

        assert!(validate_destination(&temp_dir.path().join("out.zip")).is_ok());

        let err = validate_destination(temp_dir.path()).unwrap_err();
        assert!(matches!(err, CollectorError::InvalidDestination { .. }));

        let err = validate_destination(&temp_dir.path().join("missing/out.zip")).unwrap_err();
        assert!(matches!(err, CollectorError::InvalidDestination { .. }));

        // a bare filename lives in the current directory
        assert!(validate_destination(&PathBuf::from("out.zip")).is_ok());
    }
}
