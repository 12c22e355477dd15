//! Global constants for the file collector.
//!
//! The built-in extension presets live here as plain tables; they are
//! turned into an `ExtensionSet` by `config::Preset`.

// Extension presets
/// Office and text documents
pub const DOCUMENT_EXTENSIONS: &[&str] =
    &[".txt", ".doc", ".xls", ".xlsx", ".docx", ".pdf", ".odt"];

/// Video containers
pub const VIDEO_EXTENSIONS: &[&str] = &[
    ".m1v", ".mpeg", ".mov", ".qt", ".mpa", ".mpg", ".mpe", ".avi", ".movie", ".mp4",
];

/// Audio formats
pub const AUDIO_EXTENSIONS: &[&str] = &[
    ".ra", ".aif", ".aiff", ".aifc", ".wav", ".au", ".snd", ".mp3", ".mp2",
];

/// Raster image formats
pub const IMAGE_EXTENSIONS: &[&str] = &[
    ".ras", ".xwd", ".bmp", ".jpe", ".jpg", ".jpeg", ".xpm", ".ief", ".pbm", ".tif", ".gif",
    ".ppm", ".xbm", ".tiff", ".rgb", ".pgm", ".png", ".pnm",
];

// Archive constants
/// Chunk size used when copying a source file into an archive entry (512KB)
pub const COPY_CHUNK_SIZE: usize = 512 * 1024;

/// Unix permissions recorded on every archive entry
pub const ENTRY_PERMISSIONS: u32 = 0o644;

// Reporting
/// Prefix of the per-file line printed in verbose mode
pub const REPORT_PREFIX: &str = "...";

// Default file names
pub const DEFAULT_CONFIG_NAME: &str = "collector.yaml";
