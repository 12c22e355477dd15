//! Test utilities for file-collector
//!
//! Fixture trees and helpers for reading archives back.

#![cfg(test)]

use anyhow::Result;
use std::fs;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;
use zip::ZipArchive;

/// Creates a temporary directory that is automatically cleaned up
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Tree with `a.txt`, `b.jpg` and `c/d.pdf`
pub fn create_mixed_tree() -> Result<TempDir> {
    let temp_dir = create_temp_dir()?;
    let base_path = temp_dir.path();

    fs::create_dir_all(base_path.join("c"))?;
    fs::write(base_path.join("a.txt"), b"text file a")?;
    fs::write(base_path.join("b.jpg"), b"\xff\xd8\xff\xe0 jpeg b")?;
    fs::write(base_path.join("c/d.pdf"), b"%PDF-1.4 pdf d")?;

    Ok(temp_dir)
}

/// Entry names in archive order
pub fn archive_entries(zip_path: &Path) -> Vec<String> {
    let file = fs::File::open(zip_path).unwrap();
    let mut archive = ZipArchive::new(file).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

/// Content of the first entry called `name`
pub fn read_entry(zip_path: &Path, name: &str) -> Vec<u8> {
    let file = fs::File::open(zip_path).unwrap();
    let mut archive = ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut content = Vec::new();
    entry.read_to_end(&mut content).unwrap();
    content
}
