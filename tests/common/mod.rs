//! Shared fixture helpers for the integration tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding one test's fixture tables
pub fn fixture_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Write a UTF-8 fixture table and return its path
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Write a fixture table from raw bytes, for non-UTF-8 encodings
pub fn write_fixture_bytes(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}
