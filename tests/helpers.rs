//! Shared test utilities for bootimg tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with temporary input and output directories.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Where component files are created
    pub inputs: PathBuf,
    /// Where images are written and unpacked
    pub outputs: PathBuf,
}

impl TestEnv {
    /// Create a new test environment with temporary directories.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let inputs = base.join("in");
        let outputs = base.join("out");

        fs::create_dir_all(&inputs).expect("Failed to create inputs dir");
        fs::create_dir_all(&outputs).expect("Failed to create outputs dir");

        Self {
            _temp_dir: temp_dir,
            inputs,
            outputs,
        }
    }

    /// Write an input file and return its path.
    pub fn input(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.inputs.join(name);
        fs::write(&path, contents).expect("Failed to write input file");
        path
    }

    /// Path inside the output directory.
    pub fn output(&self, name: &str) -> PathBuf {
        self.outputs.join(name)
    }
}

/// Deterministic pseudo-random payload of `len` bytes.
pub fn payload(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u32).wrapping_mul(31).wrapping_add(seed as u32) as u8)
        .collect()
}

/// Assert that a file holds exactly `expected`.
pub fn assert_file_bytes(path: &Path, expected: &[u8]) {
    let actual =
        fs::read(path).unwrap_or_else(|e| panic!("Failed to read file {}: {e}", path.display()));
    assert!(
        actual == expected,
        "File {} has {} bytes, expected {} bytes with matching content",
        path.display(),
        actual.len(),
        expected.len()
    );
}

/// Assert that a text file holds exactly `expected`.
pub fn assert_file_text(path: &Path, expected: &str) {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read file {}: {e}", path.display()));
    assert_eq!(content, expected, "Unexpected content in {}", path.display());
}

/// Assert that a file exists.
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "Expected file to exist: {}", path.display());
}
