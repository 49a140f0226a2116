/*!
 * Common test utilities for the bilyric test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;


/// Original-language lyric with metadata tags and an interlude
pub const ORIGINAL_LRC: &str = "[ti:Sample]
[ar:Singer]
[00:01.000]first line
[00:05.000]second line
[00:09.000]
[00:10.000]
[00:12.500]third line
";

/// Translation with slightly shifted timestamps
pub const TRANSLATION_LRC: &str = "[by:translator]
[00:01.200]première ligne
[00:05.100]deuxième ligne
[00:12.400]troisième ligne
";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Route library logs to the test output, once per process
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}
