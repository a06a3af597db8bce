//! Shared fixtures for integration tests
//!
//! Each fixture owns a temp dir holding a `keep` and a `clean` directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct MergeFixture {
    _temp_dir: TempDir,
    pub keep: PathBuf,
    pub clean: PathBuf,
}

impl MergeFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let keep = temp_dir.path().join("keep");
        let clean = temp_dir.path().join("clean");
        fs::create_dir(&keep).unwrap();
        fs::create_dir(&clean).unwrap();
        Self {
            _temp_dir: temp_dir,
            keep,
            clean,
        }
    }

    pub fn keep_file(&self, name: &str, content: &str) -> &Self {
        fs::write(self.keep.join(name), content).unwrap();
        self
    }

    pub fn clean_file(&self, name: &str, content: &str) -> &Self {
        fs::write(self.clean.join(name), content).unwrap();
        self
    }
}

/// Name -> content for every entry directly inside `dir` that is a file
pub fn snapshot(dir: &Path) -> BTreeMap<String, String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().unwrap().is_file())
        .map(|e| {
            (
                e.file_name().to_string_lossy().into_owned(),
                fs::read_to_string(e.path()).unwrap(),
            )
        })
        .collect()
}
