//! Content Index
//!
//! Maps content fingerprints to the path holding that content in the keep
//! directory. Built once per run, then extended by the merge engine as files
//! are moved in.

use crate::config::{MergeOptions, NonFilePolicy};
use crate::error::MergeError;
use crate::fingerprint::{fingerprint_file, Fingerprint};
use crate::listing::list_visible;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Two keep-directory files with identical content.
///
/// The first file in listing order stays in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeepDuplicate {
    pub fingerprint: Fingerprint,
    pub canonical: PathBuf,
    pub duplicate: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ContentIndex {
    root: PathBuf,
    entries: HashMap<Fingerprint, PathBuf>,
    duplicates: Vec<KeepDuplicate>,
}

impl ContentIndex {
    /// Empty index rooted at `root`. The path is used as given.
    pub fn empty(root: PathBuf) -> Self {
        Self {
            root,
            entries: HashMap::new(),
            duplicates: Vec::new(),
        }
    }

    /// Fingerprint every visible regular file in `dir`
    pub fn build(dir: &Path, options: &MergeOptions) -> Result<Self, MergeError> {
        if !dir.is_dir() {
            return Err(MergeError::NotADirectory(dir.to_path_buf()));
        }
        let root = dunce::canonicalize(dir).map_err(|source| MergeError::Unreadable {
            path: dir.to_path_buf(),
            source,
        })?;

        info!(dir = %root.display(), "Building content index");
        let mut index = Self::empty(root.clone());

        for entry in list_visible(&root)? {
            if !entry.is_file() {
                match options.on_non_file {
                    NonFilePolicy::Skip => {
                        debug!(path = %entry.path.display(), kind = %entry.kind, "Not indexing non-file entry");
                        continue;
                    }
                    NonFilePolicy::Fail => {
                        return Err(MergeError::UnsupportedEntry {
                            path: entry.path,
                            kind: entry.kind,
                        });
                    }
                }
            }

            let fingerprint = fingerprint_file(&entry.path, options.block_size)?;
            if let Some(canonical) = index.entries.get(&fingerprint) {
                warn!(
                    canonical = %canonical.display(),
                    duplicate = %entry.path.display(),
                    "Keep directory already holds duplicate content"
                );
                index.duplicates.push(KeepDuplicate {
                    fingerprint,
                    canonical: canonical.clone(),
                    duplicate: entry.path,
                });
                continue;
            }
            index.entries.insert(fingerprint, entry.path);
        }

        info!(dir = %index.root.display(), files = index.len(), "Identified files");
        Ok(index)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.entries.contains_key(fingerprint)
    }

    pub fn lookup(&self, fingerprint: &Fingerprint) -> Option<&Path> {
        self.entries.get(fingerprint).map(PathBuf::as_path)
    }

    /// Record content that now lives at `path`.
    ///
    /// Returns the previous path if the fingerprint was already indexed.
    pub fn insert(&mut self, fingerprint: Fingerprint, path: PathBuf) -> Option<PathBuf> {
        self.entries.insert(fingerprint, path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep-side duplicates found while building
    pub fn duplicates(&self) -> &[KeepDuplicate] {
        &self.duplicates
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Fingerprint, &Path)> {
        self.entries.iter().map(|(k, v)| (k, v.as_path()))
    }
}
