//! Top-level directory listing
//!
//! Lists the visible entries of a single directory without descending into
//! subdirectories. Symbolic links are reported as links, never followed.

use crate::error::MergeError;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Leading character that marks an entry as hidden
pub const HIDDEN_MARKER: char = '.';

/// Kind of a directory entry, as seen without following links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Other,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
            EntryKind::Symlink => "symlink",
            EntryKind::Other => "special",
        };
        f.write_str(s)
    }
}

/// A visible entry of a listed directory
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// Lossy UTF-8 form of `file_name`, for display
    pub name: String,
    pub file_name: OsString,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Whether a name is hidden by platform convention
pub fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_MARKER)
}

/// List the visible entries of `dir`, sorted by name
pub fn list_visible(dir: &Path) -> Result<Vec<DirEntry>, MergeError> {
    if !dir.is_dir() {
        return Err(MergeError::NotADirectory(dir.to_path_buf()));
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            MergeError::Unreadable {
                path,
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
            }
        })?;

        let file_name = entry.file_name().to_os_string();
        let name = file_name.to_string_lossy().into_owned();
        if is_hidden(&name) {
            continue;
        }

        let file_type = entry.file_type();
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        };

        entries.push(DirEntry {
            name,
            file_name,
            path: entry.into_path(),
            kind,
        });
    }

    Ok(entries)
}
