//! Merge Engine
//!
//! Reconciles a clean directory against the content index of a keep
//! directory. Each visible regular file in the clean directory is either
//! deleted (its content is already kept) or moved into the keep directory,
//! renamed with a numeric suffix when its name is taken.
//!
//! Every entry is committed on its own. A failure aborts the run and leaves
//! earlier steps in place; the error carries the report accumulated so far.

use crate::config::{MergeOptions, NonFilePolicy};
use crate::error::{MergeError, MergeOp};
use crate::fingerprint::fingerprint_file;
use crate::index::ContentIndex;
use crate::listing::{list_visible, DirEntry};
use crate::report::{EntryOutcome, MergeReport, Outcome};
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Check both targets before anything is touched.
///
/// Returns the canonical keep and clean paths.
pub fn validate_targets(keep_dir: &Path, clean_dir: &Path) -> Result<(PathBuf, PathBuf), MergeError> {
    let keep = resolve_target(keep_dir, "keep")?;
    let clean = resolve_target(clean_dir, "clean")?;
    if keep == clean {
        return Err(MergeError::InvalidTarget {
            path: clean_dir.to_path_buf(),
            reason: "keep and clean are the same directory".to_string(),
        });
    }
    Ok((keep, clean))
}

fn resolve_target(path: &Path, role: &str) -> Result<PathBuf, MergeError> {
    if !path.is_dir() {
        return Err(MergeError::InvalidTarget {
            path: path.to_path_buf(),
            reason: format!("not a valid directory to {}", role),
        });
    }
    dunce::canonicalize(path).map_err(|e| MergeError::InvalidTarget {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Merge `clean_dir` into `keep_dir`
pub fn merge_dirs(
    keep_dir: &Path,
    clean_dir: &Path,
    options: &MergeOptions,
) -> Result<MergeReport, MergeError> {
    let (keep, clean) = validate_targets(keep_dir, clean_dir)?;
    let mut engine = MergeEngine::new(&keep, options.clone())?;
    engine.merge_from(&clean)
}

pub struct MergeEngine {
    index: ContentIndex,
    options: MergeOptions,
    /// Destinations claimed during this run; dry runs never create them on disk
    reserved: HashSet<PathBuf>,
}

impl MergeEngine {
    /// Build the content index of `keep_dir` and wrap it in an engine
    pub fn new(keep_dir: &Path, options: MergeOptions) -> Result<Self, MergeError> {
        options.validate().map_err(MergeError::ConfigError)?;
        let index = ContentIndex::build(keep_dir, &options)?;
        Ok(Self::with_index(index, options))
    }

    /// Use an already built index; its root is the merge destination
    pub fn with_index(index: ContentIndex, options: MergeOptions) -> Self {
        Self {
            index,
            options,
            reserved: HashSet::new(),
        }
    }

    pub fn index(&self) -> &ContentIndex {
        &self.index
    }

    pub fn into_index(self) -> ContentIndex {
        self.index
    }

    pub fn keep_dir(&self) -> &Path {
        self.index.root()
    }

    /// Process every visible entry of `clean_dir`
    pub fn merge_from(&mut self, clean_dir: &Path) -> Result<MergeReport, MergeError> {
        let keep_dir = self.index.root().to_path_buf();
        let clean_dir = resolve_target(clean_dir, "clean")?;
        if clean_dir == keep_dir {
            return Err(MergeError::InvalidTarget {
                path: clean_dir,
                reason: "keep and clean are the same directory".to_string(),
            });
        }

        info!(
            clean = %clean_dir.display(),
            keep = %keep_dir.display(),
            dry_run = self.options.dry_run,
            "Merging files"
        );

        let entries = list_visible(&clean_dir)?;
        if self.options.on_non_file == NonFilePolicy::Fail {
            if let Some(entry) = entries.iter().find(|e| !e.is_file()) {
                return Err(MergeError::UnsupportedEntry {
                    path: entry.path.clone(),
                    kind: entry.kind,
                });
            }
        }

        let mut report = MergeReport::new(keep_dir, clean_dir, self.options.dry_run);
        report.indexed = self.index.len();
        report.keep_duplicates = self.index.duplicates().to_vec();

        for entry in entries {
            if !entry.is_file() {
                warn!(path = %entry.path.display(), kind = %entry.kind, "Skipping non-file entry");
                report.record(EntryOutcome {
                    source: entry.path,
                    fingerprint: None,
                    outcome: Outcome::Skipped { kind: entry.kind },
                });
                continue;
            }

            let outcome = match self.process_file(&entry) {
                Ok(outcome) => outcome,
                Err((op, source)) => {
                    return Err(MergeError::Aborted {
                        path: entry.path,
                        op,
                        source,
                        report: Box::new(report),
                    });
                }
            };
            report.total += 1;
            report.record(outcome);
        }

        info!(
            total = report.total,
            deleted = report.deleted,
            moved = report.moved,
            skipped = report.skipped,
            "Merge finished"
        );

        if !report.is_consistent() {
            warn!(
                total = report.total,
                deleted = report.deleted,
                moved = report.moved,
                "Counts do not match"
            );
            if self.options.strict_consistency {
                return Err(MergeError::ConsistencyViolation {
                    total: report.total,
                    deleted: report.deleted,
                    moved: report.moved,
                });
            }
        }

        Ok(report)
    }

    fn process_file(&mut self, entry: &DirEntry) -> Result<EntryOutcome, (MergeOp, io::Error)> {
        let fingerprint = match fingerprint_file(&entry.path, self.options.block_size) {
            Ok(fingerprint) => fingerprint,
            Err(MergeError::Unreadable { source, .. }) => return Err((MergeOp::Read, source)),
            Err(other) => return Err((MergeOp::Read, io::Error::other(other.to_string()))),
        };

        if let Some(existing) = self.index.lookup(&fingerprint) {
            let duplicate_of = existing.to_path_buf();
            debug!(
                file = %entry.name,
                hash = %fingerprint.short(),
                duplicate_of = %duplicate_of.display(),
                "DELETING, content already kept"
            );
            if !self.options.dry_run {
                fs::remove_file(&entry.path).map_err(|e| (MergeOp::Delete, e))?;
            }
            return Ok(EntryOutcome {
                source: entry.path.clone(),
                fingerprint: Some(fingerprint),
                outcome: Outcome::Deleted { duplicate_of },
            });
        }

        let keep_dir = self.index.root().to_path_buf();
        let (destination, renamed) = collision_free_path(
            &keep_dir,
            &entry.file_name,
            &self.options.suffix_separator,
            |candidate| self.is_occupied(candidate),
        );
        if renamed {
            debug!(
                file = %entry.name,
                destination = %destination.display(),
                "Filename collision, generated new path"
            );
        }
        debug!(
            file = %entry.name,
            hash = %fingerprint.short(),
            destination = %destination.display(),
            "MOVING, content not yet kept"
        );

        if !self.options.dry_run {
            move_file(&entry.path, &destination).map_err(|e| (MergeOp::Move, e))?;
        }
        self.reserved.insert(destination.clone());
        self.index.insert(fingerprint, destination.clone());

        Ok(EntryOutcome {
            source: entry.path.clone(),
            fingerprint: Some(fingerprint),
            outcome: Outcome::Moved {
                destination,
                renamed,
            },
        })
    }

    fn is_occupied(&self, path: &Path) -> bool {
        self.reserved.contains(path) || path.symlink_metadata().is_ok()
    }
}

/// Find a free destination for `file_name` inside `dir`.
///
/// Tries the name unchanged, then `stem{sep}1.ext`, `stem{sep}2.ext`, ...
/// Returns the path and whether a suffix was needed.
pub fn collision_free_path<F>(dir: &Path, file_name: &OsStr, separator: &str, is_taken: F) -> (PathBuf, bool)
where
    F: Fn(&Path) -> bool,
{
    let candidate = dir.join(file_name);
    if !is_taken(&candidate) {
        return (candidate, false);
    }

    let mut n: u64 = 1;
    loop {
        let candidate = dir.join(suffixed_name(file_name, separator, n));
        if !is_taken(&candidate) {
            return (candidate, true);
        }
        n += 1;
    }
}

/// `report.txt` -> `report_1.txt`; `README` -> `README_1`
pub fn suffixed_name(file_name: &OsStr, separator: &str, n: u64) -> OsString {
    let name = Path::new(file_name);
    let mut out = name
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_else(|| file_name.to_os_string());
    out.push(format!("{}{}", separator, n));
    if let Some(ext) = name.extension() {
        out.push(".");
        out.push(ext);
    }
    out
}

/// Rename, falling back to copy and remove across filesystems
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => {
            debug!(from = %from.display(), to = %to.display(), "Cross-device move, copying");
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}

fn is_cross_device(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::CrossesDevices
}
