//! Merge outcomes and run summary

use crate::fingerprint::Fingerprint;
use crate::index::KeepDuplicate;
use crate::listing::EntryKind;
use serde::Serialize;
use std::path::PathBuf;

/// What happened to a single clean-directory entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Content already present in the keep directory
    Deleted { duplicate_of: PathBuf },
    /// Content relocated into the keep directory
    Moved { destination: PathBuf, renamed: bool },
    /// Not a regular file; left in place
    Skipped { kind: EntryKind },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryOutcome {
    pub source: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<Fingerprint>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Summary of one merge run
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    pub keep_dir: PathBuf,
    pub clean_dir: PathBuf,
    /// Files in the keep directory's index before processing
    pub indexed: usize,
    /// Visible regular files of the clean directory processed to completion
    pub total: usize,
    pub deleted: usize,
    pub moved: usize,
    /// Moves that needed a collision suffix
    pub renamed: usize,
    pub skipped: usize,
    pub dry_run: bool,
    pub keep_duplicates: Vec<KeepDuplicate>,
    pub outcomes: Vec<EntryOutcome>,
}

impl MergeReport {
    pub fn new(keep_dir: PathBuf, clean_dir: PathBuf, dry_run: bool) -> Self {
        Self {
            keep_dir,
            clean_dir,
            indexed: 0,
            total: 0,
            deleted: 0,
            moved: 0,
            renamed: 0,
            skipped: 0,
            dry_run,
            keep_duplicates: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    /// Record an outcome and bump its counter
    pub fn record(&mut self, entry: EntryOutcome) {
        match &entry.outcome {
            Outcome::Deleted { .. } => self.deleted += 1,
            Outcome::Moved { renamed, .. } => {
                self.moved += 1;
                if *renamed {
                    self.renamed += 1;
                }
            }
            Outcome::Skipped { .. } => self.skipped += 1,
        }
        self.outcomes.push(entry);
    }

    /// Every seen file was either deleted or moved
    pub fn is_consistent(&self) -> bool {
        self.deleted + self.moved == self.total
    }
}
