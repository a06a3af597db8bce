//! Dirmerge: content-aware directory merging
//!
//! Merges a "clean" directory into a "keep" directory. Files whose content
//! already exists in the keep directory are deleted; everything else is moved
//! in, with a numeric suffix added when the name is already taken.

pub mod cli;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod index;
pub mod listing;
pub mod logging;
pub mod merge;
pub mod report;

pub use config::{MergeConfig, MergeOptions, NonFilePolicy};
pub use error::MergeError;
pub use fingerprint::Fingerprint;
pub use index::ContentIndex;
pub use merge::{merge_dirs, MergeEngine};
pub use report::MergeReport;
