//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::MergeError;

/// Exit status for runtime failures
pub const EXIT_FAILURE: i32 = 1;

/// Exit status for invalid or missing arguments
pub const EXIT_USAGE: i32 = 2;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &MergeError) -> String {
    if e.is_usage() {
        format!("dirmerge: {}\n\t for help use --help", e)
    } else {
        format!("dirmerge: {}", e)
    }
}

pub fn exit_code(e: &MergeError) -> i32 {
    if e.is_usage() {
        EXIT_USAGE
    } else {
        EXIT_FAILURE
    }
}
