//! CLI domain: parse, route, output, and presentation only.
//! Merge behavior lives in the library; this layer wires flags to it.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error, EXIT_FAILURE, EXIT_USAGE};
pub use parse::{Cli, OutputFormat};
pub use presentation::{format_report, format_report_json, format_report_text};
pub use route::RunContext;
