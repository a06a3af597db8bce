//! Dirmerge CLI Binary
//!
//! Command-line interface for merging a clean directory into a keep directory.

use clap::Parser;
use dirmerge::cli::{exit_code, map_error, Cli, RunContext, EXIT_FAILURE};
use dirmerge::logging::init_logging;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let context = match RunContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_FAILURE);
        }
    };

    if let Err(e) = init_logging(&context.config().logging) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(EXIT_FAILURE);
    }

    info!("Dirmerge starting");

    match context.execute() {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            error!("Merge failed: {}", e);
            if let Some(partial) = context.render_failure(&e) {
                println!("{}", partial);
            }
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    }
}
