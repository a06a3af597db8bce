//! CLI route: run context built from flags and config, dispatching to the merge engine.

use crate::cli::parse::{Cli, OutputFormat};
use crate::cli::presentation::format_report;
use crate::config::{ConfigLoader, MergeConfig};
use crate::error::MergeError;
use crate::merge::merge_dirs;
use std::path::PathBuf;
use tracing::info;

/// Runtime context for one invocation: effective config plus targets.
pub struct RunContext {
    config: MergeConfig,
    keep: Option<PathBuf>,
    clean: Option<PathBuf>,
    format: OutputFormat,
    print_config: bool,
}

impl RunContext {
    /// Load configuration and apply CLI overrides.
    /// Precedence: CLI flags override env vars override config files override defaults.
    pub fn new(cli: &Cli) -> Result<Self, MergeError> {
        let config = match cli.config {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Self::with_config(cli, config)
    }

    /// Apply CLI overrides to an already loaded configuration
    pub fn with_config(cli: &Cli, mut config: MergeConfig) -> Result<Self, MergeError> {
        if cli.verbose {
            config.logging.level = "debug".to_string();
        }
        if let Some(ref level) = cli.log_level {
            config.logging.level = level.clone();
        }
        if let Some(ref format) = cli.log_format {
            config.logging.format = format.clone();
        }
        if cli.dry_run {
            config.merge.dry_run = true;
        }
        if cli.strict {
            config.merge.strict_consistency = true;
        }
        if let Some(policy) = cli.on_non_file {
            config.merge.on_non_file = policy;
        }
        config.validate()?;

        Ok(Self {
            config,
            keep: cli.keep.clone(),
            clean: cli.clean.clone(),
            format: cli.format,
            print_config: cli.print_config,
        })
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Run the merge (or print config) and return the rendered output
    pub fn execute(&self) -> Result<String, MergeError> {
        if self.print_config {
            return self.config.to_toml();
        }

        let (keep, clean) = match (&self.keep, &self.clean) {
            (Some(keep), Some(clean)) => (keep, clean),
            (None, _) => {
                return Err(MergeError::InvalidTarget {
                    path: PathBuf::new(),
                    reason: "you must specify a valid directory to keep".to_string(),
                })
            }
            (_, None) => {
                return Err(MergeError::InvalidTarget {
                    path: PathBuf::new(),
                    reason: "you must specify a valid directory to clean".to_string(),
                })
            }
        };

        let report = merge_dirs(keep, clean, &self.config.merge)?;
        info!(
            total = report.total,
            deleted = report.deleted,
            moved = report.moved,
            "Command completed"
        );
        format_report(&report, self.format, self.use_color())
    }

    /// Render whatever is worth showing for a failed run
    pub fn render_failure(&self, error: &MergeError) -> Option<String> {
        let report = error.partial_report()?;
        format_report(report, self.format, self.use_color()).ok()
    }

    fn use_color(&self) -> bool {
        self.config.logging.color && std::env::var_os("NO_COLOR").is_none()
    }
}
